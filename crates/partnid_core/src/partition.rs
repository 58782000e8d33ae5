//! Partition entity
//!
//! A fixed-capacity buffer holding one partition of `n`. Generators own a
//! single `Partition` per run, mutate it in place, and lend it to a
//! [`Visitor`] after every step that produces a new partition.

use std::fmt;

/// Largest integer that can be partitioned.
pub const MAX_N: usize = 200;

/// Length of the part buffer (one slot of headroom over `MAX_N` parts).
pub const CAPACITY: usize = MAX_N + 1;

/// One partition of `n`, stored as the prefix `parts[..len]` of a fixed buffer.
///
/// Part order is decided by the generator (ascending or descending). Slots
/// past `len` are scratch space for the generator and carry no meaning.
#[derive(Clone)]
pub struct Partition {
    pub(crate) n: u32,
    pub(crate) len: usize,
    pub(crate) parts: [u32; CAPACITY],
}

impl Partition {
    /// Empty partition of `n` with a zeroed buffer.
    pub fn new(n: u32) -> Self {
        Self::filled(n, 0)
    }

    /// Empty partition of `n` with every buffer slot set to `value`.
    pub fn filled(n: u32, value: u32) -> Self {
        Self {
            n,
            len: 0,
            parts: [value; CAPACITY],
        }
    }

    /// Build a partition by copying `parts`; `n` is their sum.
    ///
    /// # Panics
    /// If more than `CAPACITY` parts are given.
    pub fn from_parts(parts: &[u32]) -> Self {
        assert!(parts.len() <= CAPACITY, "partition exceeds buffer capacity");
        let mut p = Self::new(parts.iter().sum());
        p.parts[..parts.len()].copy_from_slice(parts);
        p.len = parts.len();
        p
    }

    /// The partitioned integer
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The parts in generation order
    pub fn parts(&self) -> &[u32] {
        &self.parts[..self.len]
    }

    pub fn sum(&self) -> u32 {
        self.parts().iter().sum()
    }

    /// Parts sum to `n` and every part is positive.
    pub fn is_valid(&self) -> bool {
        self.len <= CAPACITY && self.sum() == self.n && self.parts().iter().all(|&a| a >= 1)
    }

    pub fn is_ascending(&self) -> bool {
        self.parts().windows(2).all(|w| w[0] <= w[1])
    }

    pub fn is_descending(&self) -> bool {
        self.parts().windows(2).all(|w| w[0] >= w[1])
    }

    /// Copy of the valid prefix
    pub fn to_vec(&self) -> Vec<u32> {
        self.parts().to_vec()
    }

    /// Copy `parts` into the front of the buffer and make them the valid prefix.
    pub(crate) fn load(&mut self, parts: &[u32]) {
        self.parts[..parts.len()].copy_from_slice(parts);
        self.len = parts.len();
    }
}

impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.parts() == other.parts()
    }
}

impl Eq for Partition {}

impl fmt::Debug for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partition")
            .field("n", &self.n)
            .field("parts", &self.parts())
            .finish()
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, a) in self.parts().iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{a}")?;
        }
        write!(f, "]")
    }
}

/// Callback invoked once per generated partition.
///
/// The partition is only borrowed for the duration of the call; copy it
/// (`clone` or [`Partition::to_vec`]) to keep it.
pub trait Visitor {
    fn visit(&mut self, partition: &Partition);
}

impl<F: FnMut(&Partition)> Visitor for F {
    fn visit(&mut self, partition: &Partition) {
        self(partition)
    }
}
