//! Sum-side restrictions on partitions
//!
//! A filter decides which partitions are counted on the sum side of an
//! identity. The family used by the catalog are gap conditions: rules on the
//! difference between parts at distance one or two, gated on the residue of
//! the sum over the window spanning them.
//!
//! Filters read parts in ascending order and are shared by reference across
//! verifier workers, so they must be `Sync` and free of interior state.

use std::fmt;

use crate::partition::Partition;

/// Predicate over partitions
pub trait PartitionFilter: Sync {
    fn accept(&self, partition: &Partition) -> bool;
}

impl<F: Fn(&Partition) -> bool + Sync> PartitionFilter for F {
    fn accept(&self, partition: &Partition) -> bool {
        self(partition)
    }
}

/// Counts every partition.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PartitionFilter for AcceptAll {
    fn accept(&self, _partition: &Partition) -> bool {
        true
    }
}

/// Distance between the two parts a rule compares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    /// Adjacent parts, window of two
    One,
    /// Parts two apart, window of three
    Two,
}

impl Distance {
    pub fn get(self) -> usize {
        match self {
            Distance::One => 1,
            Distance::Two => 2,
        }
    }
}

/// Reject when `a[i] - a[i-d]` is one of `differences` and the window sum
/// `a[i-d] + ... + a[i]` is `residue` mod `modulus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapRule {
    pub distance: Distance,
    pub differences: Vec<u32>,
    pub modulus: u32,
    pub residue: u32,
}

impl GapRule {
    pub fn new(distance: Distance, differences: &[u32], modulus: u32, residue: u32) -> Self {
        debug_assert!(modulus > 0 && residue < modulus);
        Self {
            distance,
            differences: differences.to_vec(),
            modulus,
            residue,
        }
    }

    #[inline]
    fn forbids(&self, difference: i64, window_sum: u32) -> bool {
        window_sum % self.modulus == self.residue
            && self.differences.iter().any(|&d| i64::from(d) == difference)
    }
}

impl fmt::Display for GapRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.distance.get();
        write!(f, "d{d}")?;
        match self.differences.as_slice() {
            [single] => write!(f, "={single}")?,
            many => {
                write!(f, " in {{")?;
                for (i, v) in many.iter().enumerate() {
                    if i != 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "}}")?;
            }
        }
        write!(f, " & s{}≡{} (mod {})", d + 1, self.residue, self.modulus)
    }
}

/// A set of gap rules plus an optional forbidden opening.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GapFilter {
    pub rules: Vec<GapRule>,
    /// Partitions beginning with these parts are rejected outright.
    pub forbidden_prefix: Vec<u32>,
}

impl GapFilter {
    pub fn new(rules: Vec<GapRule>) -> Self {
        Self {
            rules,
            forbidden_prefix: Vec::new(),
        }
    }

    pub fn with_forbidden_prefix(mut self, prefix: &[u32]) -> Self {
        self.forbidden_prefix = prefix.to_vec();
        self
    }
}

impl PartitionFilter for GapFilter {
    fn accept(&self, partition: &Partition) -> bool {
        let parts = partition.parts();
        if !self.forbidden_prefix.is_empty() && parts.starts_with(&self.forbidden_prefix) {
            return false;
        }
        // prevK = a[i-K]; s2 and s3 are running sums over the windows ending at i
        let (mut prev1, mut prev2, mut prev3) = (0u32, 0u32, 0u32);
        let (mut s2, mut s3) = (0u32, 0u32);
        for (i, &cur) in parts.iter().enumerate() {
            s2 = s2 + cur - prev2;
            s3 = s3 + cur - prev3;
            for rule in &self.rules {
                let hit = match rule.distance {
                    Distance::One => i >= 1 && rule.forbids(i64::from(cur) - i64::from(prev1), s2),
                    Distance::Two => i >= 2 && rule.forbids(i64::from(cur) - i64::from(prev2), s3),
                };
                if hit {
                    return false;
                }
            }
            prev3 = prev2;
            prev2 = prev1;
            prev1 = cur;
        }
        true
    }
}

impl fmt::Display for GapFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rules.is_empty() && self.forbidden_prefix.is_empty() {
            return f.write_str("no restriction");
        }
        for (i, rule) in self.rules.iter().enumerate() {
            if i != 0 {
                f.write_str("; ")?;
            }
            write!(f, "{rule}")?;
        }
        if !self.forbidden_prefix.is_empty() {
            if !self.rules.is_empty() {
                f.write_str("; ")?;
            }
            write!(f, "IC {:?}", self.forbidden_prefix)?;
        }
        Ok(())
    }
}
