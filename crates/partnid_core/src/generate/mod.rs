//! Partition generators
//!
//! Nine in-place algorithms that visit every partition of `n` exactly once:
//!
//! - [`kelleher`] - rule_asc, rule_desc, accel_asc, accel_desc
//! - [`merca`] - merca1, merca2, merca3 (ascending compositions)
//! - [`zoghbi`] - zs1, zs2 (descending compositions)
//!
//! All of them keep the partition in a single [`Partition`] buffer and walk
//! a frontier cursor back and forth over it instead of recursing. The cursor
//! always bounds the valid prefix, so the emitted length is read straight
//! off it.
//!
//! # References
//! - J. Kelleher, "Generating partitions as ascending compositions", PhD
//!   thesis, University College Cork, 2006.
//! - J. Kelleher and B. O'Sullivan, "Generating all partitions: a comparison
//!   of two encodings", arXiv:0909.2331, 2009.
//! - M. Merca, "Fast algorithms for generating ascending compositions",
//!   J Math Model Algor 11 (2012) 89-104.
//! - A. Zoghbi and I. Stojmenovic, "Fast algorithms for generating integer
//!   partitions", Intern J Computer Math 70 (1998) 319-332.

pub mod kelleher;
pub mod merca;
pub mod zoghbi;

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::Error;
use crate::partition::{Partition, Visitor, MAX_N};

/// Order of parts inside each generated partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// a[0] <= a[1] <= ...
    Ascending,
    /// a[0] >= a[1] >= ...
    Descending,
}

/// Order in which successive partitions are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    LexIncreasing,
    LexDecreasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Kelleher,
    Merca,
    ZoghbiStojmenovic,
}

/// The partition generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    RuleAsc,
    RuleDesc,
    AccelAsc,
    AccelDesc,
    Merca1,
    Merca2,
    Merca3,
    Zs1,
    Zs2,
}

impl Algorithm {
    pub const ALL: [Algorithm; 9] = [
        Algorithm::RuleAsc,
        Algorithm::RuleDesc,
        Algorithm::AccelAsc,
        Algorithm::AccelDesc,
        Algorithm::Merca1,
        Algorithm::Merca2,
        Algorithm::Merca3,
        Algorithm::Zs1,
        Algorithm::Zs2,
    ];

    /// Command-line name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::RuleAsc => "rule_asc",
            Algorithm::RuleDesc => "rule_desc",
            Algorithm::AccelAsc => "accel_asc",
            Algorithm::AccelDesc => "accel_desc",
            Algorithm::Merca1 => "merca1",
            Algorithm::Merca2 => "merca2",
            Algorithm::Merca3 => "merca3",
            Algorithm::Zs1 => "zs1",
            Algorithm::Zs2 => "zs2",
        }
    }

    pub fn family(self) -> Family {
        match self {
            Algorithm::RuleAsc | Algorithm::RuleDesc | Algorithm::AccelAsc | Algorithm::AccelDesc => {
                Family::Kelleher
            }
            Algorithm::Merca1 | Algorithm::Merca2 | Algorithm::Merca3 => Family::Merca,
            Algorithm::Zs1 | Algorithm::Zs2 => Family::ZoghbiStojmenovic,
        }
    }

    pub fn order(self) -> Order {
        match self {
            Algorithm::RuleAsc
            | Algorithm::AccelAsc
            | Algorithm::Merca1
            | Algorithm::Merca2
            | Algorithm::Merca3 => Order::Ascending,
            Algorithm::RuleDesc | Algorithm::AccelDesc | Algorithm::Zs1 | Algorithm::Zs2 => {
                Order::Descending
            }
        }
    }

    pub fn sequence(self) -> Sequence {
        match self {
            Algorithm::RuleDesc | Algorithm::AccelDesc | Algorithm::Zs1 => Sequence::LexDecreasing,
            _ => Sequence::LexIncreasing,
        }
    }

    /// Visit every partition of `n` and return how many were visited.
    ///
    /// `n < 0` visits nothing and returns 0; `n == 0` visits the empty
    /// partition once.
    ///
    /// # Panics
    /// If `n > MAX_N`. Callers are expected to range-check first.
    pub fn generate<V: Visitor + ?Sized>(self, n: i32, visitor: &mut V) -> u64 {
        if n < 0 {
            return 0;
        }
        assert!(n as usize <= MAX_N, "n = {n} exceeds MAX_N = {MAX_N}");
        let n = n as u32;
        if n == 0 {
            visitor.visit(&Partition::new(0));
            return 1;
        }
        match self {
            Algorithm::RuleAsc => kelleher::rule_asc(n, visitor),
            Algorithm::RuleDesc => kelleher::rule_desc(n, visitor),
            Algorithm::AccelAsc => kelleher::accel_asc(n, visitor),
            Algorithm::AccelDesc => kelleher::accel_desc(n, visitor),
            Algorithm::Merca1 => merca::merca1(n, visitor),
            Algorithm::Merca2 => merca::merca2(n, visitor),
            Algorithm::Merca3 => merca::merca3(n, visitor),
            Algorithm::Zs1 => zoghbi::zs1(n, visitor),
            Algorithm::Zs2 => zoghbi::zs2(n, visitor),
        }
    }

    /// Count the partitions of `n` without looking at them.
    pub fn count(self, n: i32) -> u64 {
        self.generate(n, &mut |_: &Partition| {})
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

/// Working buffer shared by the generators: the partition being built plus
/// the running visit count.
pub(crate) struct Buffer {
    partition: Partition,
    count: u64,
}

impl Buffer {
    pub(crate) fn new(n: u32, fill: u32) -> Self {
        Self {
            partition: Partition::filled(n, fill),
            count: 0,
        }
    }

    /// Publish `parts[..len]` to the visitor.
    #[inline]
    pub(crate) fn emit<V: Visitor + ?Sized>(&mut self, len: usize, visitor: &mut V) {
        self.partition.len = len;
        debug_assert!(
            self.partition.is_valid(),
            "generator emitted an invalid partition: {:?}",
            self.partition
        );
        visitor.visit(&self.partition);
        self.count += 1;
    }

    /// Copy `parts` into the buffer and publish them.
    #[inline]
    pub(crate) fn emit_copy<V: Visitor + ?Sized>(&mut self, parts: &[u32], visitor: &mut V) {
        self.partition.load(parts);
        self.emit(parts.len(), visitor);
    }

    pub(crate) fn count(&self) -> u64 {
        self.count
    }
}

impl Index<usize> for Buffer {
    type Output = u32;

    #[inline]
    fn index(&self, i: usize) -> &u32 {
        &self.partition.parts[i]
    }
}

impl IndexMut<usize> for Buffer {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut u32 {
        &mut self.partition.parts[i]
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// p(0..=max) by Euler's pentagonal number recurrence.
    fn partition_numbers(max: usize) -> Vec<u64> {
        let mut p = vec![0i64; max + 1];
        p[0] = 1;
        for n in 1..=max {
            let mut total = 0i64;
            let mut k = 1i64;
            loop {
                let g1 = (k * (3 * k - 1) / 2) as usize;
                if g1 > n {
                    break;
                }
                let sign = if k % 2 == 1 { 1 } else { -1 };
                total += sign * p[n - g1];
                let g2 = (k * (3 * k + 1) / 2) as usize;
                if g2 <= n {
                    total += sign * p[n - g2];
                }
                k += 1;
            }
            p[n] = total;
        }
        p.into_iter().map(|v| v as u64).collect()
    }

    fn collect(algorithm: Algorithm, n: i32) -> Vec<Vec<u32>> {
        let mut out = Vec::new();
        let count = algorithm.generate(n, &mut |p: &Partition| out.push(p.to_vec()));
        assert_eq!(count as usize, out.len());
        out
    }

    #[test]
    fn test_reference_table() {
        let p = partition_numbers(200);
        assert_eq!(&p[..11], &[1, 1, 2, 3, 5, 7, 11, 15, 22, 30, 42]);
        assert_eq!(p[100], 190_569_292);
        assert_eq!(p[200], 3_972_999_029_388);
    }

    #[test]
    fn test_counts_match_partition_numbers() {
        let p = partition_numbers(40);
        for algorithm in Algorithm::ALL {
            for n in 0..=40 {
                assert_eq!(
                    algorithm.count(n),
                    p[n as usize],
                    "{algorithm} miscounted n = {n}"
                );
            }
        }
    }

    #[test]
    fn test_known_values() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.count(0), 1);
            assert_eq!(algorithm.count(1), 1);
            assert_eq!(algorithm.count(5), 7);
            assert_eq!(algorithm.count(10), 42);
        }
    }

    #[test]
    fn test_negative_and_zero() {
        for algorithm in Algorithm::ALL {
            let mut visits = 0;
            assert_eq!(algorithm.generate(-1, &mut |_: &Partition| visits += 1), 0);
            assert_eq!(visits, 0);

            let seen = collect(algorithm, 0);
            assert_eq!(seen, vec![Vec::<u32>::new()]);
        }
    }

    #[test]
    fn test_same_set_across_algorithms() {
        for n in 0..=24 {
            let reference: BTreeSet<Vec<u32>> = collect(Algorithm::RuleAsc, n).into_iter().collect();
            for algorithm in Algorithm::ALL {
                let seen = collect(algorithm, n);
                let normalized: BTreeSet<Vec<u32>> = seen
                    .iter()
                    .map(|parts| {
                        let mut sorted = parts.clone();
                        sorted.sort_unstable();
                        sorted
                    })
                    .collect();
                assert_eq!(normalized.len(), seen.len(), "{algorithm} repeated a partition of {n}");
                assert_eq!(normalized, reference, "{algorithm} differs for n = {n}");
            }
        }
    }

    #[test]
    fn test_parts_valid_and_ordered() {
        for algorithm in Algorithm::ALL {
            for n in 1..=20 {
                algorithm.generate(n, &mut |p: &Partition| {
                    assert!(p.is_valid(), "{algorithm}: {p:?}");
                    assert_eq!(p.n(), n as u32);
                    match algorithm.order() {
                        Order::Ascending => assert!(p.is_ascending(), "{algorithm}: {p}"),
                        Order::Descending => assert!(p.is_descending(), "{algorithm}: {p}"),
                    }
                });
            }
        }
    }

    #[test]
    fn test_visit_sequence() {
        for algorithm in Algorithm::ALL {
            let seen = collect(algorithm, 15);
            for w in seen.windows(2) {
                match algorithm.sequence() {
                    Sequence::LexIncreasing => assert!(w[0] < w[1], "{algorithm}: {:?} {:?}", w[0], w[1]),
                    Sequence::LexDecreasing => assert!(w[0] > w[1], "{algorithm}: {:?} {:?}", w[0], w[1]),
                }
            }
        }
    }

    #[test]
    fn test_first_partitions_of_five() {
        assert_eq!(
            collect(Algorithm::Merca3, 5),
            vec![
                vec![1, 1, 1, 1, 1],
                vec![1, 1, 1, 2],
                vec![1, 1, 3],
                vec![1, 2, 2],
                vec![1, 4],
                vec![2, 3],
                vec![5],
            ]
        );
        assert_eq!(
            collect(Algorithm::Zs1, 5),
            vec![
                vec![5],
                vec![4, 1],
                vec![3, 2],
                vec![3, 1, 1],
                vec![2, 2, 1],
                vec![2, 1, 1, 1],
                vec![1, 1, 1, 1, 1],
            ]
        );
    }

    /// Unwind payload that ends an enumeration after a fixed number of visits.
    struct Stop;

    /// The first `limit` partitions of `n`. Generators have no early exit,
    /// so the visitor unwinds with [`Stop`]; any other panic fails the test.
    fn first_partitions(algorithm: Algorithm, n: i32, limit: usize) -> Vec<Vec<u32>> {
        let mut seen = Vec::new();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            algorithm.generate(n, &mut |p: &Partition| {
                seen.push(p.to_vec());
                if seen.len() == limit {
                    std::panic::panic_any(Stop);
                }
            });
        }));
        if let Err(payload) = outcome {
            if !payload.is::<Stop>() {
                std::panic::resume_unwind(payload);
            }
        }
        seen
    }

    #[test]
    fn test_largest_n_fits_buffer() {
        // p(200) is far too many to enumerate; instead check the deepest
        // buffer use, which these generators reach on their first visits.
        let deepest_first = [
            Algorithm::RuleAsc,
            Algorithm::AccelAsc,
            Algorithm::Merca1,
            Algorithm::Merca2,
            Algorithm::Merca3,
            Algorithm::Zs2,
        ];
        for algorithm in deepest_first {
            let seen = first_partitions(algorithm, MAX_N as i32, 3);
            assert_eq!(seen.len(), 3, "{algorithm}");
            assert_eq!(seen[0], vec![1; MAX_N], "{algorithm}");
            for p in &seen {
                assert_eq!(p.iter().sum::<u32>(), MAX_N as u32, "{algorithm}");
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_above_max_n_panics() {
        Algorithm::RuleAsc.count(MAX_N as i32 + 1);
    }

    #[test]
    fn test_parse_names() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert!("merca4".parse::<Algorithm>().is_err());
    }

    #[test]
    #[ignore]
    fn test_counts_up_to_sixty() {
        let p = partition_numbers(60);
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.count(60), p[60]);
        }
    }
}
