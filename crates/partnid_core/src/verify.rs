//! Concurrent identity verifier
//!
//! Checks `s(n) == p(n)` for every `n` in `0..=N`, where `s(n)` counts the
//! partitions of `n` accepted by a filter and `p(n)` is the q^n coefficient
//! of a congruence product.
//!
//! # Execution
//!
//! ```text
//! product side  (caller thread, once)
//! sum side      worker 0 ─┐
//!               worker 1 ─┼─ fetch_sub on a shared counter claims n = N, N-1, ..., 0
//!               ...      ─┘  each claimed n is enumerated and filtered in full
//! report        after every worker has been joined
//! ```
//!
//! Large `n` are claimed first so the expensive work is spread out before
//! the cheap tail.

use std::sync::atomic::{AtomicI64, Ordering};
use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use crate::congruence::CongruenceSpec;
use crate::error::{Error, Result};
use crate::filter::PartitionFilter;
use crate::generate::{Algorithm, Order};
use crate::identity::Identity;
use crate::partition::{Partition, MAX_N};

/// Largest `n` the command-line tools accept
pub const DEFAULT_MAX_N: i32 = MAX_N as i32 - 1;

/// Configuration for a verification run
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Number of worker threads for the sum side
    pub threads: usize,
    /// Generator used to enumerate partitions (must be ascending)
    pub algorithm: Algorithm,
    /// Upper bound on `n` accepted by this verifier
    pub max_n: i32,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            threads: 8,
            algorithm: Algorithm::Merca3,
            max_n: DEFAULT_MAX_N,
        }
    }
}

/// Statistics from a verification run
#[derive(Debug, Clone, Default)]
pub struct VerifyStats {
    pub product_time: f64,
    pub sum_time: f64,
    /// Values of n processed by each worker
    pub claimed: Vec<usize>,
}

/// One line of the comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub n: i32,
    pub sum: i64,
    pub product: i64,
    pub diff: i64,
}

impl Row {
    fn new(n: i32, sum: i64, product: i64) -> Self {
        Self {
            n,
            sum,
            product,
            diff: sum.wrapping_sub(product),
        }
    }

    pub fn matches(&self) -> bool {
        self.diff == 0
    }
}

/// Sum and product sides for `n` in `0..=n_max`
#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub n_max: i32,
    pub sum_side: Vec<i64>,
    pub product_side: Vec<i64>,
    pub stats: VerifyStats,
}

impl VerificationResult {
    /// `s(n) - p(n)`
    pub fn diff(&self, n: i32) -> i64 {
        self.row(n).diff
    }

    pub fn row(&self, n: i32) -> Row {
        let i = n as usize;
        Row::new(n, self.sum_side[i], self.product_side[i])
    }

    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..=self.n_max).map(move |n| self.row(n))
    }

    pub fn discrepancies(&self) -> Vec<Row> {
        self.rows().filter(|r| !r.matches()).collect()
    }

    pub fn first_discrepancy(&self) -> Option<Row> {
        self.rows().find(|r| !r.matches())
    }

    pub fn holds(&self) -> bool {
        self.first_discrepancy().is_none()
    }
}

/// Multithreaded sum-side/product-side comparison
pub struct Verifier {
    config: VerifyConfig,
}

impl Verifier {
    pub fn new(config: VerifyConfig) -> Result<Self> {
        if config.threads == 0 {
            return Err(Error::NoWorkers);
        }
        if config.algorithm.order() != Order::Ascending {
            return Err(Error::UnorderedAlgorithm(config.algorithm));
        }
        if config.max_n < 0 || config.max_n as usize > MAX_N {
            return Err(Error::OutOfRange {
                n: i64::from(config.max_n),
                max: MAX_N as i64,
            });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    fn check_range(&self, n: i32) -> Result<()> {
        if n < 0 || n > self.config.max_n {
            return Err(Error::OutOfRange {
                n: i64::from(n),
                max: i64::from(self.config.max_n),
            });
        }
        Ok(())
    }

    /// Compare both sides of an identity for every `n <= n_max`.
    pub fn verify<F>(&self, n_max: i32, filter: &F, congruence: &CongruenceSpec) -> Result<VerificationResult>
    where
        F: PartitionFilter + ?Sized,
    {
        self.check_range(n_max)?;
        debug!(n_max, threads = self.config.threads, algorithm = %self.config.algorithm, "verify: entering");

        let start = Instant::now();
        let product = congruence.product_side()?;
        let product_time = start.elapsed().as_secs_f64();

        let start = Instant::now();
        let slots: Vec<AtomicI64> = (0..=n_max).map(|_| AtomicI64::new(0)).collect();
        let next = AtomicI64::new(i64::from(n_max));
        let claimed = self.run_workers(&slots, &next, filter)?;
        let sum_time = start.elapsed().as_secs_f64();

        let result = VerificationResult {
            n_max,
            sum_side: slots.into_iter().map(AtomicI64::into_inner).collect(),
            product_side: product.coeffs_upto(n_max as usize + 1).to_vec(),
            stats: VerifyStats {
                product_time,
                sum_time,
                claimed,
            },
        };
        info!(
            n_max,
            holds = result.holds(),
            sum_time,
            "verification finished"
        );
        debug!(n_max, "verify: exiting");
        Ok(result)
    }

    /// Spawn the worker pool and wait for it. Each worker keeps claiming
    /// `n` from `next` until the counter goes negative.
    fn run_workers<F>(&self, slots: &[AtomicI64], next: &AtomicI64, filter: &F) -> Result<Vec<usize>>
    where
        F: PartitionFilter + ?Sized,
    {
        let algorithm = self.config.algorithm;
        thread::scope(|scope| -> Result<Vec<usize>> {
            let mut handles = Vec::with_capacity(self.config.threads);
            for worker in 0..self.config.threads {
                let handle = thread::Builder::new()
                    .name(format!("partnid-worker-{worker:02}"))
                    .spawn_scoped(scope, move || {
                        debug!(worker, "worker: entering");
                        let mut claimed = 0usize;
                        loop {
                            let n = next.fetch_sub(1, Ordering::Relaxed);
                            if n < 0 {
                                break;
                            }
                            let count = count_accepted(algorithm, n as i32, filter);
                            // join() publishes the store to the caller
                            slots[n as usize].store(count, Ordering::Relaxed);
                            claimed += 1;
                        }
                        debug!(worker, claimed, "worker: exiting");
                        claimed
                    })?;
                handles.push(handle);
            }
            // Join every handle before reporting; an unjoined panicked thread
            // makes the scope itself panic.
            let joined: Vec<_> = handles.into_iter().map(|handle| handle.join()).collect();
            joined
                .into_iter()
                .enumerate()
                .map(|(worker, outcome)| outcome.map_err(|_| Error::WorkerPanicked { worker }))
                .collect()
        })
    }

    pub fn verify_identity(&self, n_max: i32, identity: Identity) -> Result<VerificationResult> {
        self.verify(n_max, &identity.filter(), &identity.congruence())
    }

    /// Same as [`verify`](Self::verify) but enumerates on the calling thread.
    pub fn verify_sequential<F>(
        &self,
        n_max: i32,
        filter: &F,
        congruence: &CongruenceSpec,
    ) -> Result<VerificationResult>
    where
        F: PartitionFilter + ?Sized,
    {
        self.check_range(n_max)?;
        let start = Instant::now();
        let product = congruence.product_side()?;
        let product_time = start.elapsed().as_secs_f64();

        let start = Instant::now();
        let sum_side = (0..=n_max)
            .map(|n| count_accepted(self.config.algorithm, n, filter))
            .collect();
        Ok(VerificationResult {
            n_max,
            sum_side,
            product_side: product.coeffs_upto(n_max as usize + 1).to_vec(),
            stats: VerifyStats {
                product_time,
                sum_time: start.elapsed().as_secs_f64(),
                claimed: vec![n_max as usize + 1],
            },
        })
    }

    /// Sum side of a single `n`, handing every accepted partition to
    /// `on_accept` as it is found.
    pub fn show<F, V>(&self, n: i32, filter: &F, congruence: &CongruenceSpec, mut on_accept: V) -> Result<Row>
    where
        F: PartitionFilter + ?Sized,
        V: FnMut(&Partition),
    {
        self.check_range(n)?;
        debug!(n, "show: entering");
        let product = congruence.product_side()?;
        let mut sum = 0i64;
        self.config.algorithm.generate(n, &mut |p: &Partition| {
            if filter.accept(p) {
                on_accept(p);
                sum += 1;
            }
        });
        Ok(Row::new(n, sum, product[n as usize]))
    }
}

/// Number of partitions of `n` the filter accepts.
pub fn count_accepted<F>(algorithm: Algorithm, n: i32, filter: &F) -> i64
where
    F: PartitionFilter + ?Sized,
{
    let mut count = 0i64;
    algorithm.generate(n, &mut |p: &Partition| {
        if filter.accept(p) {
            count += 1;
        }
    });
    count
}
