//! Error types for the partition identity core

use thiserror::Error;

use crate::generate::Algorithm;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot invert a q-series with zero constant term")]
    ZeroConstantTerm,

    #[error("q-series with constant term {constant} has no integer inverse")]
    NotInvertible { constant: i64 },

    #[error("congruence spec needs {modulus} exponents, got {actual}")]
    InvalidCongruence { modulus: usize, actual: usize },

    #[error("n = {n} is outside the supported range 0..={max}")]
    OutOfRange { n: i64, max: i64 },

    #[error("verifier needs at least one worker thread")]
    NoWorkers,

    #[error("algorithm {0} does not generate ascending partitions")]
    UnorderedAlgorithm(Algorithm),

    #[error("failed to spawn worker thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),

    #[error("worker thread {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown identity: {0}")]
    UnknownIdentity(String),
}

pub type Result<T> = std::result::Result<T, Error>;
