//! Partition Identity Core Library
//!
//! Tools for discovering and checking Rogers-Ramanujan type partition
//! identities by brute force.
//!
//! # Overview
//!
//! An identity equates a *sum side*, the number of partitions of `n`
//! satisfying some gap condition, with a *product side*, the q^n
//! coefficient of an infinite product over allowed part sizes. This crate
//! enumerates partitions with fast in-place generators, counts those a
//! filter accepts, expands the product as a truncated q-series, and
//! compares the two for every `n` up to a bound.
//!
//! # Key Components
//!
//! - [`partition`] - Fixed-capacity partition buffer and the visitor interface
//! - [`generate`] - Nine partition generation algorithms
//! - [`qseries`] - Truncated integer power series
//! - [`congruence`] - Congruence products (the product side)
//! - [`filter`] - Gap-condition predicates (the sum side)
//! - [`identity`] - Catalog of conjectured identities
//! - [`verify`] - Multithreaded verifier

pub mod error;
pub mod partition;
pub mod generate;
pub mod qseries;
pub mod congruence;
pub mod filter;
pub mod identity;
pub mod verify;

pub use error::{Error, Result};
pub use partition::{Partition, Visitor, MAX_N};
pub use generate::{Algorithm, Family, Order, Sequence};
pub use qseries::{PowerSeries, MAX_ORDER};
pub use congruence::CongruenceSpec;
pub use filter::{AcceptAll, Distance, GapFilter, GapRule, PartitionFilter};
pub use identity::{Identity, Status};
pub use verify::{count_accepted, Row, VerificationResult, Verifier, VerifyConfig, VerifyStats, DEFAULT_MAX_N};
