//! `genpartn ALGORITHM ACTION N`
//!
//! Enumerates every partition of N with one of the generators and prints
//! the count, optionally listing each partition.

use std::io::{self, Write};
use std::str::FromStr;

use clap::error::ErrorKind;
use clap::Parser;
use partnid_core::{Algorithm, Partition, DEFAULT_MAX_N};
use thiserror::Error;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "genpartn")]
#[command(about = "Generate all partitions of N (0-199)")]
#[command(version)]
pub struct Args {
    /// Algorithm to generate partitions (rule_asc, rule_desc, accel_asc,
    /// accel_desc, merca1, merca2, merca3, zs1, or zs2)
    pub algorithm: String,

    /// Action for each partition (none, or print)
    pub action: String,

    /// The number to be partitioned
    #[arg(allow_hyphen_values = true, allow_negative_numbers = true)]
    pub n: String,
}

/// What to do with each generated partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Print,
}

impl FromStr for Action {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, UsageError> {
        match s {
            "none" => Ok(Action::None),
            "print" => Ok(Action::Print),
            other => Err(UsageError::InvalidAction(other.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Bad argument for N: {0}")]
    BadN(String),

    #[error("Invalid value for N: {0} (expected 0-{})", DEFAULT_MAX_N)]
    NOutOfRange(i64),

    #[error("Invalid ALGORITHM: {0}")]
    InvalidAlgorithm(String),

    #[error("Invalid ACTION: {0}")]
    InvalidAction(String),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl UsageError {
    pub fn exit_code(&self) -> i32 {
        match self {
            UsageError::Io(_) => 1,
            UsageError::BadN(_) | UsageError::NOutOfRange(_) => 2,
            UsageError::InvalidAlgorithm(_) => 3,
            UsageError::InvalidAction(_) => 4,
        }
    }
}

/// Exit code for a failed `clap` parse. Help and version requests succeed.
pub fn clap_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Validated command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub algorithm: Algorithm,
    pub action: Action,
    pub n: i32,
}

impl Args {
    /// Checks arguments in command-line order: algorithm, action, then N.
    pub fn validate(&self) -> Result<Request, UsageError> {
        let algorithm = self
            .algorithm
            .parse::<Algorithm>()
            .map_err(|_| UsageError::InvalidAlgorithm(self.algorithm.clone()))?;
        let action = self.action.parse::<Action>()?;
        let n: i64 = self
            .n
            .trim()
            .parse()
            .map_err(|_| UsageError::BadN(self.n.clone()))?;
        if n < 0 || n > i64::from(DEFAULT_MAX_N) {
            return Err(UsageError::NOutOfRange(n));
        }
        Ok(Request {
            algorithm,
            action,
            n: n as i32,
        })
    }
}

/// Print the report for `request` and return the partition count.
pub fn run<W: Write>(request: &Request, out: &mut W) -> Result<u64, UsageError> {
    debug!(algorithm = %request.algorithm, n = request.n, "genpartn: entering");
    writeln!(out, "n = {}", request.n)?;
    let count = match request.action {
        Action::None => request.algorithm.count(request.n),
        Action::Print => {
            writeln!(out)?;
            let mut failure: Option<io::Error> = None;
            let count = request.algorithm.generate(request.n, &mut |p: &Partition| {
                if failure.is_none() {
                    if let Err(e) = writeln!(out, "{p}") {
                        failure = Some(e);
                    }
                }
            });
            if let Some(e) = failure {
                return Err(e.into());
            }
            writeln!(out)?;
            count
        }
    };
    writeln!(out, "p[{}] = {}", request.n, count)?;
    Ok(count)
}
