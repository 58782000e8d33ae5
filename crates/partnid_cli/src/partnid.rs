//! `partnid [show N | verify N | identities | help]`
//!
//! Checks a partition identity from the catalog: `show` lists the
//! partitions counted on the sum side of one N, `verify` tabulates both
//! sides for every n up to N on a pool of worker threads.

use std::io::{self, Write};

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use partnid_core::{
    Algorithm, Identity, Partition, Row, VerificationResult, Verifier, VerifyConfig, DEFAULT_MAX_N,
};
use thiserror::Error;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "partnid")]
#[command(about = "Check partition identities")]
#[command(version)]
pub struct Cli {
    /// Identity to check (see `partnid identities`)
    #[arg(long, global = true, default_value = "new-06")]
    pub identity: Identity,

    /// Number of worker threads for `verify`
    #[arg(long, global = true, default_value_t = 8)]
    pub threads: usize,

    /// Partition generator (must produce ascending parts)
    #[arg(long, global = true, default_value = "merca3")]
    pub algorithm: Algorithm,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the sum side for N (0-199)
    Show {
        #[arg(allow_hyphen_values = true, allow_negative_numbers = true)]
        n: String,

        /// Only print the summary line
        #[arg(long, short)]
        quiet: bool,
    },

    /// Verify the identity up to N (0-199)
    Verify {
        #[arg(allow_hyphen_values = true, allow_negative_numbers = true)]
        n: String,
    },

    /// List the known identities
    Identities,
}

#[derive(Error, Debug)]
pub enum PartnidError {
    #[error("{0}")]
    Arguments(String),

    #[error("bad argument for N: {0}")]
    Scan(String),

    #[error("N = {0} is out of range (0-{})", DEFAULT_MAX_N)]
    OutOfRange(i64),

    #[error(transparent)]
    Verification(#[from] partnid_core::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl PartnidError {
    pub fn exit_code(&self) -> i32 {
        match self {
            PartnidError::Arguments(_) => 32,
            PartnidError::Scan(_) => 34,
            PartnidError::OutOfRange(_) => 35,
            PartnidError::Verification(_) | PartnidError::Io(_) => 36,
        }
    }
}

/// Exit code for a failed `clap` parse. Help and version requests succeed;
/// an unrecognized subcommand is the only parse failure with its own code.
pub fn clap_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        ErrorKind::InvalidSubcommand => 33,
        _ => 32,
    }
}

fn parse_n(raw: &str) -> Result<i32, PartnidError> {
    let n: i64 = raw
        .trim()
        .parse()
        .map_err(|_| PartnidError::Scan(raw.to_string()))?;
    if n < 0 || n > i64::from(DEFAULT_MAX_N) {
        return Err(PartnidError::OutOfRange(n));
    }
    Ok(n as i32)
}

impl Cli {
    pub fn verifier(&self) -> Result<Verifier, PartnidError> {
        let config = VerifyConfig {
            threads: self.threads,
            algorithm: self.algorithm,
            ..Default::default()
        };
        Verifier::new(config).map_err(|e| PartnidError::Arguments(e.to_string()))
    }
}

/// Execute the parsed command, writing the report to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), PartnidError> {
    match &cli.command {
        Command::Identities => write_catalog(out)?,
        Command::Show { n, quiet } => {
            let n = parse_n(n)?;
            let identity = cli.identity;
            let verifier = cli.verifier()?;
            debug!(n, %identity, "show: entering");
            let mut failure: Option<io::Error> = None;
            let row = verifier.show(n, &identity.filter(), &identity.congruence(), |p: &Partition| {
                if !*quiet && failure.is_none() {
                    if let Err(e) = writeln!(out, "{p}") {
                        failure = Some(e);
                    }
                }
            })?;
            if let Some(e) = failure {
                return Err(e.into());
            }
            if !*quiet {
                writeln!(out)?;
            }
            write_show_line(out, &row)?;
        }
        Command::Verify { n } => {
            let n = parse_n(n)?;
            let identity = cli.identity;
            let verifier = cli.verifier()?;
            let result = verifier.verify_identity(n, identity)?;
            write_table(out, &result)?;
            write_summary(out, identity, &result)?;
        }
    }
    Ok(())
}

pub fn write_show_line<W: Write>(out: &mut W, row: &Row) -> io::Result<()> {
    writeln!(
        out,
        "n={}  s(n)={}  p(n)={}  diff={}",
        row.n, row.sum, row.product, row.diff
    )
}

/// Comparison table; rows where the sides differ are marked `**`.
pub fn write_table<W: Write>(out: &mut W, result: &VerificationResult) -> io::Result<()> {
    writeln!(out, "  {:>3} {:>13} {:>13} {:>13}", "n", "s(n)", "p(n)", "diff")?;
    writeln!(out, "{}", "=".repeat(47))?;
    for row in result.rows() {
        let marker = if row.matches() { "  " } else { "**" };
        writeln!(
            out,
            "{marker}{:>3} {:>13} {:>13} {:>13}",
            row.n, row.sum, row.product, row.diff
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, identity: Identity, result: &VerificationResult) -> io::Result<()> {
    writeln!(out)?;
    match result.first_discrepancy() {
        None => writeln!(out, "{identity}: holds for all n <= {}", result.n_max),
        Some(row) => writeln!(
            out,
            "{identity}: fails, first discrepancy at n={} ({} of {} rows differ)",
            row.n,
            result.discrepancies().len(),
            result.n_max + 1
        ),
    }
}

pub fn write_catalog<W: Write>(out: &mut W) -> io::Result<()> {
    for identity in Identity::ALL {
        writeln!(
            out,
            "{:<8} {:<16} {}",
            identity.name(),
            identity.expected().to_string(),
            identity.description()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("partnid").chain(args.iter().copied()))
    }

    fn output(args: &[&str]) -> String {
        let cli = parse(args).unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn exit_code(args: &[&str]) -> i32 {
        match parse(args) {
            Err(err) => clap_exit_code(&err),
            Ok(cli) => run(&cli, &mut Vec::new()).map_or_else(|e| e.exit_code(), |_| 0),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["verify", "10"]).unwrap();
        assert_eq!(cli.identity, Identity::New06);
        assert_eq!(cli.threads, 8);
        assert_eq!(cli.algorithm, Algorithm::Merca3);
    }

    #[test]
    fn test_verify_table() {
        let text = output(&["--threads", "2", "verify", "5"]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "    n          s(n)          p(n)          diff");
        assert_eq!(lines[1], "=".repeat(47));
        assert_eq!(lines[2], "    0             1             1             0");
        assert_eq!(lines[7], "    5             5             5             0");
        assert_eq!(lines[9], "new-06: holds for all n <= 5");
    }

    #[test]
    fn test_verify_marks_discrepancy() {
        let text = output(&["verify", "31", "--identity", "new-03"]);
        let marked: Vec<&str> = text.lines().filter(|l| l.starts_with("**")).collect();
        assert_eq!(marked, vec!["** 31          1397          1396             1"]);
        assert!(text.contains("new-03: fails, first discrepancy at n=31"));
    }

    #[test]
    fn test_show() {
        let text = output(&["show", "4"]);
        assert_eq!(text, "[1, 1, 2]\n[1, 3]\n[2, 2]\n[4]\n\nn=4  s(n)=4  p(n)=4  diff=0\n");
        let quiet = output(&["show", "--quiet", "4"]);
        assert_eq!(quiet, "n=4  s(n)=4  p(n)=4  diff=0\n");
    }

    #[test]
    fn test_identities() {
        let text = output(&["identities"]);
        assert_eq!(text.lines().count(), Identity::ALL.len());
        assert!(text.contains("new-03   fails at n=31"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&[]), 32);
        assert_eq!(exit_code(&["show"]), 32);
        assert_eq!(exit_code(&["bogus", "3"]), 33);
        assert_eq!(exit_code(&["verify", "ten"]), 34);
        assert_eq!(exit_code(&["verify", "200"]), 35);
        assert_eq!(exit_code(&["show", "-1"]), 35);
        assert_eq!(exit_code(&["--identity", "new-99", "verify", "3"]), 32);
        assert_eq!(exit_code(&["--algorithm", "merca9", "verify", "3"]), 32);
        assert_eq!(exit_code(&["--algorithm", "zs1", "verify", "3"]), 32);
        assert_eq!(exit_code(&["--threads", "0", "verify", "3"]), 32);
        assert_eq!(exit_code(&["verify", "3"]), 0);
        assert_eq!(exit_code(&["--help"]), 0);
    }
}
