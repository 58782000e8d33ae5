//! Partition Identity CLI
//!
//! Support code for the two command-line tools:
//!
//! ```bash
//! # Enumerate partitions with a chosen algorithm
//! genpartn merca3 print 6
//!
//! # Check an identity up to N on 8 threads
//! partnid --identity new-06 verify 100
//!
//! # Show the partitions counted on the sum side
//! partnid show 12
//! ```
//!
//! Both binaries parse with `clap` but keep their own exit codes, so each
//! module here exposes the argument types, a `run` function writing the
//! report to any `Write`, and the mapping from failures to exit codes.

pub mod genpartn;
pub mod partnid;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` level; stdout is left to the reports.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
