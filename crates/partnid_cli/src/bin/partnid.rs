//! Check partition identities (multithreaded).
//!
//! ```bash
//! partnid [--identity NAME] [--threads K] [show N | verify N | identities | help]
//! ```

use std::io::{self, BufWriter, Write};
use std::process;

use clap::{CommandFactory, Parser};
use partnid_cli::partnid::{self, Cli};

fn main() {
    partnid_cli::init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = partnid::clap_exit_code(&err);
            let _ = err.print();
            process::exit(code);
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = partnid::run(&cli, &mut out);
    let flushed = out.flush();

    if let Err(err) = result {
        eprintln!("[Error] {err}\n");
        eprintln!("{}", Cli::command().render_usage());
        process::exit(err.exit_code());
    }
    if let Err(err) = flushed {
        eprintln!("[Error] failed to write output: {err}");
        process::exit(36);
    }
}
