//! Generate partitions.
//!
//! ```bash
//! genpartn ALGORITHM ACTION N
//! ```

use std::io::{self, BufWriter, Write};
use std::process;

use clap::{CommandFactory, Parser};
use partnid_cli::genpartn::{self, Args};

fn main() {
    partnid_cli::init_logging();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = genpartn::clap_exit_code(&err);
            let _ = err.print();
            process::exit(code);
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = args
        .validate()
        .and_then(|request| genpartn::run(&request, &mut out));
    let flushed = out.flush();

    if let Err(err) = result {
        eprintln!("[Error] {err}\n");
        eprintln!("{}", Args::command().render_help());
        process::exit(err.exit_code());
    }
    if let Err(err) = flushed {
        eprintln!("[Error] failed to write output: {err}");
        process::exit(1);
    }
}
