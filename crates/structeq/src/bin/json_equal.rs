//! `json-equal` — compare two JSON documents structurally.
//!
//! Usage:
//!   json-equal <a.json> <b.json>
//!
//! Prints `equal` or `not equal`. Exits 0 when equal, 1 when not, 2 on error.

use std::process::ExitCode;

use structeq::cli::{compare_documents, init_logging, read_file};
use structeq::CheckError;
use tracing::error;

fn run() -> Result<bool, CheckError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [a, b] = args.as_slice() else {
        return Err(CheckError::Usage("usage: json-equal <a.json> <b.json>".into()));
    };
    compare_documents(&read_file(a)?, &read_file(b)?)
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(true) => {
            println!("equal");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("not equal");
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}
