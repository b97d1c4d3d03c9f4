//! `check-sorted` — verify a product listing against a sort option.
//!
//! Usage:
//!   check-sorted <az|za|lohi|hilo>
//!
//! The listing is read from stdin as a JSON array of `{"name", "price"}`
//! objects; prices may be numbers or labels such as `"$29.99"`.

use std::io::{self, Read};
use std::process::ExitCode;

use structeq::cli::{check_sorted, init_logging};
use structeq::CheckError;
use tracing::error;

fn main() -> ExitCode {
    init_logging();

    let Some(option) = std::env::args().nth(1) else {
        error!("First argument must be a sort option (az, za, lohi, hilo).");
        return ExitCode::from(2);
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        error!("{e}");
        return ExitCode::from(2);
    }

    match check_sorted(&buf, &option) {
        Ok(option) => {
            println!("sorted: {option}");
            ExitCode::SUCCESS
        }
        Err(e @ CheckError::NotSorted { .. }) => {
            println!("{e}");
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}
