//! `timing-report` — summarize response times and check them against a budget.
//!
//! Usage:
//!   timing-report <budget> [budgets.toml]
//!
//! Samples are read from stdin as a JSON array of milliseconds. Without a
//! budget file the built-in budgets apply.

use std::io::{self, Read};
use std::process::ExitCode;

use structeq::cli::{init_logging, timing_report};
use structeq::{Budgets, CheckError};
use tracing::{error, info};

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(budget) = args.first() else {
        error!("First argument must be a budget name.");
        return ExitCode::from(2);
    };

    let budgets = match args.get(1) {
        Some(path) => match Budgets::load(path) {
            Ok(budgets) => budgets,
            Err(e) => {
                error!("{e}");
                return ExitCode::from(2);
            }
        },
        None => Budgets::builtin(),
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        error!("{e}");
        return ExitCode::from(2);
    }

    match timing_report(&buf, budget, &budgets) {
        Ok(report) => {
            info!(budget = %budget, warnings = report.warnings.len(), "within budget");
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e @ CheckError::BudgetExceeded(_)) => {
            println!("{e}");
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}
