//! Errors raised by the assertion helpers and command-line tools.

use std::path::PathBuf;

use structeq_util::ValueError;
use thiserror::Error;

use crate::listing::SortOption;
use crate::timing::BudgetViolation;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid budget file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid price label {0:?}")]
    InvalidPrice(String),

    #[error("unknown sort option {0:?} (expected az, za, lohi or hilo)")]
    UnknownSortOption(String),

    #[error("unknown budget {0:?}")]
    UnknownBudget(String),

    #[error("listing is not sorted by {option}: position {index} shows {actual}, expected {expected}")]
    NotSorted {
        option: SortOption,
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("no response times were recorded")]
    EmptySample,

    #[error("{}", format_violations(.0))]
    BudgetExceeded(Vec<BudgetViolation>),

    #[error("{0}")]
    Usage(String),
}

fn format_violations(violations: &[BudgetViolation]) -> String {
    let parts: Vec<String> = violations.iter().map(ToString::to_string).collect();
    format!("budget exceeded: {}", parts.join("; "))
}
