//! Command-line tools for structural comparison and response checks.
//!
//! Provides the core logic used by the binary entry points:
//! - `json-equal`    — compare two JSON documents structurally
//! - `check-sorted`  — verify a product listing against a sort option
//! - `timing-report` — summarize response times and hold them to a budget

use std::path::Path;

use serde::Deserialize;

use structeq_util::{deep_equal, Value};

use crate::config::Budgets;
use crate::error::CheckError;
use crate::listing::{check_listing, Product, SortOption};
use crate::timing::{Report, ResponseTimes};

/// Installs the stderr log subscriber used by every binary.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a whole file, tagging failures with the path.
pub fn read_file(path: impl AsRef<Path>) -> Result<String, CheckError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_owned(),
        source,
    })
}

// ── json-equal ────────────────────────────────────────────────────────────

/// Parses a JSON document of any nesting depth.
///
/// serde_json's default limit of 128 levels is lifted; the parser grows its
/// stack on the heap instead.
pub fn parse_document(json: &str) -> Result<Value, CheckError> {
    let mut parser = serde_json::Deserializer::from_str(json);
    parser.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut parser))?;
    parser.end()?;
    Ok(value)
}

/// Parses two JSON documents and compares them structurally.
pub fn compare_documents(a_json: &str, b_json: &str) -> Result<bool, CheckError> {
    let a = parse_document(a_json)?;
    let b = parse_document(b_json)?;
    Ok(deep_equal(&a, &b))
}

// ── check-sorted ──────────────────────────────────────────────────────────

/// Checks a JSON array of `{ "name", "price" }` products against a sort
/// option code (`az`, `za`, `lohi`, `hilo`).
pub fn check_sorted(products_json: &str, option: &str) -> Result<SortOption, CheckError> {
    let option: SortOption = option.parse()?;
    let products: Vec<Product> = serde_json::from_str(products_json)?;
    check_listing(&products, option)?;
    Ok(option)
}

// ── timing-report ─────────────────────────────────────────────────────────

/// Summarizes a JSON array of millisecond samples and checks it against the
/// named budget.
pub fn timing_report(
    samples_json: &str,
    budget: &str,
    budgets: &Budgets,
) -> Result<Report, CheckError> {
    let budget = budgets.get(budget)?;
    let samples: Vec<f64> = serde_json::from_str(samples_json)?;
    let times: ResponseTimes = samples.into_iter().collect();
    times.check(budget)
}
