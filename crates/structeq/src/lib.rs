//! structeq — structural comparison and assertion helpers for storefront and
//! pet-store API test runs.
//!
//! Modules:
//! - `price`   — price-label parsing
//! - `listing` — product listing sort verification
//! - `timing`  — response-time aggregation and budgets
//! - `config`  — named budgets loaded from TOML
//! - `cli`     — logic behind the `json-equal`, `check-sorted` and
//!   `timing-report` binaries
//!
//! The value model and comparator live in `structeq-util` and are re-exported
//! here.

pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod price;
pub mod timing;

pub use config::Budgets;
pub use error::CheckError;
pub use listing::{check_listing, Product, SortOption};
pub use price::parse_price;
pub use structeq_util::{deep_equal, deep_equal_json, Kind, Mapping, Number, Value, ValueError};
pub use timing::{Budget, BudgetViolation, Limits, Metric, Report, ResponseTimes, Summary};
