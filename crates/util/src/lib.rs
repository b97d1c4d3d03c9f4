//! structeq-util - value model and structural equality
//!
//! This crate provides the JSON-like [`Value`] model, the [`deep_equal`]
//! comparator over it, and small sorting helpers used to check listings.

pub mod json_equal;
pub mod sort;
pub mod value;

// Re-exports for convenience
pub use json_equal::{deep_equal, deep_equal_json};
pub use sort::{first_unsorted_by, insertion_sort_by, insertion_sort_by_key, is_sorted_by};
pub use value::{Kind, Mapping, Number, Value, ValueError};
