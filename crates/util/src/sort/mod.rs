//! Sorting utilities.
//!
//! Insertion sort for deriving an expected ordering from a short listing,
//! plus checks that report where a listing breaks an ordering.

mod check;
mod insertion;

pub use check::{first_unsorted_by, is_sorted_by};
pub use insertion::{insertion_sort_by, insertion_sort_by_key};
