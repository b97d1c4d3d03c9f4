//! JSON equality utilities.
//!
//! Provides deep structural equality for [`crate::Value`] trees.

mod deep_equal;

pub use deep_equal::{deep_equal, deep_equal_json};
