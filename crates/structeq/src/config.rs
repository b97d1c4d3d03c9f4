//! Named response-time budgets.
//!
//! Budgets can be overridden from a TOML file:
//!
//! ```toml
//! [budgets.inventory]
//! max_single = 750.0
//!
//! [budgets.checkout]
//! max_average = 3000.0
//! max_spread = 2.5
//! warn = { max_single = 2000.0 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::CheckError;
use crate::timing::{Budget, Limits};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Budgets {
    #[serde(default)]
    budgets: BTreeMap<String, Budget>,
}

impl Budgets {
    /// Limits used by the pet-store API and storefront performance
    /// scenarios.
    pub fn builtin() -> Self {
        let limits = |max_average, max_single, max_total, max_spread| Budget {
            max_average,
            max_single,
            max_total,
            max_spread,
            ..Budget::default()
        };
        let login_stress = Budget {
            max_average: Some(6000.0),
            max_trimmed_spread: Some(4.0),
            warn: Limits {
                max_single: Some(8000.0),
                max_trimmed_spread: Some(2.0),
                ..Limits::default()
            },
            ..Budget::default()
        };
        let budgets = [
            // pet-store API
            ("inventory", Budget::single(500.0)),
            ("create_order", Budget::single(800.0)),
            ("get_order", Budget::single(600.0)),
            ("delete_order", Budget::single(500.0)),
            ("repeated_calls", limits(Some(500.0), Some(800.0), None, None)),
            ("concurrent", limits(Some(1000.0), Some(1500.0), None, Some(3.0))),
            ("bulk_orders", limits(Some(1500.0), Some(2000.0), Some(6000.0), None)),
            ("crud_cycle", limits(Some(3000.0), Some(4000.0), None, Some(3.0))),
            ("error_recovery", limits(Some(2000.0), Some(3000.0), None, None)),
            // storefront login
            ("page_load", Budget::single(2000.0)),
            ("login", Budget::single(1500.0)),
            ("products_load", Budget::single(1000.0)),
            ("login_average", limits(Some(2500.0), None, None, None)),
            ("login_cycle", limits(Some(5000.0), Some(8000.0), None, None)),
            ("login_submissions", limits(Some(3000.0), Some(5000.0), None, None)),
            ("login_stress", login_stress),
            // storefront checkout
            ("cart_load", Budget::single(1000.0)),
            ("checkout", Budget::single(3000.0)),
            ("checkout_overview", Budget::single(1000.0)),
            ("order_complete", Budget::single(1000.0)),
            ("checkout_cycle", limits(Some(6000.0), Some(8000.0), None, None)),
            ("large_cart", Budget::single(8000.0)),
            ("concurrent_interaction", Budget::single(3000.0)),
            ("tab_switching", limits(Some(8000.0), Some(10000.0), None, None)),
        ];
        Budgets {
            budgets: budgets
                .into_iter()
                .map(|(name, budget)| (name.to_owned(), budget))
                .collect(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, CheckError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a budget file and layers it over [`Budgets::builtin`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CheckError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CheckError::Io {
            path: path.to_owned(),
            source,
        })?;
        let file = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), budgets = file.budgets.len(), "loaded budget file");
        Ok(Self::builtin().merged(file))
    }

    /// Entries of `other` replace same-named entries of `self`.
    pub fn merged(mut self, other: Budgets) -> Self {
        self.budgets.extend(other.budgets);
        self
    }

    pub fn get(&self, name: &str) -> Result<&Budget, CheckError> {
        self.budgets
            .get(name)
            .ok_or_else(|| CheckError::UnknownBudget(name.to_owned()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.budgets.keys().map(String::as_str)
    }
}
