//! Product listing sort verification.
//!
//! The storefront offers four orderings of its inventory. A listing is
//! verified the same way a tester would by hand: derive the expected order by
//! sorting a copy, then compare both orders structurally.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use structeq_util::{deep_equal, insertion_sort_by, Value};
use tracing::debug;

use crate::error::CheckError;
use crate::price::parse_price;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SortOption {
    NameAscending,
    NameDescending,
    PriceAscending,
    PriceDescending,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::NameAscending,
        SortOption::NameDescending,
        SortOption::PriceAscending,
        SortOption::PriceDescending,
    ];

    /// The option value used by the storefront's sort selector.
    pub fn code(self) -> &'static str {
        match self {
            SortOption::NameAscending => "az",
            SortOption::NameDescending => "za",
            SortOption::PriceAscending => "lohi",
            SortOption::PriceDescending => "hilo",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SortOption::NameAscending => "Name (A to Z)",
            SortOption::NameDescending => "Name (Z to A)",
            SortOption::PriceAscending => "Price (low to high)",
            SortOption::PriceDescending => "Price (high to low)",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::NameAscending => a.name.cmp(&b.name),
            SortOption::NameDescending => b.name.cmp(&a.name),
            SortOption::PriceAscending => a.price.total_cmp(&b.price),
            SortOption::PriceDescending => b.price.total_cmp(&a.price),
        }
    }

    fn key(self, product: &Product) -> Result<Value, CheckError> {
        match self {
            SortOption::NameAscending | SortOption::NameDescending => {
                Ok(Value::from(product.name.as_str()))
            }
            SortOption::PriceAscending | SortOption::PriceDescending => Value::from_f64(product.price)
                .ok_or_else(|| CheckError::InvalidPrice(product.price.to_string())),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for SortOption {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.code() == s)
            .ok_or_else(|| CheckError::UnknownSortOption(s.to_owned()))
    }
}

/// One entry of an inventory listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub name: String,
    /// Either a number or a label such as `"$29.99"`.
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Product {
            name: name.into(),
            price,
        }
    }
}

fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(f64),
        Label(String),
    }

    match Price::deserialize(deserializer)? {
        Price::Number(n) => Ok(n),
        Price::Label(label) => parse_price(&label).map_err(serde::de::Error::custom),
    }
}

/// Verifies that `products` are listed in the order `option` asks for.
///
/// Ties may appear in any order. On failure the error names the first
/// position whose key differs from the expected ordering.
pub fn check_listing(products: &[Product], option: SortOption) -> Result<(), CheckError> {
    let actual = products
        .iter()
        .map(|p| option.key(p))
        .collect::<Result<Vec<_>, _>>()?;

    let mut sorted = products.to_vec();
    insertion_sort_by(&mut sorted, |a, b| option.compare(a, b));
    let expected = sorted
        .iter()
        .map(|p| option.key(p))
        .collect::<Result<Vec<_>, _>>()?;

    if deep_equal(&Value::Sequence(actual.clone()), &Value::Sequence(expected.clone())) {
        debug!(option = option.code(), items = products.len(), "listing sorted");
        return Ok(());
    }

    let index = actual
        .iter()
        .zip(&expected)
        .position(|(a, e)| !deep_equal(a, e))
        .unwrap_or(0);
    debug!(option = option.code(), index, "listing out of order");
    Err(CheckError::NotSorted {
        option,
        index,
        expected: expected[index].to_string(),
        actual: actual[index].to_string(),
    })
}
