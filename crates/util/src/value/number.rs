use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Largest integer magnitude a double represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A finite JSON number.
///
/// Integers and floats share a single double-precision representation, so
/// `1` and `1.0` are the same number. NaN and the infinities are not
/// representable, which keeps equality reflexive.
#[derive(Debug, Copy, Clone)]
pub struct Number(f64);

impl Number {
    /// Wraps a float, returning `None` for NaN or an infinity.
    ///
    /// ```
    /// use structeq_util::Number;
    ///
    /// assert!(Number::from_f64(29.99).is_some());
    /// assert!(Number::from_f64(f64::NAN).is_none());
    /// ```
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(Number(value))
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Returns the value as an integer when it has no fractional part and
    /// fits the exactly-representable range.
    pub fn as_i64(self) -> Option<i64> {
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_SAFE_INTEGER {
            Some(self.0 as i64)
        } else {
            None
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

// Non-finite values cannot be constructed.
impl Eq for Number {}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_i64() {
            Some(i) => write!(f, "{i}"),
            None => write!(f, "{}", self.0),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number(f64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, u8, u16, u32);

impl From<i64> for Number {
    /// Magnitudes above 2^53 round to the nearest double.
    fn from(value: i64) -> Self {
        Number(value as f64)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number(value as f64)
    }
}

impl TryFrom<&serde_json::Number> for Number {
    type Error = crate::ValueError;

    fn try_from(n: &serde_json::Number) -> Result<Self, Self::Error> {
        n.as_f64()
            .and_then(Number::from_f64)
            .ok_or_else(|| crate::ValueError::UnrepresentableNumber(n.to_string()))
    }
}

impl From<Number> for serde_json::Number {
    fn from(n: Number) -> Self {
        match n.as_i64() {
            Some(i) => serde_json::Number::from(i),
            // Finite by construction.
            None => serde_json::Number::from_f64(n.0).unwrap_or_else(|| serde_json::Number::from(0)),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_i64() {
            Some(i) => serializer.serialize_i64(i),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Number::from_f64(value).ok_or_else(|| de::Error::custom("number must be finite"))
    }
}
