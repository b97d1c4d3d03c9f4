//! The value model compared by [`crate::json_equal::deep_equal`].
//!
//! A [`Value`] is an owned, dynamically-typed JSON-like tree. Mappings are
//! keyed by unique strings and carry no meaningful key order.

mod number;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use thiserror::Error;

pub use number::Number;

/// Keyed children of a [`Value::Mapping`].
pub type Mapping = BTreeMap<String, Value>;

/// Failure to bring foreign data into the value model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("number {0} has no finite double representation")]
    UnrepresentableNumber(String),
}

/// A JSON-like value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// Runtime tag of a [`Value`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Sequence(_) => Kind::Sequence,
            Value::Mapping(_) => Kind::Mapping,
        }
    }

    /// Builds a number value, or `None` for NaN and the infinities.
    pub fn from_f64(value: f64) -> Option<Value> {
        Number::from_f64(value).map(Value::Number)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key of a mapping; `None` for missing keys and non-mappings.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::json_equal::deep_equal(self, other)
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::Value::from(self.clone());
        write!(f, "{json}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i32, i64, u32, u64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Value::try_from(value.clone())
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ValueError;

    /// Converts without recursion, taking the document apart as it goes so
    /// that neither side is dropped recursively.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let mut stack: Vec<Frame> = Vec::new();
        if let Some(scalar) = Frame::open(value, &mut stack)? {
            return Ok(scalar);
        }

        let mut result = Value::Null;
        while let Some(frame) = stack.last_mut() {
            match frame.next_child() {
                Some(child) => {
                    if let Some(scalar) = Frame::open(child, &mut stack)? {
                        if let Some(frame) = stack.last_mut() {
                            frame.accept(scalar);
                        }
                    }
                }
                None => {
                    let Some(done) = stack.pop() else { break };
                    let value = done.finish();
                    match stack.last_mut() {
                        Some(parent) => parent.accept(value),
                        None => result = value,
                    }
                }
            }
        }
        Ok(result)
    }
}

/// A container whose children are still being converted.
enum Frame {
    Sequence {
        items: Vec<Value>,
        rest: std::vec::IntoIter<serde_json::Value>,
    },
    Mapping {
        map: Mapping,
        key: String,
        rest: serde_json::map::IntoIter,
    },
}

impl Frame {
    /// Converts a scalar directly, or pushes a frame for a container.
    fn open(json: serde_json::Value, stack: &mut Vec<Frame>) -> Result<Option<Value>, ValueError> {
        Ok(Some(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(Number::try_from(&n)?),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                stack.push(Frame::Sequence {
                    items: Vec::with_capacity(arr.len()),
                    rest: arr.into_iter(),
                });
                return Ok(None);
            }
            serde_json::Value::Object(obj) => {
                stack.push(Frame::Mapping {
                    map: Mapping::new(),
                    key: String::new(),
                    rest: obj.into_iter(),
                });
                return Ok(None);
            }
        }))
    }

    fn next_child(&mut self) -> Option<serde_json::Value> {
        match self {
            Frame::Sequence { rest, .. } => rest.next(),
            Frame::Mapping { key, rest, .. } => rest.next().map(|(k, v)| {
                *key = k;
                v
            }),
        }
    }

    fn accept(&mut self, value: Value) {
        match self {
            Frame::Sequence { items, .. } => items.push(value),
            Frame::Mapping { map, key, .. } => {
                map.insert(std::mem::take(key), value);
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Frame::Sequence { items, .. } => Value::Sequence(items),
            Frame::Mapping { map, .. } => Value::Mapping(map),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(mut value: Value) -> Self {
        match &mut value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number((*n).into()),
            Value::String(s) => serde_json::Value::String(std::mem::take(s)),
            Value::Sequence(items) => serde_json::Value::Array(
                std::mem::take(items)
                    .into_iter()
                    .map(serde_json::Value::from)
                    .collect(),
            ),
            Value::Mapping(map) => serde_json::Value::Object(
                std::mem::take(map)
                    .into_iter()
                    .map(|(key, val)| (key, serde_json::Value::from(val)))
                    .collect(),
            ),
        }
    }
}

impl Drop for Value {
    // Children are moved onto a local stack so nesting depth never reaches
    // the call stack.
    fn drop(&mut self) {
        let mut pending = match self {
            Value::Sequence(items) if !items.is_empty() => std::mem::take(items),
            Value::Mapping(map) if !map.is_empty() => std::mem::take(map).into_values().collect(),
            _ => return,
        };
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::Sequence(items) => pending.append(items),
                Value::Mapping(map) => pending.extend(std::mem::take(map).into_values()),
                _ => {}
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, val) in map {
                    out.serialize_entry(key, val)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = serde_json::Value::deserialize(deserializer)?;
        Value::try_from(json).map_err(D::Error::custom)
    }
}
