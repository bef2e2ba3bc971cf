//! value representation
//!
//! Variables hold one of the following data types
//! - boolean (true/false)
//! - integer (signed, currently: i64 - may change)
//! - decimal (currently: f64 - may change)
//! - string (utf-8)
//! - array ("list" of values)
//! - object (order-preserving "map"/"dictionary", where the key is of type string)
//!
//! Additionally:
//! - there is no `null`/`None` value.
//! - definitions found inside a document always produce a `string`
//! - every value can be written into a text field, see the [std::fmt::Display] impl
//!
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serializer,
};

/// All possible value types
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    String(String),
    Array(Vec<Value>),
    Object(indexmap::IndexMap<String, Value>),
}

impl Value {
    /// Index into an object by key or into an array by position
    ///
    /// Scalars are not indexable.
    pub fn get(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Object(object) => object.get(segment),
            Value::Array(array) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| array.get(index)),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&indexmap::IndexMap<String, Value>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<K: ToString, V: Into<Value>> From<indexmap::IndexMap<K, V>> for Value {
    fn from(value: indexmap::IndexMap<K, V>) -> Self {
        Value::Object(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

impl<K: ToString, V: Into<Value>, const N: usize> From<[(K, V); N]> for Value {
    fn from(value: [(K, V); N]) -> Self {
        Value::Object(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

/// Text form used when a value is substituted into a node
///
/// Strings are written verbatim, composite values as compact json.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Decimal(value) => write!(f, "{value}"),
            Value::String(value) => f.write_str(value),
            Value::Array(_) | Value::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Decimal(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Object(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}
