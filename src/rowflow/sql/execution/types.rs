//! Core data types of the evaluation engine.
//!
//! This module contains the fundamental value types used throughout the
//! query evaluation core:
//! - [`FieldType`] - The declared type of a schema column
//! - [`FieldValue`] - The runtime value type system for row fields

use crate::rowflow::sql::error::SqlError;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Fixed byte width assumed for text fields in schema sizing hints:
/// a 4-byte length prefix plus a 128-byte payload.
pub const TEXT_FIELD_WIDTH: usize = 4 + 128;

/// Declared type of a schema column.
///
/// Every column in a [`crate::rowflow::sql::execution::schema::Schema`] is
/// declared with exactly one of these types. The per-type byte width is a
/// sizing hint only; no wire format is defined at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point number
    Float,
    /// Boolean value (true/false)
    Boolean,
    /// UTF-8 text
    Text,
}

impl FieldType {
    /// Fixed byte width used as a sizing hint for this type.
    ///
    /// Text is assumed to occupy [`TEXT_FIELD_WIDTH`] bytes regardless of
    /// the actual string length.
    pub fn byte_width(&self) -> usize {
        match self {
            FieldType::Integer => 8,
            FieldType::Float => 8,
            FieldType::Boolean => 1,
            FieldType::Text => TEXT_FIELD_WIDTH,
        }
    }

    /// Type name for error messages and schema display
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Integer => "INTEGER",
            FieldType::Float => "FLOAT",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Text => "TEXT",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value in a row field.
///
/// This enum is the closed sum type over all supported runtime values.
/// Values are immutable once constructed; type checking collapses to
/// matching on the variant tag.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// Boolean value (true/false)
    Boolean(bool),
    /// UTF-8 text
    Text(String),
}

impl FieldValue {
    /// Get the type name for error messages and debugging
    pub fn type_name(&self) -> &'static str {
        self.field_type().as_str()
    }

    /// Get the declared type this value conforms to
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::Text(_) => FieldType::Text,
        }
    }

    /// Check if this value is of a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }

    /// Extract the integer payload, or report a type error naming the
    /// actual variant encountered.
    pub fn as_integer(&self) -> Result<i64, SqlError> {
        match self {
            FieldValue::Integer(i) => Ok(*i),
            other => Err(SqlError::type_error(
                FieldType::Integer.as_str(),
                other.type_name(),
                Some(other.to_string()),
            )),
        }
    }

    /// Convert this value to a JSON value for interchange with callers
    /// that speak serde_json.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Integer(i) => serde_json::Value::from(*i),
            FieldValue::Float(f) => serde_json::Value::from(*f),
            FieldValue::Boolean(b) => serde_json::Value::from(*b),
            FieldValue::Text(s) => serde_json::Value::from(s.clone()),
        }
    }
}

/// Display implementation for FieldValue for canonical text formatting
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Structural equality for FieldValue.
///
/// Floats are compared by bit pattern so that equality agrees with the
/// `Hash` implementation (equal values hash equal) and `Eq` is lawful.
/// This makes NaN equal to an identical NaN, which is what a group key
/// needs; SQL comparison semantics live above this layer.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a.to_bits() == b.to_bits(),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a == b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

/// Hash implementation for FieldValue so values can serve as group keys.
///
/// Hashes the discriminant first to distinguish variants, then the payload.
/// Floats hash their bit representation, consistent with `PartialEq`.
impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Boolean(b) => b.hash(state),
            FieldValue::Text(s) => s.hash(state),
        }
    }
}

/// Ordering for FieldValue where the type supports it.
///
/// Values of different variants are incomparable and return `None`, as do
/// float comparisons involving NaN (IEEE 754 semantics).
impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.partial_cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.partial_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Serialize implementation matching `to_json()` output so serialized
/// values round-trip through serde_json without an intermediate
/// `serde_json::Value` allocation.
impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
            FieldValue::Text(s) => serializer.serialize_str(s),
        }
    }
}
