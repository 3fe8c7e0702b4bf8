//! Scalar metadata values
//!
//! Record metadata is a flat map from field name to [`MetadataValue`].
//! Only scalars are storable; sequences appear solely as the operand of the
//! `$in` / `$nin` filter operators.
//!
//! ## Comparison rules
//!
//! - Integers and floats are both numeric and compare by numeric value
//! - Strings compare lexicographically (byte order)
//! - Booleans compare with `false < true`
//! - Any other pairing is unordered and unequal
//!
//! Equality is derived from ordering (`a == b` iff `compare(a, b) == Equal`)
//! so that `$gte` is always `$gt` or `$eq`.

use crate::error::{VectorError, VectorResult};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Record metadata: field name to scalar value
///
/// BTreeMap keeps field order deterministic for display and serialization.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A scalar metadata value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// String value
    String(String),
}

impl MetadataValue {
    /// Convert a JSON scalar into a metadata value
    ///
    /// Returns `None` for `null`, arrays and objects. Integral JSON numbers
    /// that fit in `i64` become [`MetadataValue::Int`], everything else
    /// numeric becomes [`MetadataValue::Float`].
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Bool(b) => Some(MetadataValue::Bool(*b)),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Some(MetadataValue::Int(i)),
                None => n.as_f64().map(MetadataValue::Float),
            },
            JsonValue::String(s) => Some(MetadataValue::String(s.clone())),
            JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    /// Convert back into a JSON value
    pub fn to_json(&self) -> JsonValue {
        match self {
            MetadataValue::Bool(b) => JsonValue::Bool(*b),
            MetadataValue::Int(i) => JsonValue::from(*i),
            MetadataValue::Float(f) => JsonValue::from(*f),
            MetadataValue::String(s) => JsonValue::String(s.clone()),
        }
    }

    /// Human-readable type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            MetadataValue::Bool(_) => "bool",
            MetadataValue::Int(_) => "int",
            MetadataValue::Float(_) => "float",
            MetadataValue::String(_) => "string",
        }
    }

    /// Compare two values under the metadata ordering rules
    ///
    /// Returns `None` when the types are not mutually ordered (or a float is NaN).
    pub fn compare(&self, other: &MetadataValue) -> Option<Ordering> {
        match (self, other) {
            (MetadataValue::Int(a), MetadataValue::Int(b)) => Some(a.cmp(b)),
            (MetadataValue::Float(a), MetadataValue::Float(b)) => a.partial_cmp(b),
            (MetadataValue::Int(a), MetadataValue::Float(b)) => (*a as f64).partial_cmp(b),
            (MetadataValue::Float(a), MetadataValue::Int(b)) => a.partial_cmp(&(*b as f64)),
            (MetadataValue::String(a), MetadataValue::String(b)) => Some(a.cmp(b)),
            (MetadataValue::Bool(a), MetadataValue::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Value equality under the metadata comparison rules
    ///
    /// `Int(2)` equals `Float(2.0)`; mismatched types are never equal.
    pub fn value_eq(&self, other: &MetadataValue) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(b) => write!(f, "{}", b),
            MetadataValue::Int(i) => write!(f, "{}", i),
            MetadataValue::Float(v) => write!(f, "{}", v),
            MetadataValue::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        MetadataValue::Bool(v)
    }
}

impl From<i32> for MetadataValue {
    fn from(v: i32) -> Self {
        MetadataValue::Int(v as i64)
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Int(v)
    }
}

impl From<u32> for MetadataValue {
    fn from(v: u32) -> Self {
        MetadataValue::Int(v as i64)
    }
}

impl From<f32> for MetadataValue {
    fn from(v: f32) -> Self {
        MetadataValue::Float(v as f64)
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Float(v)
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        MetadataValue::String(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::String(v.to_string())
    }
}

/// Convert a JSON object into record metadata
///
/// `null` yields empty metadata. Anything other than an object of scalars
/// is rejected with [`VectorError::InvalidMetadata`].
pub fn metadata_from_json(value: &JsonValue) -> VectorResult<Metadata> {
    let obj = match value {
        JsonValue::Null => return Ok(Metadata::new()),
        JsonValue::Object(obj) => obj,
        other => {
            return Err(VectorError::InvalidMetadata {
                reason: format!("expected an object, got {}", json_kind(other)),
            })
        }
    };

    let mut metadata = Metadata::new();
    for (field, raw) in obj {
        let Some(value) = MetadataValue::from_json(raw) else {
            return Err(VectorError::InvalidMetadata {
                reason: format!(
                    "field '{}' holds {}, only string, integer, float and boolean are allowed",
                    field,
                    json_kind(raw)
                ),
            });
        };
        metadata.insert(field.clone(), value);
    }
    Ok(metadata)
}

/// Convert record metadata into a JSON object
pub fn metadata_to_json(metadata: &Metadata) -> JsonValue {
    JsonValue::Object(
        metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

/// Short description of a JSON value's kind
pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
