//! Values produced by the decoder.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Named fields in declaration order.
pub type Fields = Vec<(String, DecodedValue)>;

/// A decoded value with its structure preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    Null,
    Bool(bool),
    /// Integers that fit comfortably in a JSON number (up to 32 bits).
    Number(i64),
    /// Strings, including decimal/hex renderings of wide integers.
    Text(String),
    /// JSON embedded in a byte-string payload.
    Json(serde_json::Value),
    List(Vec<DecodedValue>),
    Record(Fields),
    /// Enum variant; `fields` is `None` for field-less variants.
    Variant {
        name: String,
        fields: Option<Fields>,
    },
}

impl DecodedValue {
    pub fn text(s: impl Into<String>) -> Self {
        DecodedValue::Text(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert into a `serde_json::Value` (records keep field order).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

struct FieldsRef<'a>(&'a [(String, DecodedValue)]);

impl Serialize for FieldsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DecodedValue::Null => serializer.serialize_unit(),
            DecodedValue::Bool(b) => serializer.serialize_bool(*b),
            DecodedValue::Number(n) => serializer.serialize_i64(*n),
            DecodedValue::Text(s) => serializer.serialize_str(s),
            DecodedValue::Json(v) => v.serialize(serializer),
            DecodedValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DecodedValue::Record(fields) => FieldsRef(fields).serialize(serializer),
            DecodedValue::Variant { name, fields: None } => serializer.serialize_str(name),
            DecodedValue::Variant { name, fields: Some(fields) } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, &FieldsRef(fields))?;
                map.end()
            }
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Null => write!(f, "null"),
            DecodedValue::Bool(v) => write!(f, "{}", v),
            DecodedValue::Number(v) => write!(f, "{}", v),
            DecodedValue::Text(s) => write!(f, "\"{}\"", s),
            DecodedValue::Json(v) => write!(f, "{}", v),
            DecodedValue::List(items) => {
                let strs: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", strs.join(", "))
            }
            DecodedValue::Record(fields) => write_fields(f, fields),
            DecodedValue::Variant { name, fields: None } => write!(f, "{}", name),
            DecodedValue::Variant { name, fields: Some(fields) } => {
                write!(f, "{}", name)?;
                write_fields(f, fields)
            }
        }
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[(String, DecodedValue)]) -> fmt::Result {
    let strs: Vec<String> = fields.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    write!(f, " {{ {} }}", strs.join(", "))
}

/// A decoded value and the number of bytes it occupied.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub value: DecodedValue,
    pub bytes_read: usize,
}

impl Decoded {
    pub fn new(value: DecodedValue, bytes_read: usize) -> Self {
        Self { value, bytes_read }
    }

    pub fn null(bytes_read: usize) -> Self {
        Self::new(DecodedValue::Null, bytes_read)
    }
}
