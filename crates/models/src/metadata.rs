//! Schema-less metadata attached to a config record.
//!
//! Metadata is always a JSON object at the root; below the root it may nest
//! arbitrarily. Lookups use dotted paths (`"fats.saturated-fat"`), one object
//! key per segment.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// Separator between the keys of a dotted path.
pub const PATH_SEPARATOR: char = '.';

/// JSON object holding the metadata of a config record.
///
/// The wrapped value is always a `Value::Object`; every constructor checks it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Metadata(Value);

impl Default for Metadata {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl Metadata {
    /// Empty metadata object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw JSON bytes. The document must be an object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::try_from(value)
    }

    /// Encode back into JSON bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>, ModelError> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Resolve a dotted path against this metadata.
    ///
    /// Each segment selects a key of the current object. Resolution yields
    /// `None` as soon as a key is missing, or when a non-object value is
    /// reached while segments remain. Empty segments are literal `""` keys.
    /// The empty path resolves to the root object.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.0);
        }
        descend(&self.0, path.split(PATH_SEPARATOR))
    }

    /// Resolve a dotted path and return the leaf only when it is a JSON string.
    pub fn resolve_str(&self, path: &str) -> Option<&str> {
        match self.resolve(path)? {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

fn descend<'a, 'p, I>(current: &'a Value, mut segments: I) -> Option<&'a Value>
where
    I: Iterator<Item = &'p str>,
{
    let Some(segment) = segments.next() else {
        return Some(current);
    };
    match current {
        Value::Object(map) => descend(map.get(segment)?, segments),
        Value::Array(_) | Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {
            None
        }
    }
}

impl TryFrom<Value> for Metadata {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(_) => Ok(Self(value)),
            other => Err(ModelError::Validation(format!(
                "metadata must be a json object, got {}",
                kind_of(&other)
            ))),
        }
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }
}

impl From<Metadata> for Value {
    fn from(metadata: Metadata) -> Self {
        metadata.0
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
