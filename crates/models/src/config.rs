use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::metadata::Metadata;

/// A named set of metadata. `name` is the only key a record is addressed by.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub name: String,
    pub metadata: Metadata,
}

impl ConfigRecord {
    /// Build a record, rejecting an empty name.
    pub fn new(name: impl Into<String>, metadata: Metadata) -> Result<Self, ModelError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, metadata })
    }

    /// Build a record from raw JSON metadata bytes.
    pub fn from_json_bytes(name: impl Into<String>, metadata: &[u8]) -> Result<Self, ModelError> {
        Self::new(name, Metadata::from_slice(metadata)?)
    }

    /// String value stored under a dotted metadata path, if any.
    pub fn metadata_value(&self, path: &str) -> Option<&str> {
        self.metadata.resolve_str(path)
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::Validation("name is required".into()));
    }
    Ok(())
}
