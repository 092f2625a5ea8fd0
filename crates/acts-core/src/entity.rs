//! Minimal entity handle threaded through instance dispatch.
//!
//! Real field storage, persistence, and validation belong to the host's data
//! layer.  `Entity` carries just enough for behavior capabilities to do their
//! work: the owning model's name (to re-derive dispatch context) and a flat
//! field mapping.

use serde_json::Value;

use crate::{ConfigMap, ModelName};

/// One record of a model type, as seen by behavior capabilities.
#[derive(Clone, Debug)]
pub struct Entity {
    model:  ModelName,
    fields: ConfigMap,
}

impl Entity {
    /// Create an entity of the given model with initial field values.
    pub fn new(model: ModelName, fields: ConfigMap) -> Self {
        Self { model, fields }
    }

    /// The model type this entity belongs to.
    #[inline]
    pub fn model(&self) -> &ModelName {
        &self.model
    }

    /// Read one field, `None` if unset.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Write one field, returning the previous value if any.
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    /// All fields.
    pub fn fields(&self) -> &ConfigMap {
        &self.fields
    }
}
