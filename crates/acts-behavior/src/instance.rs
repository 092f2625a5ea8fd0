//! `BehaviorInstance` — one live, configured behavior bound to one model.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use acts_core::{ActsResult, BehaviorId, ConfigMap, ModelName};

use crate::Behavior;

/// A behavior implementation bound to exactly one model type, holding the
/// configuration merged from the behavior's declared defaults and the
/// caller-supplied overrides.
///
/// At most one instance exists per (model, behavior id) pair at any time;
/// the binding table enforces that.  The `model` field is a non-owning
/// back-reference — the name, not the model object — used to re-derive
/// context on dispatch.
pub struct BehaviorInstance {
    id:             BehaviorId,
    model:          ModelName,
    implementation: Arc<dyn Behavior>,
    config:         ConfigMap,
}

impl BehaviorInstance {
    /// Bind `implementation` to `model`, merging `supplied` over the
    /// behavior's declared defaults via its merge entry point.
    pub fn new(
        id:             BehaviorId,
        model:          ModelName,
        implementation: Arc<dyn Behavior>,
        supplied:       ConfigMap,
    ) -> ActsResult<Self> {
        let defaults = implementation.defaults();
        let config = implementation.merge_config(&model, supplied, defaults)?;
        Ok(Self { id, model, implementation, config })
    }

    /// The replacement instance for a re-bind: same identity and
    /// implementation, configuration re-merged from scratch over the
    /// declared defaults.  Overrides from the previous bind do not linger.
    pub fn reconfigured(&self, supplied: ConfigMap) -> ActsResult<Self> {
        Self::new(
            self.id.clone(),
            self.model.clone(),
            Arc::clone(&self.implementation),
            supplied,
        )
    }

    /// Resolved implementation identifier.
    #[inline]
    pub fn id(&self) -> &BehaviorId {
        &self.id
    }

    /// The owning model's name.
    #[inline]
    pub fn model(&self) -> &ModelName {
        &self.model
    }

    /// The shared behavior implementation.
    #[inline]
    pub fn implementation(&self) -> &Arc<dyn Behavior> {
        &self.implementation
    }

    /// The merged configuration.
    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// One configuration value, `None` if the key is absent.
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }
}

impl fmt::Debug for BehaviorInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorInstance")
            .field("id", &self.id)
            .field("model", &self.model)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
