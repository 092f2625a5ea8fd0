//! The `Behavior` trait — the main extension point for user code.

use acts_core::{ActsResult, ConfigMap, ModelName, config};

use crate::{EntityCapability, StaticCapability};

/// A reusable, named cross-cutting capability module for model types.
///
/// Implement this trait to give models slug generation, soft-delete, taxonomy
/// and the like without subclassing.  A model binds a behavior with an
/// optional configuration override; the framework merges that override onto
/// [`defaults`][Self::defaults] and hands the result to a per-model
/// [`BehaviorInstance`][crate::BehaviorInstance].
///
/// # Required methods
///
/// None.  Every method has a default, so the smallest useful behavior only
/// overrides the capability lookups it actually answers.
///
/// # Thread safety
///
/// One implementation object may back bindings on many model types and be
/// consulted from concurrent dispatch, so implementations must be
/// `Send + Sync` and keep per-model state out of `self` — it belongs in the
/// instance configuration.
///
/// # Example
///
/// ```rust,ignore
/// struct Sluggable;
///
/// impl Behavior for Sluggable {
///     fn defaults(&self) -> ConfigMap {
///         config::coerce(json!({"field": "title", "separator": "-"})).unwrap()
///     }
///
///     fn entity_capability(&self, method: &str) -> Option<EntityCapability> {
///         (method == "slug").then_some(slugify)
///     }
/// }
/// ```
pub trait Behavior: Send + Sync + 'static {
    /// Declared default configuration, merged under any caller-supplied
    /// overrides at bind time.
    fn defaults(&self) -> ConfigMap {
        ConfigMap::new()
    }

    /// Produce the final configuration for a binding to `model`.
    ///
    /// Called on every bind and re-bind with the caller-supplied overrides
    /// and this behavior's declared defaults.  The default strategy is
    /// [`config::shallow_merge`] (supplied keys win, defaults carried
    /// through).  Override to deep-merge nested values or to normalize
    /// shorthand forms into canonical ones.
    fn merge_config(
        &self,
        model:    &ModelName,
        supplied: ConfigMap,
        defaults: ConfigMap,
    ) -> ActsResult<ConfigMap> {
        let _ = model;
        Ok(config::shallow_merge(supplied, defaults))
    }

    /// Look up a capability callable in static context.
    ///
    /// Return `Some` for every method name this behavior answers on the
    /// model type; the dispatcher invokes the first bound behavior that does.
    fn static_capability(&self, method: &str) -> Option<StaticCapability> {
        let _ = method;
        None
    }

    /// Look up a capability callable on an entity of the model.
    fn entity_capability(&self, method: &str) -> Option<EntityCapability> {
        let _ = method;
        None
    }

    /// Entity capabilities to materialize as directly callable members of
    /// every entity of the bound model.
    ///
    /// Consulted once per binding, at first bind, with the final merged
    /// configuration.  Unlike [`entity_capability`][Self::entity_capability]
    /// lookups — which are only reached through the dispatcher's scan — these
    /// are installed into the model's member table under the returned names.
    fn installed_capabilities(
        &self,
        model:  &ModelName,
        config: &ConfigMap,
    ) -> Vec<(String, EntityCapability)> {
        let _ = (model, config);
        Vec::new()
    }
}
