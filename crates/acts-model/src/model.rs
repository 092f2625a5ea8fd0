//! The per-model facade: binding registry, lazy initialization, dispatch.

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::Value;

use acts_core::{ActsError, ActsResult, BehaviorId, ConfigMap, Entity, ModelName, config};
use acts_behavior::{
    BEHAVIOR_KIND, BehaviorDescriptor, BehaviorInstance, EntityCapability, Locator,
};

use crate::dispatch;
use crate::init::InitCell;
use crate::table::BindingTable;
use crate::BehaviorDecl;

// ── BehaviorRef ───────────────────────────────────────────────────────────────

/// What `bind_behavior` accepts: a name to resolve through the locator, or a
/// descriptor supplied directly (locator bypassed).
pub enum BehaviorRef {
    Named(String),
    Resolved(BehaviorDescriptor),
}

impl From<&str> for BehaviorRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for BehaviorRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<BehaviorDescriptor> for BehaviorRef {
    fn from(descriptor: BehaviorDescriptor) -> Self {
        Self::Resolved(descriptor)
    }
}

// ── Installed capabilities ────────────────────────────────────────────────────

/// One materialized entity member contributed by a bound behavior.
///
/// The entry records *which* behavior contributed the capability, not the
/// instance itself — the live instance is re-derived from the binding table
/// at call time, so a reconfigured binding is picked up automatically and an
/// unbound one makes the entry fall through to the dispatcher scan.
pub(crate) struct InstalledCapability {
    pub(crate) behavior:   BehaviorId,
    pub(crate) capability: EntityCapability,
}

// ── ModelType ─────────────────────────────────────────────────────────────────

/// A data-model type with behavior support.
///
/// Owns the model's binding table, installed-capability table, declared
/// behavior list, and the one-time initialization cell.  Construct via
/// [`ModelType::builder`], typically once per model class at startup, and
/// share as `Arc<ModelType>`.
///
/// # Host integration
///
/// The host model class's own unknown-member handlers are expected to call
/// [`call`][Self::call] (static context) and [`call_entity`][Self::call_entity]
/// (instance context) before applying their own default, passing the result
/// or the [`DispatchMiss`][ActsError::DispatchMiss] signal through unchanged.
///
/// # Concurrency
///
/// First-use initialization is safe under races (see [`crate::init`]).  After
/// that, dispatch takes short read locks; explicit `bind`/`unbind` are
/// expected from setup code, externally serialized per model, but hold the
/// write lock so concurrent readers never observe a half-mutated table.
pub struct ModelType {
    name:      ModelName,
    declared:  Vec<BehaviorDecl>,
    locator:   Arc<dyn Locator>,
    init:      InitCell,
    bindings:  RwLock<BindingTable>,
    installed: RwLock<FxHashMap<String, InstalledCapability>>,
}

impl ModelType {
    /// Start building a model type with the given name and locator.
    pub fn builder(name: impl Into<ModelName>, locator: Arc<dyn Locator>) -> ModelTypeBuilder {
        ModelTypeBuilder {
            name: name.into(),
            locator,
            declared: Vec::new(),
        }
    }

    /// The model's name.
    #[inline]
    pub fn name(&self) -> &ModelName {
        &self.name
    }

    /// Whether the declared behavior list has been processed.
    pub fn is_initialized(&self) -> bool {
        self.init.is_set()
    }

    // ── Lazy initialization ───────────────────────────────────────────────

    /// Process the declared behavior list into bindings, exactly once.
    ///
    /// Idempotent; called at the top of every registry operation and both
    /// dispatch paths, so explicit calls are only needed to force eager
    /// initialization.  A declared entry that fails aborts the remaining
    /// entries; the error is recorded and replayed to every later caller.
    pub fn ensure_initialized(&self) -> ActsResult<()> {
        self.init.run_once(|| {
            for decl in &self.declared {
                let supplied = config::coerce(decl.config.clone())?;
                let descriptor = self.resolve(&decl.name)?;
                self.bind_resolved(descriptor, supplied)?;
            }
            debug!("model `{}`: initialized {} declared behavior(s)", self.name, self.declared.len());
            Ok(())
        })
    }

    // ── Binding registry ──────────────────────────────────────────────────

    /// Bind a behavior to this model, or reconfigure an existing binding.
    ///
    /// `target` is a behavior name (resolved through the locator, `NotFound`
    /// if unresolvable) or a [`BehaviorDescriptor`] supplied directly.
    /// `config` is the override mapping (`Null` for none; anything else
    /// non-mapping is a `Misconfiguration`).
    ///
    /// If the behavior is unbound, a new instance is appended to the binding
    /// order and its installed capabilities are materialized.  If it is
    /// already bound, the instance is reconfigured in place — same position,
    /// fresh merge of `config` over the declared defaults, no reinstall.
    pub fn bind_behavior(&self, target: impl Into<BehaviorRef>, config: Value) -> ActsResult<()> {
        self.ensure_initialized()?;
        let supplied = config::coerce(config)?;
        let descriptor = match target.into() {
            BehaviorRef::Named(name) => self.resolve(&name)?,
            BehaviorRef::Resolved(descriptor) => descriptor,
        };
        self.bind_resolved(descriptor, supplied)
    }

    /// Remove the binding for `name`.  `NotBound` if absent, `NotFound` if
    /// the name does not resolve.
    pub fn unbind_behavior(&self, name: &str) -> ActsResult<()> {
        self.ensure_initialized()?;
        let descriptor = self.resolve(name)?;
        match self.bindings.write().remove(&descriptor.id) {
            Some(_) => {
                debug!("model `{}`: unbound behavior `{}`", self.name, descriptor.id);
                Ok(())
            }
            None => Err(ActsError::NotBound {
                model:    self.name.clone(),
                behavior: descriptor.id,
            }),
        }
    }

    /// Whether `name` resolves to a behavior currently bound to this model.
    ///
    /// Never fails: an unresolvable name, an absent binding, and a failed
    /// initialization all answer `false` (the initialization error is
    /// logged, not swallowed silently).
    pub fn has_behavior(&self, name: &str) -> bool {
        if let Err(err) = self.ensure_initialized() {
            warn!("model `{}`: initialization failed, has_behavior(\"{name}\") is false: {err}", self.name);
            return false;
        }
        match self.locator.resolve(BEHAVIOR_KIND, name) {
            Some(descriptor) => self.bindings.read().contains(&descriptor.id),
            None => false,
        }
    }

    /// The bound instance for `name`.  `NotBound` if absent.
    pub fn behavior(&self, name: &str) -> ActsResult<Arc<BehaviorInstance>> {
        self.ensure_initialized()?;
        let descriptor = self.resolve(name)?;
        self.bindings
            .read()
            .get(&descriptor.id)
            .cloned()
            .ok_or_else(|| ActsError::NotBound {
                model:    self.name.clone(),
                behavior: descriptor.id,
            })
    }

    /// The full merged configuration of the bound behavior `name`.
    pub fn behavior_config(&self, name: &str) -> ActsResult<ConfigMap> {
        Ok(self.behavior(name)?.config().clone())
    }

    /// One configuration value of the bound behavior `name`; `Ok(None)` when
    /// the key is absent.
    pub fn behavior_config_value(&self, name: &str, key: &str) -> ActsResult<Option<Value>> {
        Ok(self.behavior(name)?.config_value(key).cloned())
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Forward an unresolved static call to the first bound behavior that
    /// answers `method`.  `DispatchMiss` if none does.
    pub fn call(&self, method: &str, args: &[Value]) -> ActsResult<Value> {
        self.ensure_initialized()?;
        dispatch::dispatch_static(self, method, args)
    }

    /// Forward an unresolved instance call on `entity`.  Installed
    /// capabilities answer first, then the binding-table scan; `DispatchMiss`
    /// if neither does.
    pub fn call_entity(
        &self,
        entity: &mut Entity,
        method: &str,
        args:   &[Value],
    ) -> ActsResult<Value> {
        self.ensure_initialized()?;
        dispatch::dispatch_entity(self, entity, method, args)
    }

    /// Create an entity handle of this model with initial field values.
    pub fn create(&self, fields: ConfigMap) -> Entity {
        Entity::new(self.name.clone(), fields)
    }

    // ── Internal bind path ────────────────────────────────────────────────
    //
    // Everything below skips `ensure_initialized`; the initializer itself
    // binds declared entries through here (see `init` module docs).

    fn resolve(&self, name: &str) -> ActsResult<BehaviorDescriptor> {
        self.locator
            .resolve(BEHAVIOR_KIND, name)
            .ok_or_else(|| ActsError::NotFound {
                kind: BEHAVIOR_KIND.to_string(),
                name: name.to_string(),
            })
    }

    fn bind_resolved(&self, descriptor: BehaviorDescriptor, supplied: ConfigMap) -> ActsResult<()> {
        let BehaviorDescriptor { id, implementation } = descriptor;

        // Merge before touching the table: a Misconfiguration from a custom
        // merge strategy must leave the binding order untouched.
        let instance = Arc::new(BehaviorInstance::new(
            id.clone(),
            self.name.clone(),
            implementation,
            supplied,
        )?);

        let newly_bound = self.bindings.write().upsert(Arc::clone(&instance));
        if newly_bound {
            self.install_capabilities(&instance);
            debug!("model `{}`: bound behavior `{id}`", self.name);
        } else {
            debug!("model `{}`: reconfigured behavior `{id}`", self.name);
        }
        Ok(())
    }

    /// Materialize the capabilities a newly bound behavior contributes.
    ///
    /// Name collisions across behaviors are resolved last-wins: the later
    /// bind replaces the earlier entry, loudly.
    fn install_capabilities(&self, instance: &BehaviorInstance) {
        let contributed = instance
            .implementation()
            .installed_capabilities(&self.name, instance.config());
        if contributed.is_empty() {
            return;
        }

        let mut installed = self.installed.write();
        for (method, capability) in contributed {
            let entry = InstalledCapability {
                behavior: instance.id().clone(),
                capability,
            };
            if let Some(previous) = installed.insert(method.clone(), entry) {
                if previous.behavior != *instance.id() {
                    warn!(
                        "model `{}`: installed capability `{method}` from `{}` replaced by `{}`",
                        self.name,
                        previous.behavior,
                        instance.id()
                    );
                }
            }
        }
    }

    // ── Crate-internal accessors for the dispatcher ───────────────────────

    pub(crate) fn bindings(&self) -> &RwLock<BindingTable> {
        &self.bindings
    }

    pub(crate) fn installed(&self) -> &RwLock<FxHashMap<String, InstalledCapability>> {
        &self.installed
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`ModelType`].
///
/// # Example
///
/// ```rust,ignore
/// let posts = Arc::new(
///     ModelType::builder("Posts", locator)
///         .acts_as("SoftDelete")
///         .acts_as(("Sluggable", json!({"field": "title"})))
///         .build(),
/// );
/// ```
pub struct ModelTypeBuilder {
    name:     ModelName,
    locator:  Arc<dyn Locator>,
    declared: Vec<BehaviorDecl>,
}

impl ModelTypeBuilder {
    /// Append one behavior declaration.  Accepts a bare name (empty config)
    /// or a `(name, config)` pair; entries bind in declaration order on
    /// first use.
    pub fn acts_as(mut self, decl: impl Into<BehaviorDecl>) -> Self {
        self.declared.push(decl.into());
        self
    }

    /// Append a whole declaration list (e.g. from
    /// [`declarations_from_json`][crate::declarations_from_json]).
    pub fn declarations(mut self, decls: Vec<BehaviorDecl>) -> Self {
        self.declared.extend(decls);
        self
    }

    pub fn build(self) -> ModelType {
        ModelType {
            name:      self.name,
            declared:  self.declared,
            locator:   self.locator,
            init:      InitCell::new(),
            bindings:  RwLock::new(BindingTable::new()),
            installed: RwLock::new(FxHashMap::default()),
        }
    }
}
