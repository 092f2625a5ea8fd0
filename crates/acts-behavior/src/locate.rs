//! Name-to-implementation resolution.
//!
//! The core never discovers behavior implementations on its own — the host
//! framework supplies a [`Locator`] and the registry asks it to resolve every
//! name it is given, each time the name is used.  [`TableLocator`] is a
//! map-backed implementation intended for tests, demos, and hosts without a
//! class-path resolver of their own.

use std::collections::HashMap;
use std::sync::Arc;

use acts_core::BehaviorId;

use crate::Behavior;

/// The lookup kind the registry passes for every behavior resolution.
pub const BEHAVIOR_KIND: &str = "behavior";

// ── BehaviorDescriptor ────────────────────────────────────────────────────────

/// The result of a successful lookup: the resolved implementation identifier
/// and a handle to the shared implementation.
///
/// Descriptors are produced per lookup and never stored by the registry.
#[derive(Clone)]
pub struct BehaviorDescriptor {
    /// Resolved implementation identifier — the binding-table key.
    pub id: BehaviorId,
    /// The implementation itself.
    pub implementation: Arc<dyn Behavior>,
}

impl BehaviorDescriptor {
    pub fn new(id: impl Into<BehaviorId>, implementation: Arc<dyn Behavior>) -> Self {
        Self { id: id.into(), implementation }
    }
}

// ── Locator ───────────────────────────────────────────────────────────────────

/// Resolves an implementation name of a given kind to a descriptor.
///
/// Supplied by the host.  `kind` is [`BEHAVIOR_KIND`] for every lookup this
/// framework issues; the parameter exists so a host with a general
/// kind-and-name class-path resolver can expose it through one object.
///
/// Returning `None` is not an error at this layer — callers decide whether
/// an unresolved name is a `NotFound` failure (bind, unbind, lookup) or a
/// plain `false` (`has_behavior`).
pub trait Locator: Send + Sync + 'static {
    fn resolve(&self, kind: &str, name: &str) -> Option<BehaviorDescriptor>;
}

// ── TableLocator ──────────────────────────────────────────────────────────────

/// A locator backed by an in-memory (kind, name) table.
///
/// ```rust,ignore
/// let locator = TableLocator::new()
///     .with("Sluggable", BehaviorDescriptor::new("behavior/Sluggable", Arc::new(Sluggable)))
///     .with("Fly", BehaviorDescriptor::new("behavior/Fly", Arc::new(Fly)));
/// ```
#[derive(Default)]
pub struct TableLocator {
    entries: HashMap<(String, String), BehaviorDescriptor>,
}

impl TableLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a behavior under `name` (fluent form).
    pub fn with(mut self, name: impl Into<String>, descriptor: BehaviorDescriptor) -> Self {
        self.register(BEHAVIOR_KIND, name, descriptor);
        self
    }

    /// Register a descriptor under an arbitrary kind and name.
    pub fn register(
        &mut self,
        kind:       impl Into<String>,
        name:       impl Into<String>,
        descriptor: BehaviorDescriptor,
    ) {
        self.entries.insert((kind.into(), name.into()), descriptor);
    }
}

impl Locator for TableLocator {
    fn resolve(&self, kind: &str, name: &str) -> Option<BehaviorDescriptor> {
        self.entries
            .get(&(kind.to_string(), name.to_string()))
            .cloned()
    }
}
