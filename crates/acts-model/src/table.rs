//! `BindingTable` — ordered per-model behavior bindings.
//!
//! Insertion order is preserved and IS the dispatch search order.  A model
//! binds a handful of behaviors at most, so the table is a plain `Vec` with
//! linear lookup — cheaper than any map until the entry count grows far
//! beyond anything a model declares in practice.

use std::sync::Arc;

use acts_core::BehaviorId;
use acts_behavior::BehaviorInstance;

/// Ordered mapping from behavior id to its bound instance.
///
/// Invariant: at most one entry per [`BehaviorId`].  Re-inserting an id
/// replaces the entry in place, keeping its position in the order.
#[derive(Default)]
pub struct BindingTable {
    entries: Vec<Arc<BehaviorInstance>>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of `id` in binding order, if bound.
    pub fn position(&self, id: &BehaviorId) -> Option<usize> {
        self.entries.iter().position(|instance| instance.id() == id)
    }

    /// Append a new binding, or replace an existing one in place.
    ///
    /// Returns `true` if the id was newly bound, `false` if an existing
    /// binding was replaced (its position unchanged).
    pub fn upsert(&mut self, instance: Arc<BehaviorInstance>) -> bool {
        match self.position(instance.id()) {
            Some(i) => {
                self.entries[i] = instance;
                false
            }
            None => {
                self.entries.push(instance);
                true
            }
        }
    }

    /// Remove the binding for `id`, returning it if present.
    pub fn remove(&mut self, id: &BehaviorId) -> Option<Arc<BehaviorInstance>> {
        let i = self.position(id)?;
        Some(self.entries.remove(i))
    }

    /// The bound instance for `id`, if any.
    pub fn get(&self, id: &BehaviorId) -> Option<&Arc<BehaviorInstance>> {
        self.entries.iter().find(|instance| instance.id() == id)
    }

    pub fn contains(&self, id: &BehaviorId) -> bool {
        self.position(id).is_some()
    }

    /// Iterate bindings in insertion (dispatch) order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<BehaviorInstance>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
