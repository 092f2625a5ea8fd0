//! Static and entity call forwarding.
//!
//! Both paths scan the model's binding table in insertion order and invoke
//! the first behavior whose implementation exposes a matching capability.
//! Only the first match runs — there is no fan-out across behaviors that
//! answer the same name.  No match is a `DispatchMiss`, which the host's own
//! unknown-member handling treats as "try the next layer", not as a failure
//! of this one.
//!
//! Lock discipline: the matched instance is cloned out and every table lock
//! released *before* the capability runs, so a capability may re-enter the
//! model's dispatch or registry operations without deadlocking.

use std::sync::Arc;

use serde_json::Value;

use acts_core::{ActsError, ActsResult, Entity};
use acts_behavior::{BehaviorInstance, EntityCapability, StaticCapability};

use crate::model::ModelType;

/// Forward an unresolved static call on `model`.
pub(crate) fn dispatch_static(
    model:  &ModelType,
    method: &str,
    args:   &[Value],
) -> ActsResult<Value> {
    match find_static(model, method) {
        Some((instance, capability)) => capability(model.name(), &instance, args),
        None => Err(miss(model, method)),
    }
}

/// Forward an unresolved instance call on one entity of `model`.
///
/// Installed capabilities are directly callable members, consulted before
/// the binding-table scan.
pub(crate) fn dispatch_entity(
    model:  &ModelType,
    entity: &mut Entity,
    method: &str,
    args:   &[Value],
) -> ActsResult<Value> {
    if let Some((instance, capability)) = find_installed(model, method) {
        return capability(model.name(), &instance, entity, args);
    }
    match find_entity(model, method) {
        Some((instance, capability)) => capability(model.name(), &instance, entity, args),
        None => Err(miss(model, method)),
    }
}

// ── Table scans ───────────────────────────────────────────────────────────────

fn find_static(
    model:  &ModelType,
    method: &str,
) -> Option<(Arc<BehaviorInstance>, StaticCapability)> {
    let table = model.bindings().read();
    table.iter().find_map(|instance| {
        instance
            .implementation()
            .static_capability(method)
            .map(|capability| (Arc::clone(instance), capability))
    })
}

fn find_entity(
    model:  &ModelType,
    method: &str,
) -> Option<(Arc<BehaviorInstance>, EntityCapability)> {
    let table = model.bindings().read();
    table.iter().find_map(|instance| {
        instance
            .implementation()
            .entity_capability(method)
            .map(|capability| (Arc::clone(instance), capability))
    })
}

/// Look `method` up in the installed-capability table and re-derive the live
/// instance of the contributing behavior.  A contributor that has been
/// unbound since installation makes the entry fall through to the scan.
fn find_installed(
    model:  &ModelType,
    method: &str,
) -> Option<(Arc<BehaviorInstance>, EntityCapability)> {
    let (behavior, capability) = {
        let installed = model.installed().read();
        let entry = installed.get(method)?;
        (entry.behavior.clone(), entry.capability)
    };
    let table = model.bindings().read();
    table
        .get(&behavior)
        .map(|instance| (Arc::clone(instance), capability))
}

fn miss(model: &ModelType, method: &str) -> ActsError {
    ActsError::DispatchMiss {
        model:  model.name().clone(),
        method: method.to_string(),
    }
}
