//! Capability function types.
//!
//! A capability is a named operation a behavior answers on behalf of a model.
//! Capabilities are plain function pointers — behaviors are stateless apart
//! from their configuration, which arrives through the `BehaviorInstance`
//! argument at call time, so there is nothing for a closure to capture.

use serde_json::Value;

use acts_core::{ActsResult, Entity, ModelName};

use crate::BehaviorInstance;

/// A capability callable in static context (on the model type itself).
///
/// Invoked as `(model, instance, args)`: the owning model's name, the bound
/// instance whose configuration applies, and the original call arguments.
pub type StaticCapability =
    fn(&ModelName, &BehaviorInstance, &[Value]) -> ActsResult<Value>;

/// A capability callable in instance context (on one entity of the model).
///
/// Same shape as [`StaticCapability`] with the entity handle inserted before
/// the arguments.
pub type EntityCapability =
    fn(&ModelName, &BehaviorInstance, &mut Entity, &[Value]) -> ActsResult<Value>;
