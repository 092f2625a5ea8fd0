//! Framework error type.
//!
//! A single shared enum covers the whole workspace — the four kinds below are
//! cross-cutting (binding, resolution, dispatch, configuration) and every
//! `acts-*` crate surfaces them unchanged.  The enum is `Clone` because the
//! one-time initializer records the first failure and replays it to every
//! later caller.

use thiserror::Error;

use crate::{BehaviorId, ModelName};

/// The top-level error type for all `acts-*` crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActsError {
    /// An `unbind` or lookup targeted a behavior that is not bound to the
    /// model.
    #[error("behavior `{behavior}` is not bound to model `{model}`")]
    NotBound {
        model:    ModelName,
        behavior: BehaviorId,
    },

    /// The locator could not resolve a declared or requested name.
    #[error("no {kind} implementation registered under `{name}`")]
    NotFound { kind: String, name: String },

    /// No bound behavior answered a forwarded call.
    ///
    /// Not necessarily an error to the end caller: the host model's own
    /// unknown-member handling matches on this variant and applies its own
    /// default (typically raising its generic "unknown member" error).
    #[error("model `{model}` has no bound behavior handling `{method}`")]
    DispatchMiss { model: ModelName, method: String },

    /// Non-mapping or otherwise invalid configuration supplied to a merge.
    #[error("invalid behavior configuration: {0}")]
    Misconfiguration(String),
}

/// Shorthand result type for all `acts-*` crates.
pub type ActsResult<T> = Result<T, ActsError>;
