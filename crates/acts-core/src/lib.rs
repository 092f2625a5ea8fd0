//! `acts-core` — foundational types for the `rust_acts` behavior framework.
//!
//! This crate is a dependency of every other `acts-*` crate.  It intentionally
//! has no `acts-*` dependencies and minimal external ones (only `serde_json`
//! and `thiserror`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`ids`]    | `ModelName`, `BehaviorId` shared-string newtypes      |
//! | [`config`] | `ConfigMap`, `shallow_merge`, `coerce`                |
//! | [`entity`] | `Entity` — minimal entity handle for dispatch         |
//! | [`error`]  | `ActsError`, `ActsResult`                             |

pub mod config;
pub mod entity;
pub mod error;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ConfigMap;
pub use entity::Entity;
pub use error::{ActsError, ActsResult};
pub use ids::{BehaviorId, ModelName};
