//! `acts-model` — per-model behavior bindings and call dispatch.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`decl`]     | `BehaviorDecl` — declared behavior list entries + JSON form  |
//! | [`table`]    | `BindingTable` — ordered id → instance mapping               |
//! | [`init`]     | `InitCell` — once-only declaration processing                |
//! | [`dispatch`] | static / entity call forwarding                              |
//! | [`model`]    | [`ModelType`] facade and its builder                         |
//!
//! # Design notes
//!
//! Each [`ModelType`] owns its binding state outright — the table is a field,
//! not an entry in some global map keyed by type name.  The host constructs
//! one `ModelType` per data-model class (usually inside an `Arc`), threads it
//! through wherever that class's context is available, and routes its own
//! unknown-member handling into [`ModelType::call`] /
//! [`ModelType::call_entity`].
//!
//! First use of a model runs its declared behavior list through the bind path
//! exactly once, even under concurrent first access; see [`init`].

pub mod decl;
pub mod dispatch;
pub mod init;
pub mod model;
pub mod table;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use decl::{BehaviorDecl, declarations_from_json};
pub use model::{BehaviorRef, ModelType, ModelTypeBuilder};
pub use table::BindingTable;
