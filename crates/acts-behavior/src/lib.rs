//! `acts-behavior` — the behavior extension point and its supporting types.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`capability`] | `StaticCapability` / `EntityCapability` function types        |
//! | [`behavior`]   | The [`Behavior`] trait                                        |
//! | [`instance`]   | `BehaviorInstance` — one configured binding to one model      |
//! | [`locate`]     | `Locator` trait, `BehaviorDescriptor`, `TableLocator`         |
//! | [`noop`]       | `NoopBehavior` — placeholder with no capabilities             |
//!
//! # Design notes
//!
//! A behavior implementation is shared: one `Arc<dyn Behavior>` may back
//! bindings on any number of model types.  Everything per-model lives in the
//! [`BehaviorInstance`] (the merged configuration and the model back-
//! reference), which is why every capability receives the instance as an
//! argument instead of reading state off the implementation.

pub mod behavior;
pub mod capability;
pub mod instance;
pub mod locate;
pub mod noop;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use behavior::Behavior;
pub use capability::{EntityCapability, StaticCapability};
pub use instance::BehaviorInstance;
pub use locate::{BEHAVIOR_KIND, BehaviorDescriptor, Locator, TableLocator};
pub use noop::NoopBehavior;
