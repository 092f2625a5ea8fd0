//! A behavior with no capabilities and no defaults.

use crate::Behavior;

/// A [`Behavior`] that answers nothing and declares nothing.
///
/// Useful as a placeholder in tests or as a binding whose only purpose is to
/// mark a model (presence checked via `has_behavior`).
pub struct NoopBehavior;

impl Behavior for NoopBehavior {}
