//! Behavior configuration mappings and the default merge strategy.
//!
//! A behavior's configuration is a flat mapping from string keys to arbitrary
//! JSON values.  The final configuration of a bound behavior is always the
//! result of merging the caller-supplied overrides on top of the behavior's
//! declared defaults.  The default strategy here is a shallow merge; a
//! behavior kind that needs something richer (deep merge of nested mappings,
//! shorthand normalization) overrides `Behavior::merge_config` in
//! `acts-behavior` and calls whatever helper it likes.

use serde_json::{Map, Value};

use crate::{ActsError, ActsResult};

/// A configuration mapping: string keys to arbitrary JSON values, keys unique.
pub type ConfigMap = Map<String, Value>;

/// Shallow merge of `supplied` over `defaults`.
///
/// Keys present in `supplied` win; keys present only in `defaults` are
/// carried through unchanged.  Values are moved, not cloned.  Never fails.
pub fn shallow_merge(supplied: ConfigMap, defaults: ConfigMap) -> ConfigMap {
    let mut merged = defaults;
    for (key, value) in supplied {
        merged.insert(key, value);
    }
    merged
}

/// Coerce a caller-supplied JSON value into a [`ConfigMap`].
///
/// `Null` means "no overrides" and yields an empty map.  Anything other than
/// a JSON object is a [`ActsError::Misconfiguration`] — this is the only
/// place that error originates.
pub fn coerce(value: Value) -> ActsResult<ConfigMap> {
    match value {
        Value::Null => Ok(ConfigMap::new()),
        Value::Object(map) => Ok(map),
        other => Err(ActsError::Misconfiguration(format!(
            "configuration must be a mapping, got {}",
            type_name(&other)
        ))),
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
