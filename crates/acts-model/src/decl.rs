//! Declared behavior lists.
//!
//! A model declares its behaviors as an ordered sequence of entries, each a
//! bare name or a name with configuration.  The JSON form mirrors that
//! shorthand:
//!
//! ```json
//! ["SoftDelete", {"Sluggable": {"field": "title"}}]
//! ```
//!
//! Bare strings normalize to an empty configuration.  Entries are processed
//! in declaration order by the model's one-time initializer.

use serde::Deserialize;
use serde_json::{Map, Value};

use acts_core::{ActsError, ActsResult};

/// One declared behavior: a name plus the (possibly `Null`) configuration
/// override.  The name is resolved through the locator at bind time; the
/// configuration is coerced at bind time so malformed declarations surface
/// as `Misconfiguration` from initialization, not from construction.
#[derive(Clone, Debug)]
pub struct BehaviorDecl {
    pub name:   String,
    pub config: Value,
}

impl BehaviorDecl {
    pub fn new(name: impl Into<String>, config: Value) -> Self {
        Self { name: name.into(), config }
    }
}

impl From<&str> for BehaviorDecl {
    /// Bare-name shorthand: no configuration override.
    fn from(name: &str) -> Self {
        Self::new(name, Value::Null)
    }
}

impl From<String> for BehaviorDecl {
    fn from(name: String) -> Self {
        Self::new(name, Value::Null)
    }
}

impl From<(&str, Value)> for BehaviorDecl {
    fn from((name, config): (&str, Value)) -> Self {
        Self::new(name, config)
    }
}

// ── JSON form ─────────────────────────────────────────────────────────────────

/// Raw JSON shapes a declaration entry may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum DeclRepr {
    Name(String),
    Configured(Map<String, Value>),
}

impl<'de> Deserialize<'de> for BehaviorDecl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match DeclRepr::deserialize(deserializer)? {
            DeclRepr::Name(name) => Ok(BehaviorDecl::new(name, Value::Null)),
            DeclRepr::Configured(map) => {
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((name, config)), None) => Ok(BehaviorDecl::new(name, config)),
                    _ => Err(serde::de::Error::custom(
                        "behavior declaration object must have exactly one `name: config` entry",
                    )),
                }
            }
        }
    }
}

/// Parse an ordered declaration list from its JSON form.
pub fn declarations_from_json(value: Value) -> ActsResult<Vec<BehaviorDecl>> {
    serde_json::from_value(value)
        .map_err(|e| ActsError::Misconfiguration(format!("invalid behavior declarations: {e}")))
}
