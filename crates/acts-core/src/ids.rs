//! Cheap-to-clone string identity newtypes.
//!
//! Behavior bindings, entities, and installed-capability entries all carry
//! identity back-references.  Wrapping the name in an `Arc<str>` makes those
//! references a pointer copy rather than a string clone, and a distinct type
//! per role keeps a model name from being passed where a behavior identifier
//! is expected.

use std::fmt;
use std::sync::Arc;

/// Generate a shared-string identity wrapper.
macro_rules! named_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(Arc<str>);

        impl $name {
            pub fn new(name: impl AsRef<str>) -> Self {
                Self(Arc::from(name.as_ref()))
            }

            /// View the wrapped name.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(Arc::from(name))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

named_id! {
    /// Identity of a model type (e.g. `"Posts"`).
    ///
    /// Carried by behavior instances and entities as the non-owning
    /// back-reference to the model they belong to.
    pub struct ModelName;
}

named_id! {
    /// Resolved behavior implementation identifier, as produced by a
    /// `Locator` (e.g. `"extensions/behavior/Sluggable"`).
    ///
    /// Binding tables key on this, not on the short behavior name — two
    /// short names resolving to the same implementation share one binding.
    pub struct BehaviorId;
}
