//! Plain records owned by the three components.
//!
//! Each record implements [`ActorEntity`](actor_framework::ActorEntity) in its
//! component's `entity` module; the types here only carry data and the small state
//! transitions that belong to the record itself.

/// Declares a string-backed identifier newtype.
///
/// Identifiers are opaque to every component: nothing parses them, and a reference
/// held by one record is never checked against the component that minted it.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

pub(crate) use string_id;

pub mod order;
pub mod payment;
pub mod product;

pub use order::*;
pub use payment::*;
pub use product::*;
