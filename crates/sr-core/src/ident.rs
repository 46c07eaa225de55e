//! Strongly-typed identifier newtypes for schema coordinates.
//!
//! Owners and object names arrive from catalog metadata already in their
//! canonical (dictionary) case, so the newtypes store them verbatim and
//! compare them exactly. The only invariant enforced here is non-emptiness;
//! both types share their impls through one macro.

/// Define a non-empty identifier newtype with the standard trait surface.
macro_rules! define_ident {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        $vis struct $Name(String);

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $Name::try_new(s).ok_or_else(|| {
                    serde::de::Error::custom(concat!(stringify!($Name), " must not be empty"))
                })
            }
        }

        impl $Name {
            /// Create a new identifier, panicking if it is empty.
            ///
            /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
            pub fn new(s: impl Into<String>) -> Self {
                let s = s.into();
                assert!(!s.is_empty(), concat!(stringify!($Name), " must not be empty"));
                Self(s)
            }

            /// Try to create an identifier, returning `None` if it is empty.
            pub fn try_new(s: impl Into<String>) -> Option<Self> {
                let s = s.into();
                if s.is_empty() {
                    None
                } else {
                    Some(Self(s))
                }
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $Name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<&str> for $Name {
            type Error = &'static str;
            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::try_new(s).ok_or(concat!(stringify!($Name), " must not be empty"))
            }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == **other
            }
        }
    };
}

define_ident! {
    /// A schema/owner name (e.g. `HR`, `PUBLIC`).
    pub struct OwnerName;
}

define_ident! {
    /// An object name within a schema (e.g. `EMPLOYEES`, `PKG_BILLING`).
    pub struct ObjectName;
}

impl OwnerName {
    /// The well-known owner of public synonyms.
    pub fn public() -> Self {
        Self("PUBLIC".to_string())
    }

    /// Whether this owner is the public synonym owner.
    pub fn is_public(&self) -> bool {
        self.0 == "PUBLIC"
    }
}

#[cfg(test)]
#[path = "ident_test.rs"]
mod tests;
