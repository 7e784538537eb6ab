//! Newtype IDs for type-safe entity references.
//!
//! Commerce platform entities are identified by global IDs such as
//! `gid://shopify/Product/8012345678901`. Use the `define_gid!` macro to create
//! wrappers that prevent accidentally mixing IDs from different entity types.

/// Macro to define a type-safe global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `legacy_id()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use flightdeck_core::define_gid;
/// define_gid!(ProductId);
/// define_gid!(CollectionId);
///
/// let product_id = ProductId::new("gid://shopify/Product/1");
/// assert_eq!(product_id.legacy_id(), "1");
///
/// // These are different types, so this won't compile:
/// // let _: CollectionId = product_id;
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a global ID string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the global ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The trailing numeric segment of the global ID.
            ///
            /// Returns the whole value when it is not a `gid://` path.
            #[must_use]
            pub fn legacy_id(&self) -> &str {
                self.0.rsplit('/').next().unwrap_or(&self.0)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_gid!(ProductId);
define_gid!(CollectionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_id_from_gid() {
        let id = ProductId::new("gid://shopify/Product/8012345678901");
        assert_eq!(id.legacy_id(), "8012345678901");
    }

    #[test]
    fn test_legacy_id_plain_value() {
        let id = ProductId::new("flight-suit");
        assert_eq!(id.legacy_id(), "flight-suit");
    }

    #[test]
    fn test_serde_transparent() {
        let id = CollectionId::from("gid://shopify/Collection/42");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"gid://shopify/Collection/42\"");
    }
}
