//! Newtype Shopify global IDs for type-safe resource references.
//!
//! Shopify identifies resources with `gid://shopify/<Resource>/<id>` strings.
//! Use the `define_gid!` macro to create wrappers that know their resource
//! name and can qualify a bare numeric id.

/// Scheme prefix shared by every Shopify global ID.
pub const GID_SCHEME: &str = "gid://";

/// Macro to define a type-safe Shopify global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `qualify()` which prepends `gid://shopify/<Resource>/` when absent
/// - `as_str()`, `Display`, and `From<String>` (opaque, unqualified wrap)
///
/// # Example
///
/// ```rust
/// # use crime_salad_core::define_gid;
/// define_gid!(CollectionGid, "Collection");
///
/// let gid = CollectionGid::qualify("123");
/// assert_eq!(gid.as_str(), "gid://shopify/Collection/123");
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident, $resource:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix prepended to bare ids of this resource type.
            pub const PREFIX: &'static str = concat!("gid://shopify/", $resource, "/");

            /// Qualify an identifier, prepending the resource prefix unless the
            /// value already carries the `gid://` scheme.
            #[must_use]
            pub fn qualify(raw: &str) -> Self {
                if raw.starts_with($crate::types::id::GID_SCHEME) {
                    Self(raw.to_string())
                } else {
                    Self(format!("{}{raw}", Self::PREFIX))
                }
            }

            /// Get the underlying gid string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(gid: String) -> Self {
                Self(gid)
            }
        }

        impl From<$name> for String {
            fn from(gid: $name) -> Self {
                gid.0
            }
        }
    };
}

define_gid!(CollectionGid, "Collection");
define_gid!(ProductGid, "Product");
