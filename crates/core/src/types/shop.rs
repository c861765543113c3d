//! Shop domain type.

use core::fmt;

use serde::{Deserialize, Serialize};
use url::Host;

/// Errors that can occur when parsing a [`ShopDomain`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopDomainError {
    /// The input string is empty.
    #[error("shop domain cannot be empty")]
    Empty,
    /// The input is not a bare host (scheme, path, port or invalid characters).
    #[error("shop domain must be a bare host name, got {0:?}")]
    NotAHost(String),
}

/// The host name of a Shopify store, e.g. `crimesaladpodcast.myshopify.com`.
///
/// ## Constraints
///
/// - Non-empty after trimming
/// - A bare host: no scheme, no path, no port
/// - Normalized to lowercase
///
/// ## Examples
///
/// ```
/// use crime_salad_core::ShopDomain;
///
/// assert!(ShopDomain::parse("x.myshopify.com").is_ok());
/// assert!(ShopDomain::parse("").is_err());
/// assert!(ShopDomain::parse("https://x.myshopify.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Parse a `ShopDomain` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not a bare host name.
    pub fn parse(s: &str) -> Result<Self, ShopDomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ShopDomainError::Empty);
        }

        // ':' and '/' are forbidden host code points, so schemes, ports and paths fail here
        match Host::parse(trimmed) {
            Ok(host) => Ok(Self(host.to_string())),
            Err(_) => Err(ShopDomainError::NotAHost(trimmed.to_string())),
        }
    }

    /// Get the host as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storefront API GraphQL endpoint for the given API version.
    #[must_use]
    pub fn graphql_endpoint(&self, api_version: &str) -> String {
        format!("https://{}/api/{api_version}/graphql.json", self.0)
    }

    /// Public product detail page for a product handle.
    #[must_use]
    pub fn product_url(&self, handle: &str) -> String {
        format!("https://{}/products/{}", self.0, urlencoding::encode(handle))
    }

    /// Public "browse all" collection page.
    #[must_use]
    pub fn browse_all_url(&self) -> String {
        format!("https://{}/collections/all", self.0)
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShopDomain {
    type Error = ShopDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShopDomain> for String {
    fn from(shop: ShopDomain) -> Self {
        shop.0
    }
}
