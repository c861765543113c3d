//! The collection query tuple driving a catalog fetch.

use std::num::NonZeroU32;

use super::id::CollectionGid;
use super::shop::{ShopDomain, ShopDomainError};

/// Number of products requested when no limit is given.
pub const DEFAULT_LIMIT: NonZeroU32 = NonZeroU32::new(12).expect("12 is non-zero");

/// Errors that can occur when building a [`CollectionQuery`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The shop domain is invalid.
    #[error("invalid shop domain: {0}")]
    Shop(#[from] ShopDomainError),
    /// The collection identifier is empty.
    #[error("collection id cannot be empty")]
    EmptyCollectionId,
    /// The result limit is zero.
    #[error("limit must be a positive integer")]
    ZeroLimit,
}

/// Inputs of one catalog fetch: `(shop, token, collection, limit)`.
///
/// Two queries are equal when all four components are equal. The fetcher
/// starts a new fetch cycle only when the tuple changes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CollectionQuery {
    shop: ShopDomain,
    token: Option<String>,
    collection: CollectionGid,
    limit: NonZeroU32,
}

impl CollectionQuery {
    /// Build a query, validating the shop and normalizing the collection id.
    ///
    /// Surrounding whitespace is trimmed from the collection id before the
    /// gid prefix is applied, so `" 123 "` and `"123"` name the same
    /// collection. An empty or whitespace-only token is treated as absent. A `None` limit
    /// uses [`DEFAULT_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the shop domain is invalid, the collection id is
    /// empty, or the limit is zero.
    pub fn new(
        shop: &str,
        token: Option<&str>,
        collection: &str,
        limit: Option<u32>,
    ) -> Result<Self, QueryError> {
        let shop = ShopDomain::parse(shop)?;

        let collection = collection.trim();
        if collection.is_empty() {
            return Err(QueryError::EmptyCollectionId);
        }

        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(n) => NonZeroU32::new(n).ok_or(QueryError::ZeroLimit)?,
        };

        Ok(Self {
            shop,
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
            collection: CollectionGid::qualify(collection),
            limit,
        })
    }

    /// The shop being queried.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// The storefront access token, if one was supplied.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The normalized collection gid.
    #[must_use]
    pub const fn collection(&self) -> &CollectionGid {
        &self.collection
    }

    /// Maximum number of products to request.
    #[must_use]
    pub const fn limit(&self) -> NonZeroU32 {
        self.limit
    }
}

impl std::fmt::Debug for CollectionQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionQuery")
            .field("shop", &self.shop)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("collection", &self.collection)
            .field("limit", &self.limit)
            .finish()
    }
}
