//! Core types for the Crime Salad site.
//!
//! This module provides type-safe wrappers for the inputs of a catalog fetch.

pub mod id;
pub mod price;
pub mod query;
pub mod shop;

pub use id::*;
pub use price::Money;
pub use query::{CollectionQuery, DEFAULT_LIMIT, QueryError};
pub use shop::{ShopDomain, ShopDomainError};
