//! Crime Salad Core - Shared catalog types.
//!
//! This crate provides the types used by the site binary and the CLI:
//! - `site` - Landing page server with the shop collection grid
//! - `cli` - Terminal front-end for fetching a collection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Anything that
//! talks to Shopify lives in the site crate.
//!
//! # Modules
//!
//! - [`types`] - Validated shop domains, collection gids, money and the
//!   collection query tuple

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
