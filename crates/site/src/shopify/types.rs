//! Domain types for the Shopify Storefront API.
//!
//! These types provide a clean API separate from the raw response shapes in
//! `storefront::queries`.

use serde::{Deserialize, Serialize};

pub use crime_salad_core::{Money, ProductGid};

/// Product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL (transformed to at most 800px WEBP). May be empty.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

/// A product in a collection, immutable once mapped from a response.
///
/// `image_url`, `image_alt` and `price_label` are resolved once at mapping
/// time; rendering never re-derives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Shopify product gid (opaque).
    pub id: ProductGid,
    /// Product title.
    pub title: String,
    /// URL slug for the public product page.
    pub handle: String,
    /// Featured image, if the product has one.
    pub featured_image: Option<Image>,
    /// Up to four additional images, in response order.
    pub images: Vec<Image>,
    /// Minimum variant price.
    pub min_price: Option<Money>,
    /// Image shown on the tile after fallback resolution.
    pub image_url: String,
    /// Alt text shown on the tile after fallback resolution.
    pub image_alt: String,
    /// `"<amount> <currency>"`, or empty when there is no price.
    pub price_label: String,
}

/// One page of a collection as returned by a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionPage {
    /// Collection title, absent when the collection was not found.
    pub title: Option<String>,
    /// Products in response order.
    pub products: Vec<Product>,
}
