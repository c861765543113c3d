//! GraphQL documents and response shapes for the Storefront API.
//!
//! Only the fields the collection grid consumes are modelled. Every nested
//! object is optional so that a missing collection or connection decodes to
//! "no products" instead of a parse error.

use std::num::NonZeroU32;

use graphql_client::QueryBody;
use serde::{Deserialize, Serialize};

use crime_salad_core::CollectionGid;

/// Operation name sent alongside [`COLLECTION_PRODUCTS`].
pub const COLLECTION_PRODUCTS_OPERATION: &str = "CollectionProducts";

/// Collection title plus the first `$first` products with their featured image,
/// up to four additional images, and the minimum variant price.
pub const COLLECTION_PRODUCTS: &str = r"query CollectionProducts($id: ID!, $first: Int!) {
  collection(id: $id) {
    title
    products(first: $first) {
      edges {
        node {
          id
          title
          handle
          featuredImage {
            url(transform: {maxWidth: 800, preferredContentType: WEBP, crop: CENTER})
            altText
          }
          images(first: 4) {
            edges {
              node {
                url(transform: {maxWidth: 800, preferredContentType: WEBP, crop: CENTER})
                altText
              }
            }
          }
          priceRange {
            minVariantPrice {
              amount
              currencyCode
            }
          }
        }
      }
    }
  }
}";

/// Variables of [`COLLECTION_PRODUCTS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionProductsVariables {
    /// Fully qualified collection gid.
    pub id: String,
    /// Number of products to request.
    pub first: u32,
}

/// Build the request body for a collection fetch.
#[must_use]
pub fn collection_products(
    collection: &CollectionGid,
    limit: NonZeroU32,
) -> QueryBody<CollectionProductsVariables> {
    QueryBody {
        variables: CollectionProductsVariables {
            id: collection.as_str().to_string(),
            first: limit.get(),
        },
        query: COLLECTION_PRODUCTS,
        operation_name: COLLECTION_PRODUCTS_OPERATION,
    }
}

// =============================================================================
// Response shapes
// =============================================================================

/// `data` of a [`COLLECTION_PRODUCTS`] response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionProductsData {
    pub collection: Option<CollectionNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionNode {
    pub title: Option<String>,
    pub products: Option<Connection<ProductNode>>,
}

/// A GraphQL connection; only `edges` is requested.
///
/// `edges` may be missing or `null`; both read as no edges.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    pub edges: Option<Vec<Edge<T>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: Option<String>,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub featured_image: Option<ImageNode>,
    pub images: Option<Connection<ImageNode>>,
    pub price_range: Option<PriceRangeNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub url: Option<String>,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeNode {
    pub min_variant_price: Option<MoneyNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyNode {
    pub amount: Option<String>,
    pub currency_code: Option<String>,
}
