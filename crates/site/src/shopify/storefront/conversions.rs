//! Conversions from Storefront response shapes to domain types.

use crime_salad_core::{Money, ProductGid};

use crate::catalog::PLACEHOLDER_IMAGE;
use crate::shopify::types::{CollectionPage, Image, Product};

use super::queries::{
    CollectionProductsData, Connection, ImageNode, MoneyNode, PriceRangeNode, ProductNode,
};

/// Map a decoded `CollectionProducts` payload to a [`CollectionPage`].
///
/// A null `data`, a missing collection, a missing product connection or null
/// `edges` all yield an empty page. Edges with a null node are skipped.
#[must_use]
pub fn convert_collection_products(data: Option<CollectionProductsData>) -> CollectionPage {
    let Some(collection) = data.and_then(|d| d.collection) else {
        return CollectionPage {
            title: None,
            products: Vec::new(),
        };
    };

    let products = collection
        .products
        .map(|conn| nodes(conn).map(convert_product).collect())
        .unwrap_or_default();

    CollectionPage {
        title: collection.title,
        products,
    }
}

fn nodes<T>(conn: Connection<T>) -> impl Iterator<Item = T> {
    conn.edges.into_iter().flatten().filter_map(|edge| edge.node)
}

fn convert_image(node: ImageNode) -> Image {
    Image {
        url: node.url.unwrap_or_default(),
        alt_text: node.alt_text.filter(|alt| !alt.is_empty()),
    }
}

fn convert_money(node: MoneyNode) -> Option<Money> {
    Some(Money::new(node.amount?, node.currency_code.unwrap_or_default()))
}

fn convert_price(range: Option<PriceRangeNode>) -> Option<Money> {
    range?.min_variant_price.and_then(convert_money)
}

fn convert_product(node: ProductNode) -> Product {
    let title = node.title.unwrap_or_default();
    let featured_image = node.featured_image.map(convert_image);
    let images: Vec<Image> = node
        .images
        .map(|conn| nodes(conn).map(convert_image).collect())
        .unwrap_or_default();
    let min_price = convert_price(node.price_range);

    let featured = featured_image.as_ref().filter(|img| !img.url.is_empty());
    let fallback = images.iter().find(|img| !img.url.is_empty());

    let image_url = featured
        .or(fallback)
        .map_or_else(|| PLACEHOLDER_IMAGE.to_string(), |img| img.url.clone());

    // Alt text falls through independently of which URL won.
    let image_alt = featured_image
        .as_ref()
        .and_then(|img| img.alt_text.clone())
        .or_else(|| fallback.and_then(|img| img.alt_text.clone()))
        .unwrap_or_else(|| title.clone());

    let price_label = Money::label(min_price.as_ref());

    Product {
        id: ProductGid::from(node.id.unwrap_or_default()),
        title,
        handle: node.handle.unwrap_or_default(),
        featured_image,
        images,
        min_price,
        image_url,
        image_alt,
        price_label,
    }
}
