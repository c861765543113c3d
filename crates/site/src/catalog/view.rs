//! Rendering of a [`FetchState`] as the shop grid.

use askama::Template;
use askama_web::WebTemplate;

use crime_salad_core::ShopDomain;

use super::{FetchState, PLACEHOLDER_IMAGE};
use crate::shopify::Product;

/// Number of skeleton tiles shown while loading.
pub const SKELETON_TILES: usize = 8;

/// What the grid shows for one [`FetchState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    /// Placeholder tiles; the page polls for the settled state.
    Loading { skeletons: Vec<usize> },
    /// One line with the failure message.
    Error { message: String },
    /// Call-to-action to browse the full shop, with a hint.
    Empty { browse_url: String },
    /// Product tiles.
    Grid { tiles: Vec<TileView> },
    /// Call-to-action shown when no storefront token is configured.
    MissingCredential { browse_url: String },
}

impl CatalogView {
    /// Build the view for `state` of a collection in `shop`.
    #[must_use]
    pub fn new(shop: &ShopDomain, state: &FetchState) -> Self {
        match state {
            FetchState::NotStarted | FetchState::Loading => Self::Loading {
                skeletons: (0..SKELETON_TILES).collect(),
            },
            FetchState::Error(message) => Self::Error {
                message: message.clone(),
            },
            FetchState::Loaded(products) if products.is_empty() => Self::Empty {
                browse_url: shop.browse_all_url(),
            },
            FetchState::Loaded(products) => Self::Grid {
                tiles: products.iter().map(|p| TileView::new(shop, p)).collect(),
            },
            FetchState::MissingCredential => Self::MissingCredential {
                browse_url: shop.browse_all_url(),
            },
        }
    }

    /// Whether the browser should poll for a newer state.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// One product tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub id: String,
    /// Public product page on the shop.
    pub href: String,
    pub title: String,
    /// Price label; not rendered when empty.
    pub price: String,
    pub image: TileImage,
}

impl TileView {
    fn new(shop: &ShopDomain, product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            href: shop.product_url(&product.handle),
            title: product.title.clone(),
            price: product.price_label.clone(),
            image: TileImage::new(&product.image_url, &product.image_alt),
        }
    }
}

/// Tile image with its load-failure fallback.
///
/// A tile may swap to [`PLACEHOLDER_IMAGE`] at most once, and never when it
/// already shows the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileImage {
    pub src: String,
    pub alt: String,
    pub fallback_applied: bool,
}

impl TileImage {
    #[must_use]
    pub fn new(src: &str, alt: &str) -> Self {
        Self {
            src: src.to_string(),
            alt: alt.to_string(),
            fallback_applied: false,
        }
    }

    /// Image to swap to if `src` fails to load, while a swap is still allowed.
    #[must_use]
    pub fn fallback_src(&self) -> Option<&'static str> {
        (!self.fallback_applied && self.src != PLACEHOLDER_IMAGE).then_some(PLACEHOLDER_IMAGE)
    }

    /// Apply the load-failure rule. Returns whether the image changed.
    pub fn on_load_error(&mut self) -> bool {
        let Some(fallback) = self.fallback_src() else {
            return false;
        };
        self.src = fallback.to_string();
        self.fallback_applied = true;
        true
    }
}

/// Shop grid fragment, also included by the home page.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/grid.html")]
pub struct CatalogGridTemplate {
    pub view: CatalogView,
}

impl CatalogGridTemplate {
    #[must_use]
    pub fn new(shop: &ShopDomain, state: &FetchState) -> Self {
        Self {
            view: CatalogView::new(shop, state),
        }
    }
}
