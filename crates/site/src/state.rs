//! Application state shared across handlers.

use std::sync::Arc;

use crime_salad_core::ShopDomain;

use crate::catalog::CatalogFetcher;
use crate::config::SiteConfig;
use crate::content::PageContent;
use crate::shopify::{ShopifyError, StorefrontClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    content: PageContent,
    catalog: CatalogFetcher<StorefrontClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Storefront HTTP client cannot be built.
    pub fn new(config: SiteConfig) -> Result<Self, ShopifyError> {
        let client = StorefrontClient::new(&config.shopify)?;
        Ok(Self::with_catalog(config, CatalogFetcher::new(client)))
    }

    /// Create state around an existing fetcher.
    #[must_use]
    pub fn with_catalog(config: SiteConfig, catalog: CatalogFetcher<StorefrontClient>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                content: PageContent::default(),
                catalog,
            }),
        }
    }

    /// Submit the configured collection query to the fetcher.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_catalog(&self) -> bool {
        self.inner
            .catalog
            .set_query(self.inner.config.shopify.query.clone())
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Static page copy.
    #[must_use]
    pub fn content(&self) -> &PageContent {
        &self.inner.content
    }

    /// Fetcher holding the shop grid state.
    #[must_use]
    pub fn catalog(&self) -> &CatalogFetcher<StorefrontClient> {
        &self.inner.catalog
    }

    /// Shop the grid links to.
    #[must_use]
    pub fn shop(&self) -> &ShopDomain {
        self.inner.config.shopify.query.shop()
    }
}
