//! Shop collection catalog: fetch state and its rendering.
//!
//! # Architecture
//!
//! - [`fetch_collection`] performs one Storefront request and maps the result
//! - [`CatalogFetcher`] owns the [`FetchState`] for the current
//!   [`CollectionQuery`] and runs one task per query change
//! - [`CatalogView`] is a pure function of a `FetchState`
//!
//! The network sits behind [`CatalogTransport`] so the fetcher can be driven
//! by in-memory transports in tests.

pub mod fetcher;
pub mod view;

use std::future::Future;
use std::sync::Arc;

use graphql_client::QueryBody;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crime_salad_core::{CollectionQuery, ShopDomain};

use crate::shopify::{
    CollectionPage, CollectionProductsData, CollectionProductsVariables, GraphQLReply, Product,
    ShopifyError, collection_products, convert_collection_products, decode_response,
};

pub use fetcher::{CatalogFetcher, CatalogSnapshot};
pub use view::{CatalogGridTemplate, CatalogView, SKELETON_TILES, TileImage, TileView};

/// Image shown when a product has no usable image URL, and the one a tile
/// swaps to when its image fails to load.
pub const PLACEHOLDER_IMAGE: &str = concat!(
    "data:image/svg+xml;utf8,",
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="800">"#,
    r#"<rect width="100%" height="100%" fill="%2318181b"/>"#,
    r#"<text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" "#,
    r#"fill="%23a1a1aa" font-family="Arial, Helvetica, sans-serif" font-size="20">"#,
    "Image unavailable</text></svg>",
);

/// Message used when the API reports an error without any message text.
pub const API_ERROR_FALLBACK: &str = "Storefront API error";

/// Outbound POST of a collection query to the Storefront API.
pub trait CatalogTransport: Send + Sync + 'static {
    /// Send `body` to `shop` with the given access token.
    fn post_graphql(
        &self,
        shop: &ShopDomain,
        token: &str,
        body: &QueryBody<CollectionProductsVariables>,
    ) -> impl Future<Output = Result<GraphQLReply, ShopifyError>> + Send;
}

/// Why a fetch cycle ended in [`FetchState::Error`].
///
/// `Display` is the exact message the view shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Network failure, timeout, unexpected status or unparseable body.
    #[error("{0}")]
    Transport(String),

    /// The response carried a GraphQL `errors` payload.
    #[error("{0}")]
    Api(String),

    /// No access token was supplied, so no request could be made.
    #[error("Storefront access token is missing")]
    MissingToken,
}

impl From<ShopifyError> for CatalogError {
    fn from(err: ShopifyError) -> Self {
        match err {
            ShopifyError::GraphQL(errors) => Self::Api(
                errors
                    .into_iter()
                    .next()
                    .map(|e| e.message)
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| API_ERROR_FALLBACK.to_string()),
            ),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Lifecycle of one fetch cycle.
///
/// `NotStarted -> Loading -> Error | Loaded`, or `NotStarted ->
/// MissingCredential` when the query has no token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    /// No query has been submitted yet.
    #[default]
    NotStarted,
    /// A request is outstanding.
    Loading,
    /// The request failed; holds the message to display.
    Error(String),
    /// The request succeeded; products in response order, possibly empty.
    Loaded(Arc<[Product]>),
    /// No token was supplied; no request is made.
    MissingCredential,
}

impl FetchState {
    /// Whether the current cycle has reached a terminal state.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(
            self,
            Self::Error(_) | Self::Loaded(_) | Self::MissingCredential
        )
    }

    /// Short name used in logs and the CLI.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Loaded(_) => "loaded",
            Self::MissingCredential => "missing_credential",
        }
    }

    /// Loaded products, if any.
    #[must_use]
    pub fn products(&self) -> Option<&[Product]> {
        match self {
            Self::Loaded(products) => Some(products),
            _ => None,
        }
    }
}

impl From<Result<CollectionPage, CatalogError>> for FetchState {
    fn from(result: Result<CollectionPage, CatalogError>) -> Self {
        match result {
            Ok(page) => Self::Loaded(page.products.into()),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

/// Fetch one page of a collection.
///
/// Sends exactly one request. A missing collection or product connection is
/// an empty page, not an error.
///
/// # Errors
///
/// Returns [`CatalogError::MissingToken`] without sending anything when the
/// query has no token, [`CatalogError::Api`] when the response carries GraphQL
/// errors, and [`CatalogError::Transport`] for everything else that goes wrong.
#[instrument(
    skip(transport, query),
    fields(shop = %query.shop(), collection = %query.collection(), limit = query.limit().get())
)]
pub async fn fetch_collection<T: CatalogTransport>(
    transport: &T,
    query: &CollectionQuery,
) -> Result<CollectionPage, CatalogError> {
    let token = query.token().ok_or(CatalogError::MissingToken)?;
    let body = collection_products(query.collection(), query.limit());

    let reply = transport
        .post_graphql(query.shop(), token, &body)
        .await
        .inspect_err(|e| warn!(error = %e, "Storefront request failed"))?;

    let data = decode_response::<CollectionProductsData>(&reply)
        .inspect_err(|e| warn!(error = %e, "Storefront response rejected"))?;

    let page = convert_collection_products(data);
    debug!(
        title = page.title.as_deref().unwrap_or_default(),
        products = page.products.len(),
        "Fetched collection"
    );

    Ok(page)
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transports shared by the catalog tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::oneshot;

    use super::*;

    /// Answers every request with the same reply and counts calls.
    pub struct StaticTransport {
        reply: GraphQLReply,
        pub calls: AtomicUsize,
        pub tokens: Mutex<Vec<String>>,
    }

    impl StaticTransport {
        pub fn new(body: &str) -> Self {
            Self {
                reply: GraphQLReply::ok(body),
                calls: AtomicUsize::new(0),
                tokens: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CatalogTransport for StaticTransport {
        async fn post_graphql(
            &self,
            _shop: &ShopDomain,
            token: &str,
            _body: &QueryBody<CollectionProductsVariables>,
        ) -> Result<GraphQLReply, ShopifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut tokens) = self.tokens.lock() {
                tokens.push(token.to_string());
            }
            Ok(self.reply.clone())
        }
    }

    /// Holds each request until the test releases it through a oneshot.
    ///
    /// Requests take gates in arrival order; `completed` counts requests that
    /// have returned to the caller.
    pub struct GatedTransport {
        gates: Mutex<VecDeque<oneshot::Receiver<GraphQLReply>>>,
        pub completed: AtomicUsize,
    }

    impl GatedTransport {
        pub fn new(n: usize) -> (Self, Vec<oneshot::Sender<GraphQLReply>>) {
            let (senders, receivers): (Vec<_>, VecDeque<_>) =
                (0..n).map(|_| oneshot::channel()).unzip();
            (
                Self {
                    gates: Mutex::new(receivers),
                    completed: AtomicUsize::new(0),
                },
                senders,
            )
        }

        pub fn completed(&self) -> usize {
            self.completed.load(Ordering::SeqCst)
        }
    }

    impl CatalogTransport for GatedTransport {
        async fn post_graphql(
            &self,
            _shop: &ShopDomain,
            _token: &str,
            _body: &QueryBody<CollectionProductsVariables>,
        ) -> Result<GraphQLReply, ShopifyError> {
            let gate = {
                let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
                gates.pop_front()
            };
            let reply = match gate {
                Some(rx) => rx.await.unwrap_or_else(|_| GraphQLReply::ok("{}")),
                None => GraphQLReply::ok("{}"),
            };
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(reply)
        }
    }

    /// A collection response with `n` products named `Product 1..=n`.
    pub fn collection_body(n: usize) -> String {
        let edges: Vec<String> = (1..=n)
            .map(|i| {
                format!(
                    r#"{{"node":{{"id":"gid://shopify/Product/{i}","title":"Product {i}","handle":"product-{i}",
                    "featuredImage":{{"url":"https://cdn.shopify.com/p{i}.webp","altText":"Alt {i}"}},
                    "images":{{"edges":[]}},
                    "priceRange":{{"minVariantPrice":{{"amount":"{i}.00","currencyCode":"USD"}}}}}}}}"#
                )
            })
            .collect();
        format!(
            r#"{{"data":{{"collection":{{"title":"Merch","products":{{"edges":[{}]}}}}}}}}"#,
            edges.join(",")
        )
    }

    pub fn query(collection: &str, token: Option<&str>) -> CollectionQuery {
        CollectionQuery::new("x.myshopify.com", token, collection, Some(4))
            .unwrap_or_else(|e| panic!("query should build: {e}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reqwest::StatusCode;

    use super::testing::{StaticTransport, collection_body, query};
    use super::*;
    use crate::shopify::GraphQLError;

    #[tokio::test]
    async fn test_fetch_collection_maps_products_in_order() {
        let transport = StaticTransport::new(&collection_body(4));
        let page = fetch_collection(&transport, &query("123", Some("t")))
            .await
            .unwrap();

        assert_eq!(transport.calls(), 1);
        assert_eq!(page.title.as_deref(), Some("Merch"));
        let handles: Vec<_> = page.products.iter().map(|p| p.handle.as_str()).collect();
        assert_eq!(
            handles,
            ["product-1", "product-2", "product-3", "product-4"]
        );
        assert_eq!(page.products[0].price_label, "1.00 USD");
    }

    #[tokio::test]
    async fn test_fetch_collection_sends_token() {
        let transport = StaticTransport::new(&collection_body(0));
        fetch_collection(&transport, &query("123", Some("t")))
            .await
            .unwrap();
        assert_eq!(*transport.tokens.lock().unwrap(), vec!["t".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_collection_without_token_sends_nothing() {
        let transport = StaticTransport::new(&collection_body(1));
        let result = fetch_collection(&transport, &query("123", None)).await;
        assert_eq!(result, Err(CatalogError::MissingToken));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_collection_first_error_message() {
        let transport =
            StaticTransport::new(r#"{"errors":[{"message":"X"},{"message":"Y"}]}"#);
        let err = fetch_collection(&transport, &query("123", Some("t")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "X");
    }

    #[tokio::test]
    async fn test_fetch_collection_missing_collection_is_empty() {
        let transport = StaticTransport::new(r#"{"data":{"collection":null}}"#);
        let page = fetch_collection(&transport, &query("123", Some("t")))
            .await
            .unwrap();
        assert!(page.products.is_empty());
    }

    #[test]
    fn test_api_error_fallback_message() {
        let empty = CatalogError::from(ShopifyError::GraphQL(vec![]));
        assert_eq!(empty.to_string(), API_ERROR_FALLBACK);

        let blank = CatalogError::from(ShopifyError::GraphQL(vec![GraphQLError::default()]));
        assert_eq!(blank.to_string(), API_ERROR_FALLBACK);
    }

    #[tokio::test]
    async fn test_string_error_payload_uses_fallback_message() {
        let transport =
            StaticTransport::new(r#"{"errors":"[API] Invalid API key or access token"}"#);
        let err = fetch_collection(&transport, &query("123", Some("t")))
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::Api(API_ERROR_FALLBACK.to_string()));
    }

    #[tokio::test]
    async fn test_null_product_edges_is_empty_page() {
        let transport = StaticTransport::new(
            r#"{"data":{"collection":{"title":"M","products":{"edges":null}}}}"#,
        );
        let page = fetch_collection(&transport, &query("123", Some("t")))
            .await
            .unwrap();
        assert_eq!(page.title.as_deref(), Some("M"));
        assert!(page.products.is_empty());
    }

    #[test]
    fn test_transport_error_is_verbatim() {
        let err = CatalogError::from(ShopifyError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        });
        assert_eq!(err, CatalogError::Transport("HTTP 502: Bad Gateway".to_string()));
    }

    #[test]
    fn test_fetch_state_from_result() {
        let state = FetchState::from(Err(CatalogError::Api("X".to_string())));
        assert_eq!(state, FetchState::Error("X".to_string()));

        let state = FetchState::from(Ok(CollectionPage {
            title: None,
            products: Vec::new(),
        }));
        assert_eq!(state.products().map(<[_]>::len), Some(0));
        assert!(state.is_settled());
    }

    #[test]
    fn test_settled_states() {
        assert!(!FetchState::NotStarted.is_settled());
        assert!(!FetchState::Loading.is_settled());
        assert!(FetchState::MissingCredential.is_settled());
        assert!(FetchState::Error(String::new()).is_settled());
    }

    #[test]
    fn test_placeholder_is_svg_data_uri() {
        assert!(PLACEHOLDER_IMAGE.starts_with("data:image/svg+xml;utf8,<svg"));
        assert!(PLACEHOLDER_IMAGE.contains("Image unavailable"));
        assert!(PLACEHOLDER_IMAGE.ends_with("</svg>"));
    }

    #[tokio::test]
    async fn test_status_reply_becomes_transport_error() {
        struct Failing;
        impl CatalogTransport for Failing {
            async fn post_graphql(
                &self,
                _shop: &ShopDomain,
                _token: &str,
                _body: &QueryBody<CollectionProductsVariables>,
            ) -> Result<GraphQLReply, ShopifyError> {
                Ok(GraphQLReply {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    body: "try later".to_string(),
                })
            }
        }

        let err = fetch_collection(&Failing, &query("123", Some("t")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503: try later");
    }
}
