//! Integration tests for the Crime Salad site.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p crime-salad-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Fetch cycles driven end to end through the public API
//! - `routes` - The HTTP surface with no storefront token configured
//!
//! Nothing here talks to Shopify. Requests go through [`ScriptedTransport`],
//! which records what would have been sent and answers from a script.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use graphql_client::QueryBody;
use tokio::sync::oneshot;

use crime_salad_core::{CollectionQuery, ShopDomain};
use crime_salad_site::catalog::CatalogTransport;
use crime_salad_site::shopify::{CollectionProductsVariables, GraphQLReply, ShopifyError};

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub shop: String,
    pub token: String,
    /// The serialized GraphQL body.
    pub body: serde_json::Value,
}

/// Transport that records requests and answers each one from a script.
///
/// Replies are consumed in request order. A request with no scripted reply
/// left fails with a 503 status.
#[derive(Default)]
pub struct ScriptedTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    replies: Mutex<VecDeque<oneshot::Receiver<GraphQLReply>>>,
    completed: AtomicUsize,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose next requests are answered right away with `bodies`.
    #[must_use]
    pub fn replying(bodies: &[&str]) -> Self {
        let transport = Self::new();
        for body in bodies {
            let (tx, rx) = oneshot::channel();
            let _ = tx.send(GraphQLReply::ok(*body));
            transport.push(rx);
        }
        transport
    }

    /// Script a reply the test sends later through the returned sender.
    #[must_use]
    pub fn gate(&self) -> oneshot::Sender<GraphQLReply> {
        let (tx, rx) = oneshot::channel();
        self.push(rx);
        tx
    }

    fn push(&self, rx: oneshot::Receiver<GraphQLReply>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(rx);
        }
    }

    /// Requests seen so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of requests that have received their reply.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Yield until `n` requests have received their reply.
    pub async fn until_completed(&self, n: usize) {
        while self.completed() < n {
            tokio::task::yield_now().await;
        }
    }
}

impl CatalogTransport for ScriptedTransport {
    async fn post_graphql(
        &self,
        shop: &ShopDomain,
        token: &str,
        body: &QueryBody<CollectionProductsVariables>,
    ) -> Result<GraphQLReply, ShopifyError> {
        let recorded = RecordedRequest {
            shop: shop.to_string(),
            token: token.to_string(),
            body: serde_json::to_value(body)?,
        };
        let reply = {
            let Ok(mut requests) = self.requests.lock() else {
                return Err(unavailable());
            };
            requests.push(recorded);
            self.replies.lock().ok().and_then(|mut r| r.pop_front())
        };

        let result = match reply {
            Some(rx) => rx.await.map_err(|_| unavailable()),
            None => Err(unavailable()),
        };
        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

fn unavailable() -> ShopifyError {
    ShopifyError::Status {
        status: 503,
        body: "no scripted reply".to_string(),
    }
}

/// Query against `x.myshopify.com` with a limit of four.
///
/// # Panics
///
/// Panics if `collection` is blank.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn query(collection: &str, token: Option<&str>) -> CollectionQuery {
    CollectionQuery::new("x.myshopify.com", token, collection, Some(4)).unwrap()
}

/// Response body for a collection with the given product edges.
#[must_use]
pub fn collection_response(edges: &[serde_json::Value]) -> String {
    serde_json::json!({
        "data": {
            "collection": {
                "title": "Merch",
                "products": { "edges": edges }
            }
        }
    })
    .to_string()
}

/// One product edge with a featured image and a USD price.
#[must_use]
pub fn product_edge(n: usize) -> serde_json::Value {
    serde_json::json!({
        "node": {
            "id": format!("gid://shopify/Product/{n}"),
            "title": format!("Product {n}"),
            "handle": format!("product-{n}"),
            "featuredImage": {
                "url": format!("https://cdn.shopify.com/p{n}.webp"),
                "altText": format!("Photo of product {n}")
            },
            "images": { "edges": [] },
            "priceRange": {
                "minVariantPrice": { "amount": format!("{n}.00"), "currencyCode": "USD" }
            }
        }
    })
}
