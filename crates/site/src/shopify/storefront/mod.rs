//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` request bodies with `reqwest` 0.13 for HTTP. Nothing
//! is cached: every call goes to Shopify.

pub mod conversions;
pub mod queries;

use std::sync::Arc;

use graphql_client::QueryBody;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crime_salad_core::ShopDomain;

use crate::catalog::CatalogTransport;
use crate::config::ShopifyConfig;
use crate::shopify::{GraphQLError, GraphQLErrorLocation, ShopifyError};

use queries::CollectionProductsVariables;

/// Header carrying the public Storefront access token.
pub const STOREFRONT_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Number of body characters kept in logs and status errors.
const BODY_EXCERPT_CHARS: usize = 200;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// The client is not bound to a shop: each call names the shop and token it
/// runs against, so one client serves every query tuple.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    api_version: String,
}

/// Raw HTTP outcome of a GraphQL POST, before decoding.
#[derive(Debug, Clone)]
pub struct GraphQLReply {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body text.
    pub body: String,
}

impl GraphQLReply {
    /// A `200 OK` reply with the given body.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. TLS backend
    /// initialization fails).
    pub fn new(config: &ShopifyConfig) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("crime-salad-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(StorefrontClientInner {
                client,
                api_version: config.api_version.clone(),
            }),
        })
    }

    /// Storefront API version this client targets.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    /// POST a GraphQL body to the shop's Storefront endpoint.
    ///
    /// Returns the status and body untouched; decoding is left to
    /// [`decode_response`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, times out, or the body
    /// cannot be read.
    #[instrument(skip(self, token, body), fields(shop = %shop, operation = body.operation_name))]
    pub async fn send_query<V: Serialize + Sync>(
        &self,
        shop: &ShopDomain,
        token: &str,
        body: &QueryBody<V>,
    ) -> Result<GraphQLReply, ShopifyError> {
        let endpoint = shop.graphql_endpoint(&self.inner.api_version);

        let response = self
            .inner
            .client
            .post(&endpoint)
            .header(STOREFRONT_TOKEN_HEADER, token)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, bytes = body.len(), "Storefront API responded");

        Ok(GraphQLReply { status, body })
    }
}

impl CatalogTransport for StorefrontClient {
    async fn post_graphql(
        &self,
        shop: &ShopDomain,
        token: &str,
        body: &QueryBody<CollectionProductsVariables>,
    ) -> Result<GraphQLReply, ShopifyError> {
        self.send_query(shop, token, body).await
    }
}

// =============================================================================
// Response decoding
// =============================================================================

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    errors: Option<ErrorPayload>,
}

/// Shopify reports errors as a list of objects, but auth failures arrive as a
/// bare string (`{"errors":"[API] Invalid API key or access token"}`). Only
/// the list form carries messages; any other payload is an error without one.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    List(Vec<RawError>),
    Other(serde_json::Value),
}

#[derive(Deserialize)]
struct RawError {
    #[serde(default)]
    message: String,
    locations: Option<Vec<RawLocation>>,
    path: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
struct RawLocation {
    line: i64,
    column: i64,
}

impl ErrorPayload {
    fn into_errors(self) -> Vec<GraphQLError> {
        match self {
            Self::List(errors) => errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    locations: e
                        .locations
                        .unwrap_or_default()
                        .into_iter()
                        .map(|l| GraphQLErrorLocation {
                            line: l.line,
                            column: l.column,
                        })
                        .collect(),
                    path: e.path.unwrap_or_default(),
                })
                .collect(),
            Self::Other(payload) => {
                debug!(payload = %payload, "GraphQL errors payload is not a list");
                Vec::new()
            }
        }
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

/// Decode a GraphQL reply into its `data` payload.
///
/// Returns `Ok(None)` when the response has neither data nor errors.
///
/// # Errors
///
/// - [`ShopifyError::GraphQL`] if the body carries an `errors` payload (even
///   an empty one)
/// - [`ShopifyError::Status`] if the status is not 2xx and the body is not a
///   GraphQL error response
/// - [`ShopifyError::Parse`] if a 2xx body is not valid JSON of the expected shape
pub fn decode_response<T: DeserializeOwned>(
    reply: &GraphQLReply,
) -> Result<Option<T>, ShopifyError> {
    let envelope: Envelope<T> = match serde_json::from_str(&reply.body) {
        Ok(envelope) => envelope,
        Err(_) if !reply.status.is_success() => {
            tracing::error!(
                status = %reply.status,
                body = %excerpt(&reply.body),
                "Storefront API returned non-success status"
            );
            return Err(ShopifyError::Status {
                status: reply.status.as_u16(),
                body: excerpt(&reply.body),
            });
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                body = %excerpt(&reply.body),
                "Failed to parse Storefront GraphQL response"
            );
            return Err(ShopifyError::Parse(e));
        }
    };

    if let Some(errors) = envelope.errors {
        let errors = errors.into_errors();
        debug!(errors = ?errors, "GraphQL errors in response");
        return Err(ShopifyError::GraphQL(errors));
    }

    if !reply.status.is_success() {
        tracing::error!(
            status = %reply.status,
            body = %excerpt(&reply.body),
            "Storefront API returned non-success status"
        );
        return Err(ShopifyError::Status {
            status: reply.status.as_u16(),
            body: excerpt(&reply.body),
        });
    }

    Ok(envelope.data)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use queries::CollectionProductsData;

    fn decode(reply: &GraphQLReply) -> Result<Option<CollectionProductsData>, ShopifyError> {
        decode_response(reply)
    }

    #[test]
    fn test_decode_data() {
        let reply = GraphQLReply::ok(r#"{"data":{"collection":null}}"#);
        let data = decode(&reply).unwrap().unwrap();
        assert!(data.collection.is_none());
    }

    #[test]
    fn test_decode_missing_data_is_none() {
        let reply = GraphQLReply::ok("{}");
        assert!(decode(&reply).unwrap().is_none());
    }

    #[test]
    fn test_decode_error_list() {
        let reply = GraphQLReply::ok(
            r#"{"errors":[{"message":"X","locations":[{"line":2,"column":3}],"path":["collection"]}]}"#,
        );
        match decode(&reply) {
            Err(ShopifyError::GraphQL(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "X");
                assert_eq!(errors[0].locations[0].line, 2);
            }
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_empty_error_list_is_still_an_error() {
        let reply = GraphQLReply::ok(r#"{"data":null,"errors":[]}"#);
        assert!(matches!(
            decode(&reply),
            Err(ShopifyError::GraphQL(errors)) if errors.is_empty()
        ));
    }

    #[test]
    fn test_decode_string_error_payload() {
        let reply = GraphQLReply {
            status: StatusCode::UNAUTHORIZED,
            body: r#"{"errors":"[API] Invalid API key or access token"}"#.to_string(),
        };
        assert!(matches!(
            decode(&reply),
            Err(ShopifyError::GraphQL(errors)) if errors.is_empty()
        ));
    }

    #[test]
    fn test_decode_null_errors_is_not_an_error() {
        let reply = GraphQLReply::ok(r#"{"data":{"collection":null},"errors":null}"#);
        assert!(decode(&reply).unwrap().is_some());
    }

    #[test]
    fn test_decode_invalid_json() {
        let reply = GraphQLReply::ok("<html>oops</html>");
        assert!(matches!(decode(&reply), Err(ShopifyError::Parse(_))));
    }

    #[test]
    fn test_decode_non_json_error_status() {
        let reply = GraphQLReply {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream unavailable".to_string(),
        };
        match decode(&reply) {
            Err(ShopifyError::Status { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_json_error_status_without_errors() {
        let reply = GraphQLReply {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: r#"{"data":null}"#.to_string(),
        };
        assert!(matches!(
            decode(&reply),
            Err(ShopifyError::Status { status: 500, .. })
        ));
    }
}
