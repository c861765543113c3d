//! Integration tests for collection fetch cycles.
//!
//! Each test drives a `CatalogFetcher` through the public API and checks the
//! settled state, the request that went out and the rendered grid.

#![allow(clippy::unwrap_used)]

use askama::Template;
use axum::http::StatusCode;
use serde_json::json;

use crime_salad_integration_tests::{
    ScriptedTransport, collection_response, product_edge, query,
};
use crime_salad_site::catalog::{
    CatalogFetcher, CatalogGridTemplate, CatalogView, FetchState, PLACEHOLDER_IMAGE,
};
use crime_salad_site::shopify::GraphQLReply;

fn render(fetcher: &CatalogFetcher<ScriptedTransport>, state: &FetchState) -> String {
    let query = fetcher.snapshot().query.unwrap();
    CatalogGridTemplate::new(query.shop(), state).render().unwrap()
}

// =============================================================================
// Successful fetches
// =============================================================================

#[tokio::test]
async fn test_four_products_end_to_end() {
    let edges: Vec<_> = (1..=4).map(product_edge).collect();
    let body = collection_response(&edges);
    let fetcher = CatalogFetcher::new(ScriptedTransport::replying(&[&body]));

    assert!(fetcher.set_query(query("123", Some("t"))));
    assert_eq!(fetcher.state(), FetchState::Loading);
    let state = fetcher.wait_settled().await;

    let requests = fetcher.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].shop, "x.myshopify.com");
    assert_eq!(requests[0].token, "t");
    assert_eq!(
        requests[0].body["variables"],
        json!({ "id": "gid://shopify/Collection/123", "first": 4 })
    );
    assert_eq!(requests[0].body["operationName"], "CollectionProducts");

    let products = state.products().unwrap();
    let titles: Vec<_> = products.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Product 1", "Product 2", "Product 3", "Product 4"]);
    assert_eq!(products[0].price_label, "1.00 USD");
    assert_eq!(products[0].image_url, "https://cdn.shopify.com/p1.webp");
    assert_eq!(products[0].image_alt, "Photo of product 1");

    let html = render(&fetcher, &state);
    assert_eq!(html.matches("data-tile").count(), 4);
    assert!(html.contains("https://x.myshopify.com/products/product-3"));
    assert!(html.contains("4.00 USD"));
}

#[tokio::test]
async fn test_missing_collection_is_empty() {
    let fetcher = CatalogFetcher::new(ScriptedTransport::replying(&[
        r#"{"data":{"collection":null}}"#,
    ]));
    fetcher.set_query(query("999", Some("t")));

    let state = fetcher.wait_settled().await;
    assert_eq!(state.products().map(<[_]>::len), Some(0));

    let html = render(&fetcher, &state);
    assert!(html.contains("Browse the shop"));
    assert!(html.contains("https://x.myshopify.com/collections/all"));
    assert!(!html.contains("data-tile"));
}

#[tokio::test]
async fn test_image_and_price_fallbacks() {
    let body = collection_response(&[
        json!({ "node": {
            "id": "gid://shopify/Product/1",
            "title": "Sticker",
            "handle": "sticker",
            "featuredImage": null,
            "images": { "edges": [
                { "node": { "url": "", "altText": "empty" } },
                { "node": { "url": "https://cdn.shopify.com/second.webp", "altText": null } }
            ] },
            "priceRange": null
        } }),
        json!({ "node": {
            "id": "gid://shopify/Product/2",
            "title": "Poster",
            "handle": "poster",
            "priceRange": { "minVariantPrice": { "amount": "20.0", "currencyCode": "CAD" } }
        } }),
        json!({ "node": null }),
    ]);
    let fetcher = CatalogFetcher::new(ScriptedTransport::replying(&[&body]));
    fetcher.set_query(query("123", Some("t")));

    let state = fetcher.wait_settled().await;
    let products = state.products().unwrap();
    assert_eq!(products.len(), 2);

    assert_eq!(products[0].image_url, "https://cdn.shopify.com/second.webp");
    assert_eq!(products[0].image_alt, "Sticker");
    assert_eq!(products[0].price_label, "");

    assert_eq!(products[1].image_url, PLACEHOLDER_IMAGE);
    assert_eq!(products[1].image_alt, "Poster");
    assert_eq!(products[1].price_label, "20.0 CAD");

    let query = fetcher.snapshot().query.unwrap();
    let CatalogView::Grid { mut tiles } = CatalogView::new(query.shop(), &state) else {
        panic!("expected grid");
    };
    assert!(tiles[0].image.on_load_error());
    assert_eq!(tiles[0].image.src, PLACEHOLDER_IMAGE);
    assert!(!tiles[0].image.on_load_error());
    assert!(!tiles[1].image.on_load_error());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_graphql_error_message_is_shown() {
    let fetcher = CatalogFetcher::new(ScriptedTransport::replying(&[
        r#"{"errors":[{"message":"X"}]}"#,
    ]));
    fetcher.set_query(query("123", Some("t")));

    let state = fetcher.wait_settled().await;
    assert_eq!(state, FetchState::Error("X".to_string()));
    assert!(render(&fetcher, &state).contains("Couldn't load products. X"));
}

#[tokio::test]
async fn test_non_json_failure_status_is_error() {
    let transport = ScriptedTransport::new();
    let gate = transport.gate();
    let fetcher = CatalogFetcher::new(transport);
    fetcher.set_query(query("123", Some("t")));

    gate.send(GraphQLReply {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "<html>oops</html>".to_string(),
    })
    .unwrap();

    let FetchState::Error(message) = fetcher.wait_settled().await else {
        panic!("expected error state");
    };
    assert!(message.starts_with("HTTP 500"), "got {message}");
}

#[tokio::test]
async fn test_transport_failure_is_error() {
    let fetcher = CatalogFetcher::new(ScriptedTransport::new());
    fetcher.set_query(query("123", Some("t")));

    assert!(matches!(fetcher.wait_settled().await, FetchState::Error(_)));
    assert_eq!(fetcher.transport().requests().len(), 1);
}

// =============================================================================
// Credentials and query changes
// =============================================================================

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let fetcher = CatalogFetcher::new(ScriptedTransport::new());
    fetcher.set_query(query("123", None));

    assert_eq!(fetcher.wait_settled().await, FetchState::MissingCredential);
    tokio::task::yield_now().await;
    assert!(fetcher.transport().requests().is_empty());

    let html = render(&fetcher, &FetchState::MissingCredential);
    assert!(html.contains("Browse the shop"));
    assert!(html.contains("https://x.myshopify.com/collections/all"));
}

#[tokio::test]
async fn test_superseded_response_never_shows() {
    let transport = ScriptedTransport::new();
    let gate_a = transport.gate();
    let gate_b = transport.gate();
    let fetcher = CatalogFetcher::new(transport);

    fetcher.set_query(query("A", Some("t")));
    tokio::task::yield_now().await;
    fetcher.set_query(query("B", Some("t")));
    tokio::task::yield_now().await;

    gate_b
        .send(GraphQLReply::ok(collection_response(&[product_edge(2)])))
        .unwrap();
    fetcher.transport().until_completed(1).await;
    gate_a
        .send(GraphQLReply::ok(collection_response(&[product_edge(1)])))
        .unwrap();
    fetcher.transport().until_completed(2).await;

    let state = fetcher.state();
    let titles: Vec<_> = state
        .products()
        .unwrap()
        .iter()
        .map(|p| p.title.clone())
        .collect();
    assert_eq!(titles, ["Product 2"]);

    let requests = fetcher.transport().requests();
    assert_eq!(requests[0].body["variables"]["id"], "gid://shopify/Collection/A");
    assert_eq!(requests[1].body["variables"]["id"], "gid://shopify/Collection/B");
}

#[tokio::test]
async fn test_same_query_twice_fetches_once() {
    let body = collection_response(&[product_edge(1)]);
    let fetcher = CatalogFetcher::new(ScriptedTransport::replying(&[&body, &body]));

    assert!(fetcher.set_query(query("123", Some("t"))));
    fetcher.wait_settled().await;
    assert!(!fetcher.set_query(query("123", Some("t"))));
    tokio::task::yield_now().await;

    assert_eq!(fetcher.transport().requests().len(), 1);
}

#[tokio::test]
async fn test_token_change_refetches() {
    let body = collection_response(&[product_edge(1)]);
    let fetcher = CatalogFetcher::new(ScriptedTransport::replying(&[&body, &body]));

    fetcher.set_query(query("123", Some("old")));
    fetcher.wait_settled().await;
    fetcher.set_query(query("123", Some("new")));
    fetcher.wait_settled().await;

    let tokens: Vec<_> = fetcher
        .transport()
        .requests()
        .into_iter()
        .map(|r| r.token)
        .collect();
    assert_eq!(tokens, ["old", "new"]);
}
