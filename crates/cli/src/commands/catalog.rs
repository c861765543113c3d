//! Fetch a collection through the Storefront API and print the outcome.
//!
//! Runs one fetch cycle the same way the site does, then prints the settled
//! state as a summary, as JSON or as the rendered grid fragment.

use std::time::Duration;

use askama::Template;
use clap::{Args, ValueEnum};
use thiserror::Error;
use tracing::info;

use crime_salad_core::{CollectionQuery, QueryError};
use crime_salad_site::catalog::{CatalogFetcher, CatalogGridTemplate, FetchState};
use crime_salad_site::config::{DEFAULT_API_VERSION, DEFAULT_REQUEST_TIMEOUT, ShopifyConfig};
use crime_salad_site::shopify::{ShopifyError, StorefrontClient};

/// Errors from the `catalog` command.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error("Failed to build Storefront client: {0}")]
    Client(#[from] ShopifyError),

    #[error("Couldn't load products. {0}")]
    Fetch(String),

    #[error("Failed to render grid: {0}")]
    Render(#[from] askama::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How to print the settled state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per product
    #[default]
    Summary,
    /// The state and products as JSON
    Json,
    /// The shop grid HTML fragment
    Html,
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Shop domain (e.g., crime-salad.myshopify.com)
    #[arg(long, env = "SHOPIFY_STORE")]
    pub shop: String,

    /// Storefront API public access token
    #[arg(long, env = "SHOPIFY_STOREFRONT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Collection id, numeric or full gid
    #[arg(long, env = "SHOPIFY_COLLECTION_ID")]
    pub collection: String,

    /// Maximum number of products
    #[arg(long)]
    pub limit: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Storefront API version
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Request timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

/// Run the `catalog` command.
///
/// # Errors
///
/// Returns an error if the arguments are invalid, the fetch ends in the
/// error state, or the output cannot be produced.
pub async fn run(args: CatalogArgs) -> Result<(), CatalogCommandError> {
    let query = CollectionQuery::new(
        &args.shop,
        args.token.as_deref(),
        &args.collection,
        args.limit,
    )?;
    let shop = query.shop().clone();

    let config = ShopifyConfig {
        query: query.clone(),
        api_version: args.api_version,
        request_timeout: Duration::from_secs(args.timeout),
    };
    let fetcher = CatalogFetcher::new(StorefrontClient::new(&config)?);

    info!(shop = %shop, collection = %query.collection(), "Fetching collection");
    fetcher.set_query(query);
    let state = fetcher.wait_settled().await;

    let output = match args.format {
        OutputFormat::Summary => summary(&state),
        OutputFormat::Json => serde_json::to_string_pretty(&json(&state))?,
        OutputFormat::Html => CatalogGridTemplate::new(&shop, &state).render()?,
    };

    print_output(&output);

    match state {
        FetchState::Error(message) => Err(CatalogCommandError::Fetch(message)),
        _ => Ok(()),
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}

fn summary(state: &FetchState) -> String {
    match state {
        FetchState::Loaded(products) if products.is_empty() => {
            "No products in this collection.".to_string()
        }
        FetchState::Loaded(products) => products
            .iter()
            .map(|p| {
                if p.price_label.is_empty() {
                    format!("{}  ({})", p.title, p.handle)
                } else {
                    format!("{}  ({})  {}", p.title, p.handle, p.price_label)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        FetchState::MissingCredential => {
            "No storefront token set; the page would link to the shop instead.".to_string()
        }
        FetchState::Error(message) => format!("Couldn't load products. {message}"),
        FetchState::NotStarted | FetchState::Loading => state.label().to_string(),
    }
}

fn json(state: &FetchState) -> serde_json::Value {
    match state {
        FetchState::Loaded(products) => serde_json::json!({
            "state": state.label(),
            "products": &**products,
        }),
        FetchState::Error(message) => serde_json::json!({
            "state": state.label(),
            "message": message,
        }),
        _ => serde_json::json!({ "state": state.label() }),
    }
}
