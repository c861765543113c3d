//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., crime-salad.myshopify.com)
//! - `SHOPIFY_COLLECTION_ID` - Collection shown on the page (numeric id or gid)
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SHOPIFY_STOREFRONT_TOKEN` - Storefront API public access token; without
//!   it the shop section links to the store instead of listing products
//! - `SHOPIFY_COLLECTION_LIMIT` - Number of products to show (default: 12)
//! - `SHOPIFY_API_VERSION` - API version (default: 2024-07)
//! - `SHOPIFY_REQUEST_TIMEOUT_SECS` - Storefront request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

use crime_salad_core::{CollectionQuery, DEFAULT_LIMIT, QueryError};

/// Storefront API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-07";

/// Storefront request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Shopify Storefront API configuration.
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    /// Collection shown on the page, with shop and token
    pub query: CollectionQuery,
    /// Shopify API version (e.g., 2024-07)
    pub api_version: String,
    /// Timeout applied to each Storefront request
    pub request_timeout: Duration,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_env::<IpAddr>(&env, "SITE_HOST", "127.0.0.1")?;
        let port = parse_env::<u16>(&env, "SITE_PORT", "3000")?;
        let shopify = ShopifyConfig::from_lookup(&env)?;

        Ok(Self {
            host,
            port,
            shopify,
            sentry_dsn: get_optional_env(&env, "SENTRY_DSN"),
            sentry_environment: get_optional_env(&env, "SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyConfig {
    fn from_lookup(env: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = get_required_env(env, "SHOPIFY_STORE")?;
        let token = get_optional_env(env, "SHOPIFY_STOREFRONT_TOKEN");
        let collection = get_required_env(env, "SHOPIFY_COLLECTION_ID")?;
        let limit = parse_env::<u32>(
            env,
            "SHOPIFY_COLLECTION_LIMIT",
            &DEFAULT_LIMIT.get().to_string(),
        )?;

        let query = CollectionQuery::new(&store, token.as_deref(), &collection, Some(limit))
            .map_err(|e| {
                let key = match e {
                    QueryError::Shop(_) => "SHOPIFY_STORE",
                    QueryError::EmptyCollectionId => "SHOPIFY_COLLECTION_ID",
                    QueryError::ZeroLimit => "SHOPIFY_COLLECTION_LIMIT",
                };
                ConfigError::InvalidEnvVar(key.to_string(), e.to_string())
            })?;

        let timeout_secs = parse_env::<u64>(
            env,
            "SHOPIFY_REQUEST_TIMEOUT_SECS",
            &DEFAULT_REQUEST_TIMEOUT.as_secs().to_string(),
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPIFY_REQUEST_TIMEOUT_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            query,
            api_version: get_env_or_default(env, "SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    get_optional_env(env, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key).filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(env: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional_env(env, key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(env, key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
