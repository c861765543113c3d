//! Crime Salad CLI - Storefront collection tools.
//!
//! # Usage
//!
//! ```bash
//! # Summarize a collection
//! cs-cli catalog --shop crimesaladpodcast.myshopify.com --collection 499090194713
//!
//! # Print the products as JSON, four at most
//! cs-cli catalog --shop crimesaladpodcast.myshopify.com --collection 499090194713 \
//!     --limit 4 --format json
//!
//! # Render the shop grid fragment the site would serve
//! cs-cli catalog --shop crimesaladpodcast.myshopify.com --collection 499090194713 --format html
//! ```
//!
//! # Commands
//!
//! - `catalog` - Fetch a collection through the Storefront API

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::catalog::CatalogArgs;

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(author, version, about = "Crime Salad CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a collection and print the resulting catalog state
    Catalog(CatalogArgs),
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so JSON and HTML output stay clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args).await?,
    }
    Ok(())
}
