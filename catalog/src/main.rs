//! Pricewise command-line entry point.
//!
//! Talks to the live rate provider; the catalog lives in memory for the
//! duration of one invocation.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pricewise_common::{system_clock, Currency, Money};
use pricewise_fx::{ExchangeRateCache, HnbClient, PricingEngine};
use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricewise_catalog::{CatalogConfig, CatalogService, InMemoryCatalogRepository, NewItem};

/// Pricewise CLI
#[derive(Parser, Debug)]
#[command(name = "pricewise")]
#[command(about = "Catalog pricing with daily exchange rates")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print today's middle rate
    Rate {
        /// Currency code; defaults to the configured rate currency
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Convert a source-currency price at today's middle rate
    Quote {
        /// Price in the source currency, e.g. 9.99
        #[arg(short, long)]
        price: String,
    },
    /// Create sample items in an in-memory catalog and print the first page
    Demo {
        /// Number of items to create
        #[arg(short, long, default_value = "3")]
        items: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // Load configuration
    let config = CatalogConfig::from_env();
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let provider = Arc::new(HnbClient::new(&config.fx).context("building rate provider")?);
    let rates = Arc::new(ExchangeRateCache::new(provider, system_clock()));

    match args.command {
        Command::Rate { currency } => {
            let currency = match currency {
                Some(code) => Currency::parse(&code)?,
                None => config.rate_currency.clone(),
            };
            let rate = rates.get_middle_rate(&currency).await?;
            println!("{} {}", currency, rate);
        }
        Command::Quote { price } => {
            let amount = Money::parse(&price, config.source_currency.clone())?;
            let rate = rates.get_middle_rate(&config.rate_currency).await?;
            let conversion =
                PricingEngine::new().convert_money(&amount, rate, config.rate_currency.clone())?;
            println!("{}", serde_json::to_string_pretty(&conversion)?);
        }
        Command::Demo { items } => {
            let service = CatalogService::new(
                Arc::new(InMemoryCatalogRepository::new()),
                rates.clone(),
                config.clone(),
            );

            for n in 1..=items {
                let new_item = NewItem::new(
                    format!("DEMO{:06}", n),
                    format!("Demo item {}", n),
                    Decimal::new(n as i64 * 999, 2),
                    n % 2 == 1,
                );
                service.create_item(new_item).await?;
            }

            let page = service.list_first_page().await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
            info!(stats = ?rates.stats(), "Rate cache statistics");
        }
    }

    Ok(())
}
