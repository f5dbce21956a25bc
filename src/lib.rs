pub mod aggregator;
pub mod cache;
pub mod config;
pub mod instrument;
pub mod instrument_provider;
pub mod log;
pub mod providers;
pub mod quotes;
pub mod ui;

use crate::cache::Cache;
use crate::instrument::{Category, Instrument};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Quotes { category: Option<Category> },
    Search { query: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Market data tracker starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    // One cache shared by all providers; each only touches its own key
    let cache = Arc::new(Cache::<String, Vec<Instrument>>::new(Duration::from_secs(
        config.cache_ttl_secs,
    )));

    let coingecko_url = config
        .providers
        .coingecko
        .as_ref()
        .map_or(config::DEFAULT_COINGECKO_URL, |p| &p.base_url);
    let exchange_rate_url = config
        .providers
        .exchange_rate
        .as_ref()
        .map_or(config::DEFAULT_EXCHANGE_RATE_URL, |p| &p.base_url);

    let aggregator = aggregator::MarketDataAggregator::new(
        Box::new(providers::coingecko::CoinGeckoProvider::new(
            coingecko_url,
            &config.currency,
            Arc::clone(&cache),
        )),
        Box::new(providers::exchange_rate::ExchangeRateProvider::new(
            exchange_rate_url,
            &config.currency,
            Arc::clone(&cache),
        )),
        Box::new(providers::bist::BistProvider::new(Arc::clone(&cache))),
    );

    match command {
        AppCommand::Quotes { category } => quotes::run(&aggregator, category, None).await,
        AppCommand::Search { query } => quotes::run(&aggregator, None, Some(&query)).await,
    }
}
