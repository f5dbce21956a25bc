use super::util::with_retry;
use crate::cache::Cache;
use crate::instrument::{Category, Instrument};
use crate::instrument_provider::{FetchError, InstrumentProvider};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

pub const CACHE_KEY: &str = "cryptocurrencies";

const PER_PAGE: u32 = 20;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct MarketRecord {
    id: String,
    symbol: String,
    name: String,
    current_price: f64,
    price_change_percentage_24h: Option<f64>,
    market_cap: Option<f64>,
}

/// Cryptocurrency quotes from a CoinGecko-compatible markets endpoint, ranked
/// by market capitalization and quoted in the reference currency.
pub struct CoinGeckoProvider {
    base_url: String,
    quote_currency: String,
    cache: Arc<Cache<String, Vec<Instrument>>>,
}

impl CoinGeckoProvider {
    pub fn new(
        base_url: &str,
        quote_currency: &str,
        cache: Arc<Cache<String, Vec<Instrument>>>,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            quote_currency: quote_currency.to_string(),
            cache,
        }
    }
}

#[async_trait]
impl InstrumentProvider for CoinGeckoProvider {
    fn category(&self) -> Category {
        Category::Crypto
    }

    #[instrument(name = "CryptoFetch", skip(self))]
    async fn fetch(&self) -> Result<Vec<Instrument>, FetchError> {
        if let Some(cached) = self.cache.get(&CACHE_KEY.to_string()).await {
            return Ok(cached);
        }

        let url = format!(
            "{}/api/v3/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1",
            self.base_url,
            self.quote_currency.to_lowercase(),
            PER_PAGE
        );
        debug!("Requesting crypto markets from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("piyasa/0.2")
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = with_retry(|| async { client.get(&url).send().await }, 2, 500).await?;
        let response = response.error_for_status()?;

        let text = response.text().await?;
        let records: Vec<MarketRecord> = serde_json::from_str(&text)?;

        let instruments: Vec<Instrument> = records
            .into_iter()
            .map(|record| Instrument {
                id: record.id,
                symbol: record.symbol.to_uppercase(),
                name: record.name,
                current_price: record.current_price,
                price_change_percentage_24h: record.price_change_percentage_24h,
                market_cap: record.market_cap,
                category: Category::Crypto,
            })
            .collect();

        self.cache
            .put(CACHE_KEY.to_string(), instruments.clone())
            .await;
        Ok(instruments)
    }

    fn fallback(&self) -> Vec<Instrument> {
        [
            ("bitcoin", "BTC", "Bitcoin", 2_150_000.0, 1.8),
            ("ethereum", "ETH", "Ethereum", 112_500.0, 2.4),
            ("binancecoin", "BNB", "BNB", 19_750.0, 0.6),
            ("cardano", "ADA", "Cardano", 14.2, -1.1),
            ("solana", "SOL", "Solana", 4_850.0, 3.2),
        ]
        .into_iter()
        .map(|(id, symbol, name, price, change)| Instrument {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price: price,
            price_change_percentage_24h: Some(change),
            market_cap: None,
            category: Category::Crypto,
        })
        .collect()
    }
}
