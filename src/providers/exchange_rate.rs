use super::util::with_retry;
use crate::cache::Cache;
use crate::instrument::{Category, Instrument};
use crate::instrument_provider::{FetchError, InstrumentProvider};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

pub const CACHE_KEY: &str = "currencies";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Display names for the commonly traded codes; anything else falls back to
/// the code itself.
const CURRENCY_NAMES: &[(&str, &str)] = &[
    ("USD", "Amerikan Doları"),
    ("EUR", "Euro"),
    ("GBP", "İngiliz Sterlini"),
    ("JPY", "Japon Yeni"),
    ("CHF", "İsviçre Frangı"),
    ("CAD", "Kanada Doları"),
    ("AUD", "Avustralya Doları"),
    ("CNY", "Çin Yuanı"),
    ("RUB", "Rus Rublesi"),
    ("SAR", "Suudi Arabistan Riyali"),
];

fn currency_name(code: &str) -> Option<&'static str> {
    CURRENCY_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}

// BTreeMap keeps the instrument list in a deterministic (alphabetical) order;
// the upstream JSON object carries no ordering guarantee.
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: BTreeMap<String, f64>,
}

/// Foreign-exchange quotes derived from a rate table keyed on the reference
/// currency. The endpoint reports units of foreign currency per 1 unit of the
/// base, so each rate is inverted to price one foreign unit in the base.
pub struct ExchangeRateProvider {
    base_url: String,
    base_currency: String,
    cache: Arc<Cache<String, Vec<Instrument>>>,
}

impl ExchangeRateProvider {
    pub fn new(
        base_url: &str,
        base_currency: &str,
        cache: Arc<Cache<String, Vec<Instrument>>>,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            base_currency: base_currency.to_string(),
            cache,
        }
    }
}

#[async_trait]
impl InstrumentProvider for ExchangeRateProvider {
    fn category(&self) -> Category {
        Category::Currency
    }

    #[instrument(name = "CurrencyFetch", skip(self))]
    async fn fetch(&self) -> Result<Vec<Instrument>, FetchError> {
        if let Some(cached) = self.cache.get(&CACHE_KEY.to_string()).await {
            return Ok(cached);
        }

        let url = format!("{}/v4/latest/{}", self.base_url, self.base_currency);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("piyasa/0.2")
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = with_retry(|| async { client.get(&url).send().await }, 2, 500).await?;
        let response = response.error_for_status()?;

        let text = response.text().await?;
        let data: RatesResponse = serde_json::from_str(&text)?;

        let instruments: Vec<Instrument> = data
            .rates
            .into_iter()
            // A non-positive rate cannot be inverted; the base currency
            // pricing itself is always 1.0 and carries no information.
            .filter(|(code, rate)| *rate > 0.0 && *code != self.base_currency)
            .map(|(code, rate)| Instrument {
                id: code.to_lowercase(),
                symbol: code.to_uppercase(),
                name: currency_name(&code)
                    .map(str::to_string)
                    .unwrap_or_else(|| code.clone()),
                current_price: 1.0 / rate,
                price_change_percentage_24h: None,
                market_cap: None,
                category: Category::Currency,
            })
            .collect();

        self.cache
            .put(CACHE_KEY.to_string(), instruments.clone())
            .await;
        Ok(instruments)
    }

    fn fallback(&self) -> Vec<Instrument> {
        [
            ("USD", 34.20),
            ("EUR", 36.90),
            ("GBP", 43.10),
            ("CHF", 38.40),
            ("JPY", 0.22),
        ]
        .into_iter()
        .map(|(code, price)| Instrument {
            id: code.to_lowercase(),
            symbol: code.to_string(),
            name: currency_name(code)
                .map(str::to_string)
                .unwrap_or_else(|| code.to_string()),
            current_price: price,
            price_change_percentage_24h: None,
            market_cap: None,
            category: Category::Currency,
        })
        .collect()
    }
}
