use crate::cache::Cache;
use crate::instrument::{Category, Instrument};
use crate::instrument_provider::{FetchError, InstrumentProvider};
use async_trait::async_trait;
use std::sync::Arc;

pub const CACHE_KEY: &str = "bist_stocks";

// Static quote table standing in for an authenticated BIST feed. The provider
// still goes through the shared cache so a live implementation can replace it
// behind the same trait.
const QUOTES: &[(&str, &str, &str, f64, f64)] = &[
    ("thyao", "THYAO", "Türk Hava Yolları", 295.50, 1.85),
    ("garan", "GARAN", "Garanti BBVA", 132.90, -0.42),
    ("akbnk", "AKBNK", "Akbank", 68.30, 0.95),
    ("eregl", "EREGL", "Ereğli Demir Çelik", 52.10, -1.30),
    ("asels", "ASELS", "Aselsan", 74.85, 2.60),
    ("kchol", "KCHOL", "Koç Holding", 243.00, 0.30),
    ("sise", "SISE", "Şişecam", 45.66, -0.75),
    ("bimas", "BIMAS", "BİM Mağazalar", 540.50, 1.10),
    ("tuprs", "TUPRS", "Tüpraş", 162.40, -2.05),
    ("sahol", "SAHOL", "Sabancı Holding", 98.15, 0.60),
];

fn quotes() -> Vec<Instrument> {
    QUOTES
        .iter()
        .map(|&(id, symbol, name, price, change)| Instrument {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price: price,
            price_change_percentage_24h: Some(change),
            market_cap: None,
            category: Category::Stock,
        })
        .collect()
}

/// BIST equity quotes. Serves a static table until an authenticated market
/// data source is wired in.
pub struct BistProvider {
    cache: Arc<Cache<String, Vec<Instrument>>>,
}

impl BistProvider {
    pub fn new(cache: Arc<Cache<String, Vec<Instrument>>>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl InstrumentProvider for BistProvider {
    fn category(&self) -> Category {
        Category::Stock
    }

    async fn fetch(&self) -> Result<Vec<Instrument>, FetchError> {
        if let Some(cached) = self.cache.get(&CACHE_KEY.to_string()).await {
            return Ok(cached);
        }

        let instruments = quotes();
        self.cache
            .put(CACHE_KEY.to_string(), instruments.clone())
            .await;
        Ok(instruments)
    }

    fn fallback(&self) -> Vec<Instrument> {
        quotes()
    }
}
