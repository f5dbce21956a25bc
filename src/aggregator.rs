//! Fan-out/fan-in composition of the per-category providers.

use crate::instrument::{Catalog, Instrument};
use crate::instrument_provider::InstrumentProvider;
use futures::future::join3;
use tracing::error;

/// Merges the three instrument sources into a single catalog.
///
/// Providers fail internally with a typed error; the aggregator substitutes
/// each provider's static fallback table, so the public surface never fails.
pub struct MarketDataAggregator {
    crypto: Box<dyn InstrumentProvider>,
    currency: Box<dyn InstrumentProvider>,
    stock: Box<dyn InstrumentProvider>,
}

impl MarketDataAggregator {
    pub fn new(
        crypto: Box<dyn InstrumentProvider>,
        currency: Box<dyn InstrumentProvider>,
        stock: Box<dyn InstrumentProvider>,
    ) -> Self {
        Self {
            crypto,
            currency,
            stock,
        }
    }

    /// Fetches all three categories concurrently and composes the catalog.
    pub async fn all_financial_data(&self) -> Catalog {
        let (crypto, currency, stock) = join3(
            fetch_or_fallback(self.crypto.as_ref()),
            fetch_or_fallback(self.currency.as_ref()),
            fetch_or_fallback(self.stock.as_ref()),
        )
        .await;

        Catalog::new(crypto, currency, stock)
    }
}

async fn fetch_or_fallback(provider: &dyn InstrumentProvider) -> Vec<Instrument> {
    match provider.fetch().await {
        Ok(instruments) => instruments,
        Err(e) => {
            error!(
                category = %provider.category(),
                error = %e,
                "Fetch failed, serving static defaults"
            );
            provider.fallback()
        }
    }
}

/// Case-insensitive substring filter over `name` or `symbol`.
///
/// An empty query returns the input unchanged; match order preserves input
/// order.
pub fn search_instruments(query: &str, list: &[Instrument]) -> Vec<Instrument> {
    if query.is_empty() {
        return list.to_vec();
    }

    let needle = query.to_lowercase();
    list.iter()
        .filter(|instrument| {
            instrument.name.to_lowercase().contains(&needle)
                || instrument.symbol.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
