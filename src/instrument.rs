//! Normalized instrument types shared by providers and the aggregator.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Crypto,
    Currency,
    Stock,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Category::Crypto => "crypto",
                Category::Currency => "currency",
                Category::Stock => "stock",
            }
        )
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crypto" => Ok(Category::Crypto),
            "currency" => Ok(Category::Currency),
            "stock" => Ok(Category::Stock),
            _ => Err(anyhow::anyhow!("Invalid category: {}", s)),
        }
    }
}

/// A tradable asset quoted in the reference currency.
///
/// `id` is unique within its category; `symbol` is a display aid and need not
/// be unique across categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub category: Category,
}

/// Request-time view over all instrument categories.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub crypto: Vec<Instrument>,
    pub currency: Vec<Instrument>,
    pub stock: Vec<Instrument>,
    pub all: Vec<Instrument>,
}

impl Catalog {
    /// Composes the catalog; `all` is crypto, then currency, then stock.
    pub fn new(crypto: Vec<Instrument>, currency: Vec<Instrument>, stock: Vec<Instrument>) -> Self {
        let mut all = Vec::with_capacity(crypto.len() + currency.len() + stock.len());
        all.extend(crypto.iter().cloned());
        all.extend(currency.iter().cloned());
        all.extend(stock.iter().cloned());
        Self {
            crypto,
            currency,
            stock,
            all,
        }
    }

    pub fn category(&self, category: Category) -> &[Instrument] {
        match category {
            Category::Crypto => &self.crypto,
            Category::Currency => &self.currency,
            Category::Stock => &self.stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument(id: &str, category: Category) -> Instrument {
        Instrument {
            id: id.to_string(),
            symbol: id.to_uppercase(),
            name: id.to_string(),
            current_price: 1.0,
            price_change_percentage_24h: None,
            market_cap: None,
            category,
        }
    }

    #[test]
    fn test_category_display_from_str_roundtrip() {
        for category in [Category::Crypto, Category::Currency, Category::Stock] {
            let parsed: Category = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("equity".parse::<Category>().is_err());
        assert_eq!("STOCK".parse::<Category>().unwrap(), Category::Stock);
    }

    #[test]
    fn test_catalog_composition_order() {
        let catalog = Catalog::new(
            vec![instrument("btc", Category::Crypto)],
            vec![
                instrument("usd", Category::Currency),
                instrument("eur", Category::Currency),
            ],
            vec![instrument("thyao", Category::Stock)],
        );

        assert_eq!(
            catalog.all.len(),
            catalog.crypto.len() + catalog.currency.len() + catalog.stock.len()
        );
        let ids: Vec<&str> = catalog.all.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["btc", "usd", "eur", "thyao"]);
    }

    #[test]
    fn test_catalog_category_lookup() {
        let catalog = Catalog::new(
            vec![instrument("btc", Category::Crypto)],
            vec![],
            vec![instrument("thyao", Category::Stock)],
        );

        assert_eq!(catalog.category(Category::Crypto).len(), 1);
        assert!(catalog.category(Category::Currency).is_empty());
        assert_eq!(catalog.category(Category::Stock)[0].id, "thyao");
    }
}
