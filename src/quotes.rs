use crate::aggregator::{MarketDataAggregator, search_instruments};
use crate::instrument::{Category, Instrument};
use crate::ui;
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(
    aggregator: &MarketDataAggregator,
    category: Option<Category>,
    query: Option<&str>,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching market data...");
    let catalog = aggregator.all_financial_data().await;
    pb.finish_and_clear();

    let instruments: Vec<Instrument> = match category {
        Some(category) => catalog.category(category).to_vec(),
        None => catalog.all,
    };
    let instruments = match query {
        Some(query) => search_instruments(query, &instruments),
        None => instruments,
    };

    if instruments.is_empty() {
        println!(
            "{}",
            ui::style_text("No instruments matched.", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    println!("{}", display_as_table(&instruments));
    Ok(())
}

pub fn display_as_table(instruments: &[Instrument]) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
        ui::header_cell("Price"),
        ui::header_cell("24h"),
        ui::header_cell("Category"),
    ]);

    for instrument in instruments {
        let change = instrument
            .price_change_percentage_24h
            .map_or_else(ui::na_cell, ui::change_cell);

        table.add_row(vec![
            Cell::new(&instrument.symbol),
            Cell::new(&instrument.name),
            ui::price_cell(instrument.current_price),
            change,
            Cell::new(instrument.category.to_string()),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_as_table_renders_rows() {
        let instruments = vec![
            Instrument {
                id: "bitcoin".to_string(),
                symbol: "BTC".to_string(),
                name: "Bitcoin".to_string(),
                current_price: 2150000.0,
                price_change_percentage_24h: Some(2.35),
                market_cap: Some(43713000000000.0),
                category: Category::Crypto,
            },
            Instrument {
                id: "usd".to_string(),
                symbol: "USD".to_string(),
                name: "Amerikan Doları".to_string(),
                current_price: 34.13,
                price_change_percentage_24h: None,
                market_cap: None,
                category: Category::Currency,
            },
        ];

        let rendered = display_as_table(&instruments);

        assert!(rendered.contains("BTC"));
        assert!(rendered.contains("Bitcoin"));
        assert!(rendered.contains("2150000.00"));
        assert!(rendered.contains("Amerikan Doları"));
        assert!(rendered.contains("34.13"));
        // Currency rows carry no 24h change
        assert!(rendered.contains("N/A"));
    }
}
