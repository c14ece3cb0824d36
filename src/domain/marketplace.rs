//! Marketplace view models: rows across docked locations, best prices and margins.

use std::collections::HashMap;

use super::entities::{GoodSymbol, LocationSymbol, MarketplaceGood, Ship};

/// One good's trade terms at one location.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketRow {
    pub location: LocationSymbol,
    pub good: MarketplaceGood,
}

/// Locations with at least one docked ship, deduplicated and sorted.
pub fn docked_locations(ships: &[Ship]) -> Vec<LocationSymbol> {
    let mut locations: Vec<LocationSymbol> =
        ships.iter().filter_map(|ship| ship.location.clone()).collect();
    locations.sort();
    locations.dedup();
    locations
}

/// Flattens per-location marketplaces into rows, keeping location order.
pub fn collect_rows<'a, I>(markets: I) -> Vec<MarketRow>
where
    I: IntoIterator<Item = (&'a LocationSymbol, &'a [MarketplaceGood])>,
{
    markets
        .into_iter()
        .flat_map(|(location, goods)| {
            goods.iter().map(move |good| MarketRow {
                location: location.clone(),
                good: good.clone(),
            })
        })
        .collect()
}

pub fn filter_rows(rows: &[MarketRow], good: Option<&str>) -> Vec<MarketRow> {
    rows.iter()
        .filter(|row| good.map_or(true, |symbol| row.good.symbol == symbol))
        .cloned()
        .collect()
}

/// Distinct good symbols across rows, sorted, for the filter select.
pub fn good_options(rows: &[MarketRow]) -> Vec<GoodSymbol> {
    let mut goods: Vec<GoodSymbol> = rows.iter().map(|row| row.good.symbol.clone()).collect();
    goods.sort();
    goods.dedup();
    goods
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BestPrice {
    pub location: LocationSymbol,
    pub price: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BestPrices {
    /// Lowest price to buy at.
    pub purchase: Option<BestPrice>,
    /// Highest price to sell at.
    pub sell: Option<BestPrice>,
}

impl BestPrices {
    /// `floor((bestSell - bestBuy) * volume)`; `None` until both sides are known.
    pub fn margin(&self, volume: f64) -> Option<i64> {
        let buy = self.purchase.as_ref()?.price as f64;
        let sell = self.sell.as_ref()?.price as f64;
        Some(((sell - buy) * volume).floor() as i64)
    }
}

/// Min purchase and max sell across rows. Ties keep the first row seen.
pub fn best_prices<'a, I>(rows: I) -> BestPrices
where
    I: IntoIterator<Item = &'a MarketRow>,
{
    let mut best = BestPrices::default();
    for row in rows {
        let purchase = row.good.purchase_price_per_unit;
        if best.purchase.as_ref().map_or(true, |b| purchase < b.price) {
            best.purchase = Some(BestPrice {
                location: row.location.clone(),
                price: purchase,
            });
        }
        let sell = row.good.sell_price_per_unit;
        if best.sell.as_ref().map_or(true, |b| sell > b.price) {
            best.sell = Some(BestPrice {
                location: row.location.clone(),
                price: sell,
            });
        }
    }
    best
}

pub fn best_prices_by_good(rows: &[MarketRow]) -> HashMap<GoodSymbol, BestPrices> {
    let mut grouped: HashMap<GoodSymbol, Vec<&MarketRow>> = HashMap::new();
    for row in rows {
        grouped.entry(row.good.symbol.clone()).or_default().push(row);
    }
    grouped
        .into_iter()
        .map(|(good, rows)| (good, best_prices(rows)))
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowHighlight {
    pub best_purchase: bool,
    pub best_sell: bool,
}

pub fn row_highlight(row: &MarketRow, best: &HashMap<GoodSymbol, BestPrices>) -> RowHighlight {
    let Some(prices) = best.get(&row.good.symbol) else {
        return RowHighlight::default();
    };
    RowHighlight {
        best_purchase: prices
            .purchase
            .as_ref()
            .map_or(false, |b| b.location == row.location),
        best_sell: prices
            .sell
            .as_ref()
            .map_or(false, |b| b.location == row.location),
    }
}

/// Parses the trade volume input. Anything that is not a finite, non-negative
/// number resets to 0.
pub fn parse_volume(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarketSort {
    #[default]
    Location,
    Good,
    PurchasePrice,
    SellPrice,
    Quantity,
}

impl MarketSort {
    pub const ALL: [MarketSort; 5] = [
        MarketSort::Location,
        MarketSort::Good,
        MarketSort::PurchasePrice,
        MarketSort::SellPrice,
        MarketSort::Quantity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::Good => "Good",
            Self::PurchasePrice => "Buy price",
            Self::SellPrice => "Sell price",
            Self::Quantity => "Available",
        }
    }
}

/// Stable sort, so equal keys keep their location order.
pub fn sort_rows(rows: &mut [MarketRow], sort: MarketSort, descending: bool) {
    rows.sort_by(|a, b| {
        let ord = match sort {
            MarketSort::Location => a
                .location
                .cmp(&b.location)
                .then_with(|| a.good.symbol.cmp(&b.good.symbol)),
            MarketSort::Good => a
                .good
                .symbol
                .cmp(&b.good.symbol)
                .then_with(|| a.location.cmp(&b.location)),
            MarketSort::PurchasePrice => a
                .good
                .purchase_price_per_unit
                .cmp(&b.good.purchase_price_per_unit),
            MarketSort::SellPrice => a.good.sell_price_per_unit.cmp(&b.good.sell_price_per_unit),
            MarketSort::Quantity => a.good.quantity_available.cmp(&b.good.quantity_available),
        };
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn good(symbol: &str, buy: u32, sell: u32) -> MarketplaceGood {
        MarketplaceGood {
            symbol: symbol.to_string(),
            volume_per_unit: 1,
            price_per_unit: buy,
            spread: sell.saturating_sub(buy),
            purchase_price_per_unit: buy,
            sell_price_per_unit: sell,
            quantity_available: 1_000,
        }
    }

    pub(crate) fn row(location: &str, symbol: &str, buy: u32, sell: u32) -> MarketRow {
        MarketRow {
            location: location.to_string(),
            good: good(symbol, buy, sell),
        }
    }

    #[test]
    fn best_prices_take_min_purchase_and_max_sell() {
        let rows = vec![
            row("A", "FUEL", 10, 15),
            row("B", "FUEL", 8, 20),
            row("C", "FUEL", 12, 18),
        ];

        let best = best_prices(&rows);

        assert_eq!(best.purchase, Some(BestPrice { location: "B".into(), price: 8 }));
        assert_eq!(best.sell, Some(BestPrice { location: "B".into(), price: 20 }));
    }

    #[test]
    fn margin_matches_documented_example() {
        let rows = vec![row("A", "FUEL", 10, 15), row("B", "FUEL", 8, 20)];

        let best = best_prices(&rows);

        assert_eq!(best.margin(5.0), Some(60));
    }

    #[test]
    fn margin_floors_fractional_volume() {
        let rows = vec![row("A", "FUEL", 10, 13)];

        assert_eq!(best_prices(&rows).margin(2.5), Some(7));
    }

    #[test]
    fn margin_is_none_without_rows() {
        assert_eq!(best_prices(&[]).margin(5.0), None);
    }

    #[test]
    fn ties_keep_first_location() {
        let rows = vec![row("A", "FUEL", 8, 20), row("B", "FUEL", 8, 20)];

        let best = best_prices(&rows);

        assert_eq!(best.purchase.unwrap().location, "A");
        assert_eq!(best.sell.unwrap().location, "A");
    }

    #[test]
    fn parse_volume_resets_non_numeric_input() {
        assert_eq!(parse_volume("12"), 12.0);
        assert_eq!(parse_volume(" 3.5 "), 3.5);
        assert_eq!(parse_volume("abc"), 0.0);
        assert_eq!(parse_volume(""), 0.0);
        assert_eq!(parse_volume("-4"), 0.0);
        assert_eq!(parse_volume("NaN"), 0.0);
    }

    #[test]
    fn docked_locations_are_sorted_and_unique() {
        let ships = vec![
            crate::domain::trade::tests::ship("s1", Some("OE-PM-TR"), 50),
            crate::domain::trade::tests::ship("s2", Some("OE-CR"), 50),
            crate::domain::trade::tests::ship("s3", Some("OE-PM-TR"), 50),
            crate::domain::trade::tests::ship("s4", None, 50),
        ];

        assert_eq!(docked_locations(&ships), vec!["OE-CR", "OE-PM-TR"]);
    }

    #[test]
    fn highlight_marks_best_locations_per_good() {
        let rows = vec![
            row("A", "FUEL", 10, 15),
            row("B", "FUEL", 8, 20),
            row("A", "METALS", 5, 9),
            row("B", "METALS", 7, 6),
        ];
        let best = best_prices_by_good(&rows);

        assert_eq!(
            row_highlight(&rows[0], &best),
            RowHighlight { best_purchase: false, best_sell: false }
        );
        assert_eq!(
            row_highlight(&rows[1], &best),
            RowHighlight { best_purchase: true, best_sell: true }
        );
        assert_eq!(
            row_highlight(&rows[2], &best),
            RowHighlight { best_purchase: true, best_sell: true }
        );
    }

    #[test]
    fn filter_rows_keeps_single_good() {
        let rows = vec![row("A", "FUEL", 10, 15), row("A", "METALS", 5, 9)];

        let filtered = filter_rows(&rows, Some("METALS"));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].good.symbol, "METALS");
        assert_eq!(filter_rows(&rows, None).len(), 2);
    }

    #[test]
    fn sort_rows_by_sell_price_descending() {
        let mut rows = vec![
            row("A", "FUEL", 10, 15),
            row("B", "FUEL", 8, 20),
            row("C", "FUEL", 9, 17),
        ];

        sort_rows(&mut rows, MarketSort::SellPrice, true);

        let order: Vec<_> = rows.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn collect_rows_flattens_in_location_order() {
        let a = "A".to_string();
        let b = "B".to_string();
        let a_goods = vec![good("FUEL", 1, 2), good("METALS", 3, 4)];
        let b_goods = vec![good("FUEL", 2, 3)];

        let rows = collect_rows([(&a, a_goods.as_slice()), (&b, b_goods.as_slice())]);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].location, "B");
        assert_eq!(good_options(&rows), vec!["FUEL", "METALS"]);
    }
}
