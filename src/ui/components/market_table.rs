use dioxus::prelude::*;

use crate::domain::{MarketRow, MarketSort, RowHighlight, TradeSide};
use crate::ui::theme;

#[derive(Clone, Debug, PartialEq)]
pub struct MarketRowView {
    pub row: MarketRow,
    pub good_name: String,
    pub highlight: RowHighlight,
    pub docked_ships: usize,
}

#[component]
pub fn MarketTable(
    rows: Vec<MarketRowView>,
    sort: MarketSort,
    descending: bool,
    on_sort: EventHandler<MarketSort>,
    on_trade: EventHandler<(TradeSide, MarketRow)>,
) -> Element {
    let is_empty = rows.is_empty();
    let arrow = if descending { "▼" } else { "▲" };

    rsx! {
        div { class: theme::TABLE_CONTAINER,
            table { class: theme::TABLE,
                thead {
                    tr {
                        for column in MarketSort::ALL {
                            th {
                                button {
                                    class: theme::btn_small(column == sort),
                                    onclick: move |_| on_sort.call(column),
                                    if column == sort {
                                        "{column.label()} {arrow}"
                                    } else {
                                        "{column.label()}"
                                    }
                                }
                            }
                        }
                        th { "Volume" }
                        th {}
                    }
                }
                tbody {
                    for view in rows {
                        MarketRowItem { key: "{view.row.location}-{view.row.good.symbol}", view, on_trade }
                    }
                    if is_empty {
                        tr {
                            td {
                                class: theme::TEXT_MUTED,
                                colspan: "7",
                                "No marketplace data for your docked locations yet."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MarketRowItem(view: MarketRowView, on_trade: EventHandler<(TradeSide, MarketRow)>) -> Element {
    let good = &view.row.good;
    let can_trade = view.docked_ships > 0;
    let buy_row = view.row.clone();
    let sell_row = view.row.clone();

    rsx! {
        tr {
            td { "{view.row.location}" }
            td {
                "{view.good_name}"
                span { class: theme::TEXT_MUTED, " {good.symbol}" }
            }
            td { class: theme::price_cell(view.highlight.best_purchase), "{good.purchase_price_per_unit}" }
            td { class: theme::price_cell(view.highlight.best_sell), "{good.sell_price_per_unit}" }
            td { class: "num", "{good.quantity_available}" }
            td { class: "num", "{good.volume_per_unit}" }
            td {
                button {
                    class: theme::btn_small(false),
                    disabled: !can_trade,
                    onclick: move |_| on_trade.call((TradeSide::Buy, buy_row.clone())),
                    "Buy"
                }
                button {
                    class: theme::btn_small(false),
                    disabled: !can_trade,
                    onclick: move |_| on_trade.call((TradeSide::Sell, sell_row.clone())),
                    "Sell"
                }
            }
        }
    }
}
