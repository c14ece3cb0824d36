use dioxus::prelude::*;

use crate::domain::{
    best_prices, best_prices_by_good, can_submit, collect_rows, docked_locations, docked_ships,
    filter_rows, good_options, known_systems, merge_listings, parse_volume, purchase_options,
    purchase_success, row_highlight, sell_success, ship_purchase_success, sort_rows, GoodCatalog,
    MarketRow, MarketSort, MarketTrade, Modal, Mutation, QueryKey, Ship, ShipListing,
    ShipPurchaseForm, TradeForm, TradeSide,
};
use crate::infra::SpaceTradersClient;
use crate::ui::{
    components::{
        market_table::{MarketRowView, MarketTable},
        modal::ModalFrame,
        query_status::QueryStatus,
        ship_listing_table::ShipListingTable,
        trade_fields::TradeFields,
    },
    hooks::{use_good_types, use_mutator, use_queries, use_ships, Mutator},
    theme,
};
use crate::util::format_credits;

#[component]
pub fn MarketplacePage() -> Element {
    let ships = use_ships();
    let good_types = use_good_types();
    let mutator = use_mutator();

    let markets = use_queries(
        move || {
            docked_locations(&ships.data().unwrap_or_default())
                .into_iter()
                .map(QueryKey::Marketplace)
                .collect()
        },
        |client, key| async move {
            client
                .get_location_marketplace(key.param().unwrap_or_default())
                .await
        },
    );
    let listings = use_queries(
        move || {
            known_systems(ships.data().as_deref())
                .into_iter()
                .map(QueryKey::ShipListings)
                .collect()
        },
        |client, key| async move {
            client
                .get_ship_listings(key.param().unwrap_or_default())
                .await
        },
    );

    let mut good_filter = use_signal(String::new);
    let mut volume_input = use_signal(|| "1".to_string());
    let mut sort = use_signal(MarketSort::default);
    let mut descending = use_signal(|| false);
    let mut trade = use_signal(Modal::<MarketTrade>::default);
    let mut ship_purchase = use_signal(Modal::<ShipListing, ShipPurchaseForm>::default);

    let ship_list = ships.data().unwrap_or_default();
    let catalog = GoodCatalog::from_types(&good_types.data().unwrap_or_default());

    let ready_markets = markets.ready();
    let rows = collect_rows(
        ready_markets
            .iter()
            .map(|(location, goods)| (location, goods.as_slice())),
    );
    let filter = catalog.resolve(&good_filter());
    let filter_choices: Vec<(String, String)> = good_options(&rows)
        .into_iter()
        .map(|symbol| (catalog.label(&symbol).to_string(), symbol))
        .collect();

    let mut visible = filter_rows(&rows, filter.as_deref());
    let best_by_good = best_prices_by_good(&visible);
    let summary = filter.as_ref().map(|_| best_prices(&visible));
    let volume = parse_volume(&volume_input());
    let margin = summary.as_ref().and_then(|best| best.margin(volume));

    sort_rows(&mut visible, sort(), descending());
    let row_views: Vec<MarketRowView> = visible
        .into_iter()
        .map(|row| MarketRowView {
            highlight: row_highlight(&row, &best_by_good),
            good_name: catalog.label(&row.good.symbol).to_string(),
            docked_ships: docked_ships(&ship_list, &row.location).len(),
            row,
        })
        .collect();

    let ready_listings = listings.ready();
    let merged_listings = merge_listings(
        ready_listings
            .iter()
            .map(|(_, listings)| listings.as_slice()),
    );

    let on_sort = move |column: MarketSort| {
        if sort() == column {
            descending.set(!descending());
        } else {
            sort.set(column);
            descending.set(false);
        }
    };
    let on_trade = move |(side, row): (TradeSide, MarketRow)| {
        let form = TradeForm::with_good(row.good.symbol.clone());
        trade.set(Modal::open(
            MarketTrade {
                side,
                location: row.location,
                good: row.good,
            },
            form,
        ));
    };
    let on_buy_ship = move |listing: ShipListing| {
        ship_purchase.set(Modal::open(listing, ShipPurchaseForm::default()));
    };

    rsx! {
        section {
            h2 { "Marketplace" }
            p { class: theme::TEXT_MUTED, "Goods on offer wherever one of your ships is docked." }
        }

        section { class: theme::PANEL,
            div { class: "form-row",
                label {
                    span { class: theme::LABEL, "Good" }
                    input {
                        class: theme::INPUT,
                        list: "good-names",
                        placeholder: "All goods",
                        value: "{good_filter}",
                        oninput: move |evt| good_filter.set(evt.value()),
                    }
                    datalist { id: "good-names",
                        for (label, symbol) in filter_choices {
                            option { key: "{symbol}", value: "{label}" }
                        }
                    }
                }
                label {
                    span { class: theme::LABEL, "Trade volume" }
                    input {
                        class: theme::INPUT,
                        r#type: "number",
                        min: "0",
                        value: "{volume_input}",
                        oninput: move |evt| volume_input.set(evt.value()),
                    }
                }
            }
        }

        if let Some(best) = summary {
            section { class: theme::PANEL_HIGHLIGHT,
                h2 { "Best prices" }
                div { class: "kpi-row",
                    div {
                        span { class: theme::LABEL, "Buy at" }
                        if let Some(buy) = best.purchase.as_ref() {
                            p { class: "kpi-value", "{buy.price}" }
                            p { class: theme::TEXT_MUTED, "{buy.location}" }
                        } else {
                            p { class: theme::TEXT_MUTED, "-" }
                        }
                    }
                    div {
                        span { class: theme::LABEL, "Sell at" }
                        if let Some(sell) = best.sell.as_ref() {
                            p { class: "kpi-value", "{sell.price}" }
                            p { class: theme::TEXT_MUTED, "{sell.location}" }
                        } else {
                            p { class: theme::TEXT_MUTED, "-" }
                        }
                    }
                    div {
                        span { class: theme::LABEL, "Margin for {volume} units" }
                        if let Some(margin) = margin {
                            p { class: "kpi-value {theme::margin_class(margin)}", {format_credits(margin)} }
                        } else {
                            p { class: theme::TEXT_MUTED, "-" }
                        }
                    }
                }
            }
        }

        QueryStatus { what: "Marketplace", loading: markets.loading(), errors: markets.errors() }
        MarketTable {
            rows: row_views,
            sort: sort(),
            descending: descending(),
            on_sort: on_sort,
            on_trade: on_trade,
        }

        section {
            h2 { "Shipyards" }
            p { class: theme::TEXT_MUTED, "Ship models sold in the systems where your fleet operates." }
        }
        QueryStatus { what: "Ship listings", loading: listings.loading(), errors: listings.errors() }
        ShipListingTable { listings: merged_listings, on_buy: on_buy_ship }

        if trade.read().is_open() {
            TradeDialog { modal: trade, ships: ship_list.clone(), catalog: catalog.clone(), mutator }
        }
        if ship_purchase.read().is_open() {
            ShipPurchaseDialog { modal: ship_purchase, ships: ships.data(), mutator }
        }
    }
}

#[component]
fn TradeDialog(
    mut modal: Signal<Modal<MarketTrade>>,
    ships: Vec<Ship>,
    catalog: GoodCatalog,
    mutator: Mutator,
) -> Element {
    let client = use_context::<SpaceTradersClient>();
    let current = modal();
    let (Some(target), Some(form)) = (current.target().cloned(), current.form().cloned()) else {
        return rsx! {};
    };
    let submitting = current.is_submitting();

    let docked: Vec<Ship> = docked_ships(&ships, &target.location)
        .into_iter()
        .cloned()
        .collect();
    let limit = target.limit(form.selected_ship(&docked));
    let phase = form.phase(&docked, limit);
    let ready = can_submit(phase, submitting || mutator.in_flight());

    let good_name = catalog.label(&target.good.symbol).to_string();
    let title = format!("{} {} at {}", target.side.label(), good_name, target.location);
    let total = u64::from(form.quantity) * u64::from(target.unit_price());

    let on_submit = {
        let docked = docked.clone();
        let good_name = good_name.clone();
        move |_| submit_trade(modal, &docked, &client, mutator, &good_name)
    };

    rsx! {
        ModalFrame {
            title,
            busy: submitting,
            on_close: move |_| modal.write().close(),
            p { class: theme::TEXT_MUTED, "{target.unit_price()} credits per unit · {target.good.quantity_available} available" }
            TradeFields {
                ships: docked,
                goods: None,
                form,
                limit,
                disabled: submitting,
                on_change: move |next: TradeForm| modal.write().edit(|form| *form = next),
            }
            p { "Total: {format_credits(total as i64)} credits" }
            div { class: "modal-actions",
                button {
                    class: theme::BTN_SECONDARY,
                    disabled: submitting,
                    onclick: move |_| modal.write().close(),
                    "Cancel"
                }
                button {
                    class: theme::BTN_PRIMARY,
                    disabled: !ready,
                    onclick: on_submit,
                    if submitting { "Submitting..." } else { "{target.side.label()}" }
                }
            }
        }
    }
}

fn submit_trade(
    mut modal: Signal<Modal<MarketTrade>>,
    ships: &[Ship],
    client: &SpaceTradersClient,
    mutator: Mutator,
    good_name: &str,
) {
    let Some((target, form)) = modal.write().begin_submit() else {
        return;
    };
    let Some(ship) = form.selected_ship(ships).cloned() else {
        modal.write().finish(false);
        return;
    };

    let client = client.clone();
    let ship_id = ship.id.clone();
    let good = target.good.symbol.clone();
    let quantity = form.quantity;
    let good_name = good_name.to_string();
    let done = move |succeeded: bool| {
        let mut modal = modal;
        modal.write().finish(succeeded);
    };

    match target.side {
        TradeSide::Buy => mutator.submit(
            target.mutation(),
            async move { client.purchase(&ship_id, &good, quantity).await },
            move |receipt| purchase_success(receipt, &good_name, &ship),
            done,
        ),
        TradeSide::Sell => mutator.submit(
            target.mutation(),
            async move { client.sell(&ship_id, &good, quantity).await },
            move |receipt| sell_success(receipt, &good_name, &ship),
            done,
        ),
    }
}

#[component]
fn ShipPurchaseDialog(
    mut modal: Signal<Modal<ShipListing, ShipPurchaseForm>>,
    ships: Option<Vec<Ship>>,
    mutator: Mutator,
) -> Element {
    let client = use_context::<SpaceTradersClient>();
    let current = modal();
    let (Some(listing), Some(form)) = (current.target().cloned(), current.form().cloned()) else {
        return rsx! {};
    };
    let submitting = current.is_submitting();

    let fleet_known = ships.is_some();
    let options = purchase_options(&listing, ships.as_deref());
    let price = form.price(&options);
    let ready = form.is_ready(&options) && !submitting && !mutator.in_flight();
    let choices: Vec<(String, String)> = options
        .iter()
        .map(|offer| {
            (
                offer.location.clone(),
                format!("{} · {} credits", offer.location, format_credits(offer.price as i64)),
            )
        })
        .collect();
    let selected = form.location.clone().unwrap_or_default();
    let no_options = choices.is_empty();

    let on_submit = move |_| {
        let Some((listing, form)) = modal.write().begin_submit() else {
            return;
        };
        let Some(location) = form.location.clone() else {
            modal.write().finish(false);
            return;
        };
        let client = client.clone();
        let kind = listing.kind.clone();
        let target = location.clone();
        mutator.submit(
            Mutation::BuyShip,
            async move { client.buy_ship(&target, &kind).await },
            move |purchase| ship_purchase_success(purchase, &location),
            move |succeeded| {
                let mut modal = modal;
                modal.write().finish(succeeded);
            },
        );
    };

    rsx! {
        ModalFrame {
            title: format!("Buy {}", listing.kind),
            busy: submitting,
            on_close: move |_| modal.write().close(),
            label {
                span { class: theme::LABEL, "Purchase location" }
                select {
                    class: theme::INPUT,
                    disabled: submitting || no_options,
                    value: "{selected}",
                    onchange: move |evt| {
                        let value = evt.value();
                        modal.write().edit(|form| form.location = (!value.is_empty()).then_some(value));
                    },
                    option { value: "", "Select a location" }
                    for (symbol, label) in choices {
                        option { value: "{symbol}", selected: symbol == selected, "{label}" }
                    }
                }
            }
            if !fleet_known {
                p { class: theme::TEXT_MUTED, "Waiting for your fleet to load..." }
            } else if no_options {
                p { class: theme::NOTICE_WARNING, "None of your ships is docked where this model is sold." }
            }
            if let Some(price) = price {
                p { "Price: {format_credits(price as i64)} credits" }
            }
            div { class: "modal-actions",
                button {
                    class: theme::BTN_SECONDARY,
                    disabled: submitting,
                    onclick: move |_| modal.write().close(),
                    "Cancel"
                }
                button {
                    class: theme::BTN_PRIMARY,
                    disabled: !ready,
                    onclick: on_submit,
                    if submitting { "Purchasing..." } else { "Buy ship" }
                }
            }
        }
    }
}
