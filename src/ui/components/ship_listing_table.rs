use dioxus::prelude::*;

use crate::domain::{cheapest_price, ShipListing};
use crate::ui::theme;
use crate::util::format_credits;

#[component]
pub fn ShipListingTable(listings: Vec<ShipListing>, on_buy: EventHandler<ShipListing>) -> Element {
    let is_empty = listings.is_empty();

    rsx! {
        div { class: theme::TABLE_CONTAINER,
            table { class: theme::TABLE,
                thead {
                    tr {
                        th { "Type" }
                        th { "Manufacturer" }
                        th { "Class" }
                        th { class: "num", "Cargo" }
                        th { class: "num", "Speed" }
                        th { class: "num", "Plating" }
                        th { class: "num", "Weapons" }
                        th { class: "num", "From" }
                        th { "Locations" }
                        th {}
                    }
                }
                tbody {
                    for listing in listings {
                        tr { key: "{listing.kind}",
                            td { "{listing.kind}" }
                            td { {listing.manufacturer.clone().unwrap_or_default()} }
                            td { {listing.class.clone().unwrap_or_default()} }
                            td { class: "num", "{listing.max_cargo}" }
                            td { class: "num", "{listing.speed}" }
                            td { class: "num", "{listing.plating}" }
                            td { class: "num", "{listing.weapons}" }
                            td { class: "num",
                                {cheapest_price(&listing).map(|price| format_credits(price as i64)).unwrap_or_else(|| "-".to_string())}
                            }
                            td { class: theme::TEXT_MUTED,
                                {listing.purchase_locations.iter().map(|offer| offer.location.as_str()).collect::<Vec<_>>().join(", ")}
                            }
                            td {
                                button {
                                    class: theme::btn_small(false),
                                    onclick: {
                                        let listing = listing.clone();
                                        move |_| on_buy.call(listing.clone())
                                    },
                                    "Buy"
                                }
                            }
                        }
                    }
                    if is_empty {
                        tr {
                            td { class: theme::TEXT_MUTED, colspan: "10", "No ships are listed in your known systems." }
                        }
                    }
                }
            }
        }
    }
}
