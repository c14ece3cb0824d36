//! Ship / good / quantity inputs shared by the trade and transfer dialogs.

use dioxus::prelude::*;

use crate::domain::{clamp_quantity, Ship, TradeForm};
use crate::ui::theme;

#[derive(Clone, Debug, PartialEq)]
pub struct GoodChoice {
    pub symbol: String,
    pub label: String,
}

/// `goods` is `None` when the dialog fixes the good.
#[component]
pub fn TradeFields(
    ships: Vec<Ship>,
    goods: Option<Vec<GoodChoice>>,
    form: TradeForm,
    limit: u32,
    disabled: bool,
    on_change: EventHandler<TradeForm>,
) -> Element {
    let selected_ship = form.ship_id.clone().unwrap_or_default();
    let selected_good = form.good.clone().unwrap_or_default();
    let quantity = if form.quantity == 0 {
        String::new()
    } else {
        form.quantity.to_string()
    };
    let no_ships = ships.is_empty();

    let on_ship = {
        let form = form.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            let mut next = form.clone();
            next.ship_id = (!value.is_empty()).then_some(value);
            on_change.call(next);
        }
    };
    let on_good = {
        let form = form.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            let mut next = form.clone();
            next.good = (!value.is_empty()).then_some(value);
            next.quantity = 0;
            on_change.call(next);
        }
    };
    let on_quantity = {
        let form = form.clone();
        move |evt: FormEvent| {
            let mut next = form.clone();
            next.quantity = clamp_quantity(&evt.value(), limit);
            on_change.call(next);
        }
    };

    rsx! {
        div { class: "form-stack",
            label {
                span { class: theme::LABEL, "Ship" }
                select {
                    class: theme::INPUT,
                    disabled: disabled || no_ships,
                    value: "{selected_ship}",
                    onchange: on_ship,
                    option { value: "", "Select a docked ship" }
                    for ship in ships.iter() {
                        option {
                            value: "{ship.id}",
                            selected: ship.id == selected_ship,
                            "{ship.display_name()} · {ship.space_available} free"
                        }
                    }
                }
            }
            if no_ships {
                p { class: theme::NOTICE_WARNING, "No ship is docked here." }
            }
            if let Some(goods) = goods.as_ref() {
                label {
                    span { class: theme::LABEL, "Good" }
                    select {
                        class: theme::INPUT,
                        disabled: disabled,
                        value: "{selected_good}",
                        onchange: on_good,
                        option { value: "", "Select a good" }
                        for good in goods.iter() {
                            option {
                                value: "{good.symbol}",
                                selected: good.symbol == selected_good,
                                "{good.label}"
                            }
                        }
                    }
                }
            }
            label {
                span { class: theme::LABEL, "Quantity (max {limit})" }
                input {
                    class: theme::INPUT,
                    r#type: "number",
                    min: "0",
                    max: "{limit}",
                    disabled: disabled,
                    value: "{quantity}",
                    oninput: on_quantity,
                }
            }
        }
    }
}
