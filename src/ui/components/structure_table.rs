use dioxus::prelude::*;

use crate::domain::{GoodCatalog, NameTable, Structure, TransferKind};
use crate::ui::theme;

#[component]
pub fn StructureTable(
    structures: Vec<Structure>,
    type_names: NameTable,
    goods: GoodCatalog,
    on_transfer: EventHandler<(TransferKind, Structure)>,
) -> Element {
    let is_empty = structures.is_empty();

    rsx! {
        div { class: theme::TABLE_CONTAINER,
            table { class: theme::TABLE,
                thead {
                    tr {
                        th { "Id" }
                        th { "Type" }
                        th { "Location" }
                        th { "Status" }
                        th { "Inventory" }
                        th { "Consumes" }
                        th { "Produces" }
                        th {}
                    }
                }
                tbody {
                    for structure in structures {
                        tr { key: "{structure.id}",
                            td { class: theme::TEXT_MUTED, "{structure.id}" }
                            td { {type_names.label(&structure.kind).to_string()} }
                            td { "{structure.location}" }
                            td {
                                if structure.active { "Active" } else { "Inactive" }
                                span { class: theme::TEXT_MUTED, " {structure.status}" }
                            }
                            td { {inventory_summary(&structure, &goods)} }
                            td { {good_list(&structure.consumes, &goods)} }
                            td { {good_list(&structure.produces, &goods)} }
                            td {
                                button {
                                    class: theme::btn_small(false),
                                    onclick: {
                                        let structure = structure.clone();
                                        move |_| on_transfer.call((TransferKind::Deposit, structure.clone()))
                                    },
                                    "Deposit"
                                }
                                button {
                                    class: theme::btn_small(false),
                                    onclick: {
                                        let structure = structure.clone();
                                        move |_| on_transfer.call((TransferKind::Withdraw, structure.clone()))
                                    },
                                    "Withdraw"
                                }
                            }
                        }
                    }
                    if is_empty {
                        tr {
                            td { class: theme::TEXT_MUTED, colspan: "8", "You do not own any structures yet." }
                        }
                    }
                }
            }
        }
    }
}

/// Detail card for a structure looked up by id.
#[component]
pub fn StructureCard(
    structure: Structure,
    type_names: NameTable,
    goods: GoodCatalog,
    on_deposit: EventHandler<Structure>,
) -> Element {
    let owner = structure
        .owned_by
        .as_ref()
        .map(|owner| owner.username.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let deposit_target = structure.clone();

    rsx! {
        div { class: theme::PANEL,
            h2 { "{type_names.label(&structure.kind)} at {structure.location}" }
            p { class: theme::TEXT_MUTED, "{structure.id} · owned by {owner} · {structure.status}" }
            p { "Inventory: " {inventory_summary(&structure, &goods)} }
            p { "Consumes: " {good_list(&structure.consumes, &goods)} }
            p { "Produces: " {good_list(&structure.produces, &goods)} }
            button {
                class: theme::BTN_PRIMARY,
                onclick: move |_| on_deposit.call(deposit_target.clone()),
                "Deposit"
            }
        }
    }
}

fn inventory_summary(structure: &Structure, goods: &GoodCatalog) -> String {
    if structure.inventory.is_empty() {
        return "empty".to_string();
    }
    structure
        .inventory
        .iter()
        .map(|item| format!("{} × {}", item.quantity, goods.label(&item.good)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn good_list(symbols: &[String], goods: &GoodCatalog) -> String {
    symbols
        .iter()
        .map(|symbol| goods.label(symbol))
        .collect::<Vec<_>>()
        .join(", ")
}
