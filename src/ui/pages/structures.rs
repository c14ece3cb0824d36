use dioxus::prelude::*;

use crate::domain::{
    can_submit, construction_options, docked_ships, known_systems, parse_structure_id,
    structure_created, structure_type_names, transfer_success, CreateStructureForm, GoodCatalog,
    Location, Modal, Mutation, NameTable, QueryCache, QueryKey, QueryState, Ship, Structure,
    StructureTransfer, StructureType, TradeForm, TransferKind, TransferTarget,
};
use crate::infra::SpaceTradersClient;
use crate::ui::{
    components::{
        modal::ModalFrame,
        query_status::QueryStatus,
        structure_table::{StructureCard, StructureTable},
        trade_fields::{GoodChoice, TradeFields},
    },
    hooks::{
        use_good_types, use_mutator, use_my_structures, use_queries, use_query, use_ships,
        use_structure_types, Mutator,
    },
    theme,
};
use crate::util::format_credits;

#[component]
pub fn StructuresPage() -> Element {
    let ships = use_ships();
    let good_types = use_good_types();
    let structure_types = use_structure_types();
    let my_structures = use_my_structures();
    let mutator = use_mutator();

    let locations = use_queries(
        move || {
            known_systems(ships.data().as_deref())
                .into_iter()
                .map(QueryKey::SystemLocations)
                .collect()
        },
        |client, key| async move {
            client
                .get_system_locations(key.param().unwrap_or_default())
                .await
        },
    );

    let mut transfer = use_signal(Modal::<TransferTarget>::default);

    let ship_list = ships.data().unwrap_or_default();
    let catalog = GoodCatalog::from_types(&good_types.data().unwrap_or_default());
    let types = structure_types.data().unwrap_or_default();
    let type_names = structure_type_names(&types);
    let known_locations: Vec<Location> = locations
        .ready()
        .into_iter()
        .flat_map(|(_, locations)| locations)
        .collect();
    let structures_state = my_structures.state();

    let on_transfer = move |(kind, structure): (TransferKind, Structure)| {
        transfer.set(Modal::open(
            TransferTarget::new(kind, structure),
            TradeForm::default(),
        ));
    };
    let on_deposit_other = move |structure: Structure| {
        transfer.set(Modal::open(
            TransferTarget::new(TransferKind::DepositToOther, structure),
            TradeForm::default(),
        ));
    };

    rsx! {
        section {
            h2 { "Structures" }
            p { class: theme::TEXT_MUTED, "Build structures and move goods between them and your ships." }
        }

        QueryStatus { what: "Locations", loading: locations.loading(), errors: locations.errors() }
        CreateStructurePanel {
            types: types.clone(),
            locations: known_locations,
            ships: ship_list.clone(),
            type_names: type_names.clone(),
            mutator,
        }

        section {
            h2 { "Your structures" }
            if let Some(message) = structures_state.error() {
                div { class: theme::NOTICE_ERROR, "Structures unavailable: {message}" }
            }
            if structures_state.is_loading() {
                p { class: theme::TEXT_MUTED, "Loading structures..." }
            }
            if let Some(structures) = structures_state.data() {
                StructureTable {
                    structures: structures.clone(),
                    type_names: type_names.clone(),
                    goods: catalog.clone(),
                    on_transfer: on_transfer,
                }
            }
        }

        StructureLookup {
            type_names: type_names.clone(),
            catalog: catalog.clone(),
            on_deposit: on_deposit_other,
        }

        if transfer.read().is_open() {
            TransferDialog { modal: transfer, ships: ship_list.clone(), catalog: catalog.clone(), mutator }
        }
    }
}

#[component]
fn CreateStructurePanel(
    types: Vec<StructureType>,
    locations: Vec<Location>,
    ships: Vec<Ship>,
    type_names: NameTable,
    mutator: Mutator,
) -> Element {
    let client = use_context::<SpaceTradersClient>();
    let mut form = use_signal(CreateStructureForm::default);

    let current = form();
    let selected_type = current
        .kind
        .as_deref()
        .and_then(|kind| types.iter().find(|candidate| candidate.kind == kind));
    let options = construction_options(&locations, selected_type, &ships);
    let ready = current.is_ready(&options) && !mutator.in_flight();
    let selected_kind = current.kind.clone().unwrap_or_default();
    let selected_location = current.location.clone().unwrap_or_default();
    let details = selected_type.map(|kind| {
        format!(
            "{} credits · consumes {} · produces {}",
            format_credits(kind.price as i64),
            kind.consumes.join(", "),
            kind.produces.join(", ")
        )
    });

    let on_submit = move |_| {
        let snapshot = form();
        let (Some(kind), Some(location)) = (snapshot.kind, snapshot.location) else {
            return;
        };
        let client = client.clone();
        let type_name = type_names.label(&kind).to_string();
        mutator.submit(
            Mutation::CreateStructure,
            async move { client.create_structure(&location, &kind).await },
            move |structure| structure_created(structure, &type_name),
            move |succeeded| {
                let mut form = form;
                if succeeded {
                    form.set(CreateStructureForm::default());
                }
            },
        );
    };

    rsx! {
        section { class: theme::PANEL,
            h2 { "New structure" }
            div { class: "form-row",
                label {
                    span { class: theme::LABEL, "Type" }
                    select {
                        class: theme::INPUT,
                        value: "{selected_kind}",
                        onchange: move |evt| {
                            let value = evt.value();
                            form.set(CreateStructureForm {
                                kind: (!value.is_empty()).then_some(value),
                                location: None,
                            });
                        },
                        option { value: "", "Select a structure type" }
                        for kind in types.iter() {
                            option {
                                value: "{kind.kind}",
                                selected: kind.kind == selected_kind,
                                "{kind.name}"
                            }
                        }
                    }
                }
                label {
                    span { class: theme::LABEL, "Location" }
                    select {
                        class: theme::INPUT,
                        disabled: options.is_empty(),
                        value: "{selected_location}",
                        onchange: move |evt| {
                            let value = evt.value();
                            form.with_mut(|form| form.location = (!value.is_empty()).then_some(value));
                        },
                        option { value: "", "Select a location" }
                        for choice in options.iter() {
                            option {
                                value: "{choice.symbol}",
                                disabled: choice.disabled,
                                selected: choice.symbol == selected_location,
                                if choice.disabled {
                                    "{choice.label} (no ship docked)"
                                } else {
                                    "{choice.label} ({choice.docked_ships} docked)"
                                }
                            }
                        }
                    }
                }
                button {
                    class: theme::BTN_PRIMARY,
                    disabled: !ready,
                    onclick: on_submit,
                    if mutator.in_flight() { "Building..." } else { "Build" }
                }
            }
            if let Some(details) = details {
                p { class: theme::TEXT_MUTED, "{details}" }
            }
            if selected_type.is_some() && options.is_empty() {
                p { class: theme::NOTICE_WARNING, "No known location accepts this structure type." }
            }
        }
    }
}

#[component]
fn StructureLookup(
    type_names: NameTable,
    catalog: GoodCatalog,
    on_deposit: EventHandler<Structure>,
) -> Element {
    let mut cache = use_context::<Signal<QueryCache>>();
    let mut input = use_signal(String::new);
    let mut lookup_id = use_signal(|| None::<String>);

    let on_lookup = move |_| {
        let next = parse_structure_id(&input());
        if let Some(key) = repeat_lookup(lookup_id.peek().as_deref(), next.as_deref()) {
            cache.with_mut(|cache| cache.invalidate(&key));
        }
        lookup_id.set(next);
    };

    rsx! {
        section { class: theme::PANEL,
            h2 { "Find a structure" }
            div { class: "form-row",
                label {
                    span { class: theme::LABEL, "Structure id" }
                    input {
                        class: theme::INPUT,
                        value: "{input}",
                        oninput: move |evt| input.set(evt.value()),
                    }
                }
                button {
                    class: theme::BTN_SECONDARY,
                    onclick: on_lookup,
                    "Look up"
                }
            }
            if lookup_id.read().is_some() {
                StructureLookupResult { id: lookup_id, type_names, catalog, on_deposit }
            }
        }
    }
}

/// The key to refetch when the same id is looked up again. Lookups are not
/// retried automatically, so this is the manual retry.
fn repeat_lookup(current: Option<&str>, next: Option<&str>) -> Option<QueryKey> {
    match (current, next) {
        (Some(current), Some(next)) if current == next => {
            Some(QueryKey::Structure(next.to_string()))
        }
        _ => None,
    }
}

#[component]
fn StructureLookupResult(
    id: Signal<Option<String>>,
    type_names: NameTable,
    catalog: GoodCatalog,
    on_deposit: EventHandler<Structure>,
) -> Element {
    let structure = use_query(
        move || QueryKey::Structure(id().unwrap_or_default()),
        |client, key| async move {
            client
                .get_structure_info(key.param().unwrap_or_default())
                .await
        },
    );

    match structure.state() {
        QueryState::Loading => rsx! {
            p { class: theme::TEXT_MUTED, "Looking up structure..." }
        },
        QueryState::Failed(message) => rsx! {
            div { class: theme::NOTICE_ERROR, "Lookup failed: {message}" }
        },
        QueryState::Ready(found) => rsx! {
            StructureCard { structure: found, type_names, goods: catalog, on_deposit }
        },
    }
}

#[component]
fn TransferDialog(
    mut modal: Signal<Modal<TransferTarget>>,
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

    let docked: Vec<Ship> = docked_ships(&ships, &target.structure.location)
        .into_iter()
        .cloned()
        .collect();
    let selected = form.selected_ship(&docked);
    let goods: Vec<GoodChoice> = target
        .goods(selected)
        .into_iter()
        .map(|symbol| GoodChoice {
            label: catalog.label(&symbol).to_string(),
            symbol,
        })
        .collect();
    let limit = form
        .good
        .as_deref()
        .map_or(0, |good| target.limit(selected, good, &catalog));
    let phase = form.phase(&docked, limit);
    let ready = can_submit(phase, submitting || mutator.in_flight());
    let nothing_to_move = selected.is_some() && goods.is_empty();
    let empty_notice = match target.kind {
        TransferKind::Withdraw => "This structure produces nothing to withdraw.",
        _ => "The selected ship carries nothing this structure accepts.",
    };
    let title = format!(
        "{} · {} at {}",
        target.kind.label(),
        target.structure.id,
        target.structure.location
    );

    let on_submit = {
        let docked = docked.clone();
        let catalog = catalog.clone();
        move |_| submit_transfer(modal, &docked, &client, mutator, &catalog)
    };

    rsx! {
        ModalFrame {
            title,
            busy: submitting,
            on_close: move |_| modal.write().close(),
            TradeFields {
                ships: docked,
                goods: Some(goods),
                form,
                limit,
                disabled: submitting,
                on_change: move |next: TradeForm| modal.write().edit(|form| *form = next),
            }
            if nothing_to_move {
                p { class: theme::NOTICE_WARNING, "{empty_notice}" }
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
                    if submitting { "Submitting..." } else { "{target.kind.label()}" }
                }
            }
        }
    }
}

fn submit_transfer(
    mut modal: Signal<Modal<TransferTarget>>,
    ships: &[Ship],
    client: &SpaceTradersClient,
    mutator: Mutator,
    catalog: &GoodCatalog,
) {
    let Some((target, form)) = modal.write().begin_submit() else {
        return;
    };
    let (Some(ship), Some(good)) = (form.selected_ship(ships).cloned(), form.good.clone()) else {
        modal.write().finish(false);
        return;
    };

    let mutation = target.mutation();
    let structure_id = target.structure.id.clone();
    let good_name = catalog.label(&good).to_string();
    let quantity = form.quantity;
    let client = client.clone();
    let request = {
        let structure_id = structure_id.clone();
        let kind = target.kind;
        async move {
            match kind {
                TransferKind::Deposit => {
                    client
                        .deposit(&structure_id, &ship.id, &good, quantity)
                        .await
                }
                TransferKind::Withdraw => {
                    client
                        .withdraw(&structure_id, &ship.id, &good, quantity)
                        .await
                }
                TransferKind::DepositToOther => {
                    client
                        .deposit_to_other_structure(&structure_id, &ship.id, &good, quantity)
                        .await
                }
            }
        }
    };
    let describe = {
        let mutation = mutation.clone();
        move |moved: &StructureTransfer| transfer_success(&mutation, moved, &good_name, &structure_id)
    };

    mutator.submit(mutation, request, describe, move |succeeded| {
        let mut modal = modal;
        modal.write().finish(succeeded);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_again_refetches_the_lookup() {
        assert_eq!(
            repeat_lookup(Some("st-1"), Some("st-1")),
            Some(QueryKey::Structure("st-1".to_string()))
        );
    }

    #[test]
    fn new_or_cleared_id_needs_no_invalidation() {
        assert_eq!(repeat_lookup(None, Some("st-1")), None);
        assert_eq!(repeat_lookup(Some("st-1"), Some("st-2")), None);
        assert_eq!(repeat_lookup(Some("st-1"), None), None);
    }
}
