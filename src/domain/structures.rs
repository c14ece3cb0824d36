//! Structure creation options and deposit/withdraw constraints.

use super::{
    catalog::GoodCatalog,
    entities::{GoodSymbol, Location, LocationSymbol, Ship, Structure, StructureType},
    mutations::Mutation,
    trade::docked_ships,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationOption {
    pub symbol: LocationSymbol,
    pub label: String,
    pub docked_ships: usize,
    pub disabled: bool,
}

/// Locations where `structure_type` may be built. Locations without a docked
/// owned ship are kept but disabled.
pub fn construction_options(
    locations: &[Location],
    structure_type: Option<&StructureType>,
    ships: &[Ship],
) -> Vec<LocationOption> {
    let Some(structure_type) = structure_type else {
        return Vec::new();
    };
    locations
        .iter()
        .filter(|location| location.allows_construction)
        .filter(|location| structure_type.allowed_location_types.contains(&location.kind))
        .map(|location| {
            let docked = docked_ships(ships, &location.symbol).len();
            LocationOption {
                symbol: location.symbol.clone(),
                label: format!("{} ({}) · {}", location.name, location.symbol, location.kind),
                docked_ships: docked,
                disabled: docked == 0,
            }
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateStructureForm {
    pub kind: Option<String>,
    pub location: Option<LocationSymbol>,
}

impl CreateStructureForm {
    pub fn is_ready(&self, options: &[LocationOption]) -> bool {
        self.kind.is_some()
            && self.location.as_deref().map_or(false, |chosen| {
                options
                    .iter()
                    .any(|option| option.symbol == chosen && !option.disabled)
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferKind {
    /// Into one of the user's own structures.
    Deposit,
    /// Out of one of the user's own structures.
    Withdraw,
    /// Into a structure looked up by id, possibly owned by someone else.
    DepositToOther,
}

impl TransferKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deposit | Self::DepositToOther => "Deposit",
            Self::Withdraw => "Withdraw",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransferTarget {
    pub kind: TransferKind,
    pub structure: Structure,
}

impl TransferTarget {
    pub fn new(kind: TransferKind, structure: Structure) -> Self {
        Self { kind, structure }
    }

    pub fn mutation(&self) -> Mutation {
        match self.kind {
            TransferKind::Deposit => Mutation::Deposit,
            TransferKind::Withdraw => Mutation::Withdraw,
            TransferKind::DepositToOther => Mutation::DepositToOther {
                structure_id: self.structure.id.clone(),
            },
        }
    }

    /// Goods the structure accepts (deposit) or hands out (withdraw). For
    /// deposits with a ship selected, only goods that ship carries.
    pub fn goods(&self, ship: Option<&Ship>) -> Vec<GoodSymbol> {
        match self.kind {
            TransferKind::Deposit | TransferKind::DepositToOther => self
                .structure
                .consumes
                .iter()
                .filter(|good| ship.map_or(true, |ship| ship.cargo_quantity(good) > 0))
                .cloned()
                .collect(),
            TransferKind::Withdraw => self.structure.produces.clone(),
        }
    }

    /// Deposit: cargo held. Withdraw: stored quantity and free cargo space.
    pub fn limit(&self, ship: Option<&Ship>, good: &str, catalog: &GoodCatalog) -> u32 {
        let Some(ship) = ship else {
            return 0;
        };
        match self.kind {
            TransferKind::Deposit | TransferKind::DepositToOther => ship.cargo_quantity(good),
            TransferKind::Withdraw => {
                let stored = self.structure.inventory_quantity(good);
                // Weightless goods are bounded by stock alone; unknown goods by raw space.
                let by_space = match catalog.volume_per_unit(good) {
                    Some(volume) => ship.space_available.checked_div(volume).unwrap_or(u32::MAX),
                    None => ship.space_available,
                };
                stored.min(by_space)
            }
        }
    }
}

/// Trims a typed structure id; blank input means no lookup.
pub fn parse_structure_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CargoItem, GoodType, InventoryItem};
    use crate::domain::trade::tests::ship;

    fn location(symbol: &str, kind: &str, allows_construction: bool) -> Location {
        Location {
            symbol: symbol.to_string(),
            kind: kind.to_string(),
            name: symbol.to_string(),
            x: 0,
            y: 0,
            allows_construction,
            traits: Vec::new(),
        }
    }

    fn mine() -> StructureType {
        StructureType {
            kind: "MINE".to_string(),
            name: "Mine".to_string(),
            price: 50_000,
            allowed_location_types: vec!["PLANET".to_string(), "MOON".to_string()],
            allowed_planet_traits: vec!["METAL_ORES".to_string()],
            consumes: vec!["MACHINERY".to_string(), "FUEL".to_string()],
            produces: vec!["METALS".to_string()],
        }
    }

    fn structure() -> Structure {
        Structure {
            id: "st-1".to_string(),
            kind: "MINE".to_string(),
            location: "OE-PM".to_string(),
            active: true,
            status: "Producing".to_string(),
            inventory: vec![InventoryItem {
                good: "METALS".to_string(),
                quantity: 30,
            }],
            consumes: vec!["MACHINERY".to_string(), "FUEL".to_string()],
            produces: vec!["METALS".to_string()],
            owned_by: None,
        }
    }

    #[test]
    fn construction_options_match_rules_and_disable_undocked() {
        let locations = vec![
            location("OE-PM", "PLANET", true),
            location("OE-PM-TR", "MOON", true),
            location("OE-CR", "PLANET", false),
            location("OE-W-XV", "WORMHOLE", true),
        ];
        let ships = vec![ship("s1", Some("OE-PM"), 10)];

        let options = construction_options(&locations, Some(&mine()), &ships);

        let symbols: Vec<_> = options.iter().map(|o| o.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["OE-PM", "OE-PM-TR"]);
        assert!(!options[0].disabled);
        assert_eq!(options[0].docked_ships, 1);
        assert!(options[1].disabled);
    }

    #[test]
    fn construction_options_need_a_structure_type() {
        let locations = vec![location("OE-PM", "PLANET", true)];

        assert!(construction_options(&locations, None, &[]).is_empty());
    }

    #[test]
    fn create_form_rejects_disabled_location() {
        let locations = vec![location("OE-PM", "PLANET", true), location("OE-PM-TR", "MOON", true)];
        let ships = vec![ship("s1", Some("OE-PM"), 10)];
        let options = construction_options(&locations, Some(&mine()), &ships);

        let mut form = CreateStructureForm {
            kind: Some("MINE".to_string()),
            location: Some("OE-PM-TR".to_string()),
        };
        assert!(!form.is_ready(&options));

        form.location = Some("OE-PM".to_string());
        assert!(form.is_ready(&options));
    }

    #[test]
    fn deposit_goods_follow_consumes_and_cargo() {
        let target = TransferTarget::new(TransferKind::Deposit, structure());
        let mut hauler = ship("s1", Some("OE-PM"), 10);
        hauler.cargo = vec![CargoItem {
            good: "FUEL".to_string(),
            quantity: 20,
            total_volume: 20,
        }];

        assert_eq!(target.goods(None), vec!["MACHINERY", "FUEL"]);
        assert_eq!(target.goods(Some(&hauler)), vec!["FUEL"]);
        assert_eq!(target.limit(Some(&hauler), "FUEL", &GoodCatalog::default()), 20);
    }

    #[test]
    fn withdraw_limit_uses_inventory_and_space() {
        let target = TransferTarget::new(TransferKind::Withdraw, structure());
        let catalog = GoodCatalog::from_types(&[GoodType {
            symbol: "METALS".to_string(),
            name: "Metals".to_string(),
            volume_per_unit: 2,
        }]);

        assert_eq!(target.goods(None), vec!["METALS"]);
        assert_eq!(target.limit(Some(&ship("s1", Some("OE-PM"), 100)), "METALS", &catalog), 30);
        assert_eq!(target.limit(Some(&ship("s1", Some("OE-PM"), 20)), "METALS", &catalog), 10);
        assert_eq!(target.limit(None, "METALS", &catalog), 0);
    }

    #[test]
    fn withdraw_of_weightless_good_is_limited_by_inventory() {
        let target = TransferTarget::new(TransferKind::Withdraw, structure());
        let catalog = GoodCatalog::from_types(&[GoodType {
            symbol: "METALS".to_string(),
            name: "Metals".to_string(),
            volume_per_unit: 0,
        }]);
        let full_hold = ship("s1", Some("OE-PM"), 0);

        assert_eq!(target.limit(Some(&full_hold), "METALS", &catalog), 30);
        assert_eq!(
            target.limit(Some(&ship("s1", Some("OE-PM"), 12)), "METALS", &GoodCatalog::default()),
            12
        );
    }

    #[test]
    fn deposit_to_other_targets_the_looked_up_structure() {
        let target = TransferTarget::new(TransferKind::DepositToOther, structure());

        assert_eq!(
            target.mutation(),
            Mutation::DepositToOther {
                structure_id: "st-1".to_string()
            }
        );
        assert_eq!(
            TransferTarget::new(TransferKind::Deposit, structure()).mutation(),
            Mutation::Deposit
        );
    }

    #[test]
    fn structure_id_input_is_trimmed() {
        assert_eq!(parse_structure_id("  ckxyz "), Some("ckxyz".to_string()));
        assert_eq!(parse_structure_id("   "), None);
    }
}
