//! Ship listings across known systems and where a listing may be bought.

use std::collections::BTreeMap;

use super::entities::{system_of, LocationSymbol, PurchaseLocation, Ship, ShipListing};

/// System every new account starts in; used to bootstrap the first purchase.
pub const STARTING_SYSTEM: &str = "OE";

/// Systems where the user has a docked ship, deduplicated and sorted. A
/// loaded fleet with no docked ship falls back to the starting system; an
/// unknown fleet (`None`) yields nothing.
pub fn known_systems(ships: Option<&[Ship]>) -> Vec<String> {
    let Some(ships) = ships else {
        return Vec::new();
    };
    let mut systems: Vec<String> = ships
        .iter()
        .filter_map(|ship| ship.location.as_deref())
        .map(|location| system_of(location).to_string())
        .collect();
    systems.sort();
    systems.dedup();
    if systems.is_empty() {
        systems.push(STARTING_SYSTEM.to_string());
    }
    systems
}

/// Merges per-system listings into one entry per ship type, sorted by type.
pub fn merge_listings<'a, I>(per_system: I) -> Vec<ShipListing>
where
    I: IntoIterator<Item = &'a [ShipListing]>,
{
    let mut merged: BTreeMap<String, ShipListing> = BTreeMap::new();
    for listings in per_system {
        for listing in listings {
            merged
                .entry(listing.kind.clone())
                .and_modify(|existing| {
                    for location in &listing.purchase_locations {
                        if !existing.purchase_locations.contains(location) {
                            existing.purchase_locations.push(location.clone());
                        }
                    }
                })
                .or_insert_with(|| listing.clone());
        }
    }
    merged.into_values().collect()
}

/// Purchase locations offered for `listing`. Restricted to locations where
/// an owned ship is docked, unless the loaded fleet is empty. Nothing is
/// offered while the fleet is unknown.
pub fn purchase_options<'a>(
    listing: &'a ShipListing,
    ships: Option<&[Ship]>,
) -> Vec<&'a PurchaseLocation> {
    let Some(ships) = ships else {
        return Vec::new();
    };
    if ships.is_empty() {
        return listing.purchase_locations.iter().collect();
    }
    listing
        .purchase_locations
        .iter()
        .filter(|offer| ships.iter().any(|ship| ship.is_docked_at(&offer.location)))
        .collect()
}

pub fn cheapest_price(listing: &ShipListing) -> Option<u64> {
    listing.purchase_locations.iter().map(|offer| offer.price).min()
}

/// Form state for the buy-ship modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShipPurchaseForm {
    pub location: Option<LocationSymbol>,
}

impl ShipPurchaseForm {
    /// Ready once a location that is still on offer has been chosen.
    pub fn is_ready(&self, options: &[&PurchaseLocation]) -> bool {
        self.location
            .as_deref()
            .map_or(false, |chosen| options.iter().any(|offer| offer.location == chosen))
    }

    pub fn price<'a>(&self, options: &[&'a PurchaseLocation]) -> Option<u64> {
        let chosen = self.location.as_deref()?;
        options
            .iter()
            .find(|offer| offer.location == chosen)
            .map(|offer| offer.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trade::tests::ship;

    fn offer(location: &str, price: u64) -> PurchaseLocation {
        PurchaseLocation {
            system: system_of(location).to_string(),
            location: location.to_string(),
            price,
        }
    }

    fn listing(kind: &str, offers: Vec<PurchaseLocation>) -> ShipListing {
        ShipListing {
            kind: kind.to_string(),
            class: Some("MK-I".to_string()),
            manufacturer: Some("Jackshaw".to_string()),
            max_cargo: 50,
            speed: 1,
            plating: 5,
            weapons: 5,
            purchase_locations: offers,
        }
    }

    #[test]
    fn known_systems_are_unique_and_sorted() {
        let ships = vec![
            ship("s1", Some("XV-BN"), 10),
            ship("s2", Some("OE-PM-TR"), 10),
            ship("s3", Some("OE-CR"), 10),
            ship("s4", None, 10),
        ];

        assert_eq!(known_systems(Some(ships.as_slice())), vec!["OE", "XV"]);
    }

    #[test]
    fn known_systems_bootstrap_to_starting_system() {
        assert_eq!(known_systems(Some(&[] as &[Ship])), vec![STARTING_SYSTEM]);
    }

    #[test]
    fn purchase_options_follow_docked_ships() {
        let gravager = listing("GR-MK-I", vec![offer("OE-PM-TR", 21_000), offer("OE-CR", 22_000)]);
        let ships = vec![ship("s1", Some("OE-CR"), 10)];

        let options = purchase_options(&gravager, Some(ships.as_slice()));

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].location, "OE-CR");
    }

    #[test]
    fn first_ship_can_be_bought_anywhere() {
        let gravager = listing("GR-MK-I", vec![offer("OE-PM-TR", 21_000), offer("OE-CR", 22_000)]);

        assert_eq!(purchase_options(&gravager, Some(&[] as &[Ship])).len(), 2);
    }

    #[test]
    fn ships_in_transit_do_not_unlock_locations() {
        let gravager = listing("GR-MK-I", vec![offer("OE-PM-TR", 21_000)]);
        let ships = vec![ship("s1", None, 10)];

        assert!(purchase_options(&gravager, Some(ships.as_slice())).is_empty());
    }

    #[test]
    fn unknown_fleet_offers_no_purchase_location() {
        let gravager = listing("GR-MK-I", vec![offer("OE-PM-TR", 21_000), offer("OE-CR", 22_000)]);

        assert!(purchase_options(&gravager, None).is_empty());
        assert!(known_systems(None).is_empty());
    }

    #[test]
    fn merge_listings_combines_purchase_locations() {
        let oe = vec![listing("JW-MK-I", vec![offer("OE-PM-TR", 21_000)])];
        let xv = vec![
            listing("JW-MK-I", vec![offer("XV-BN", 19_000)]),
            listing("EM-MK-I", vec![offer("XV-BN", 40_000)]),
        ];

        let merged = merge_listings([oe.as_slice(), xv.as_slice()]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].kind, "EM-MK-I");
        assert_eq!(merged[1].purchase_locations.len(), 2);
        assert_eq!(cheapest_price(&merged[1]), Some(19_000));
    }

    #[test]
    fn purchase_form_requires_offered_location() {
        let gravager = listing("GR-MK-I", vec![offer("OE-PM-TR", 21_000)]);
        let options = purchase_options(&gravager, Some(&[] as &[Ship]));

        let mut form = ShipPurchaseForm::default();
        assert!(!form.is_ready(&options));

        form.location = Some("OE-CR".to_string());
        assert!(!form.is_ready(&options));

        form.location = Some("OE-PM-TR".to_string());
        assert!(form.is_ready(&options));
        assert_eq!(form.price(&options), Some(21_000));
    }
}
