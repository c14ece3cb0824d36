use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Good symbol as used by the API (e.g. `FUEL`, `METALS`).
pub type GoodSymbol = String;

/// Location symbol, `SYSTEM-LOCATION` (e.g. `OE-PM-TR`).
pub type LocationSymbol = String;

/// Returns the system part of a location symbol (`OE-PM-TR` -> `OE`).
pub fn system_of(location: &str) -> &str {
    location.split('-').next().unwrap_or(location)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub credits: i64,
    #[serde(default)]
    pub ship_count: u32,
    #[serde(default)]
    pub structure_count: u32,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub joined_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoItem {
    pub good: GoodSymbol,
    pub quantity: u32,
    #[serde(default)]
    pub total_volume: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// `None` while the ship is in transit.
    #[serde(default)]
    pub location: Option<LocationSymbol>,
    #[serde(default)]
    pub cargo: Vec<CargoItem>,
    #[serde(default)]
    pub space_available: u32,
    #[serde(default)]
    pub max_cargo: u32,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub plating: Option<u32>,
    #[serde(default)]
    pub weapons: Option<u32>,
    #[serde(default)]
    pub loading_speed: Option<u32>,
}

impl Ship {
    pub fn is_docked_at(&self, location: &str) -> bool {
        self.location.as_deref() == Some(location)
    }

    /// Quantity of `good` currently held.
    pub fn cargo_quantity(&self, good: &str) -> u32 {
        self.cargo
            .iter()
            .filter(|item| item.good == good)
            .map(|item| item.quantity)
            .sum()
    }

    /// Short label for selectors: `JW-MK-I (ck9x...)`.
    pub fn display_name(&self) -> String {
        let short_id: String = self.id.chars().take(8).collect();
        format!("{} ({short_id})", self.kind)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceGood {
    pub symbol: GoodSymbol,
    #[serde(default)]
    pub volume_per_unit: u32,
    #[serde(default)]
    pub price_per_unit: u32,
    #[serde(default)]
    pub spread: u32,
    pub purchase_price_per_unit: u32,
    pub sell_price_per_unit: u32,
    #[serde(default)]
    pub quantity_available: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLocation {
    pub system: String,
    pub location: LocationSymbol,
    pub price: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipListing {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub max_cargo: u32,
    #[serde(default)]
    pub speed: u32,
    #[serde(default)]
    pub plating: u32,
    #[serde(default)]
    pub weapons: u32,
    #[serde(default)]
    pub purchase_locations: Vec<PurchaseLocation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodType {
    pub symbol: GoodSymbol,
    pub name: String,
    #[serde(default)]
    pub volume_per_unit: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureType {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub allowed_location_types: Vec<String>,
    #[serde(default)]
    pub allowed_planet_traits: Vec<String>,
    #[serde(default)]
    pub consumes: Vec<GoodSymbol>,
    #[serde(default)]
    pub produces: Vec<GoodSymbol>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub symbol: LocationSymbol,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub allows_construction: bool,
    #[serde(default)]
    pub traits: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub good: GoodSymbol,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureOwner {
    pub username: String,
}

/// A structure as returned by either `my/structures` or `structures/{id}`.
/// The public lookup additionally carries the owner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: LocationSymbol,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "materials")]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub consumes: Vec<GoodSymbol>,
    #[serde(default)]
    pub produces: Vec<GoodSymbol>,
    #[serde(default)]
    pub owned_by: Option<StructureOwner>,
}

impl Structure {
    pub fn inventory_quantity(&self, good: &str) -> u32 {
        self.inventory
            .iter()
            .filter(|item| item.good == good)
            .map(|item| item.quantity)
            .sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub good: GoodSymbol,
    pub quantity: u32,
    pub price_per_unit: u32,
    pub total: u64,
}

/// Result of a purchase or sell order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub credits: i64,
    pub order: Order,
    pub ship: Ship,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipPurchase {
    pub credits: i64,
    pub ship: Ship,
}

/// Result of a deposit or a withdrawal (`transfer`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureTransfer {
    #[serde(alias = "deposit", alias = "transfer")]
    pub moved: InventoryItem,
    pub ship: Ship,
    #[serde(default)]
    pub structure: Option<Structure>,
}
