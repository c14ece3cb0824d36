//! Domain types and view-model logic for the trading console.

pub mod app_state;
pub mod catalog;
pub mod entities;
pub mod marketplace;
pub mod mutations;
pub mod shipyard;
pub mod structures;
pub mod trade;

pub use app_state::{QueryCache, QueryKey, QueryState};
pub use catalog::{structure_type_names, GoodCatalog, NameTable};
pub use entities::{
    GoodType, Location, MarketplaceGood, OrderReceipt, Ship, ShipListing, ShipPurchase, Structure,
    StructureTransfer, StructureType, User,
};
pub use marketplace::{
    best_prices, best_prices_by_good, collect_rows, docked_locations, filter_rows, good_options,
    parse_volume, row_highlight, sort_rows, MarketRow, MarketSort, RowHighlight,
};
pub use mutations::{
    purchase_success, sell_success, ship_purchase_success, structure_created, transfer_success,
    Mutation, Notification, NotificationKind,
};
pub use shipyard::{
    cheapest_price, known_systems, merge_listings, purchase_options, ShipPurchaseForm,
};
pub use structures::{
    construction_options, parse_structure_id, CreateStructureForm, TransferKind, TransferTarget,
};
pub use trade::{
    can_submit, clamp_quantity, docked_ships, MarketTrade, Modal, TradeForm, TradeSide,
};
