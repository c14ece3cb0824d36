pub mod kpi_card;
pub mod market_table;
pub mod modal;
pub mod query_status;
pub mod ship_listing_table;
pub mod structure_table;
pub mod toast;
pub mod trade_fields;
