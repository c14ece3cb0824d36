pub mod marketplace;
pub mod structures;

pub use marketplace::MarketplacePage;
pub use structures::StructuresPage;
