//! Symbol <-> display name lookups for the good and structure type catalogs.

use std::collections::HashMap;

use super::entities::{GoodType, StructureType};

/// Bidirectional mapping between API symbols and display names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NameTable {
    by_symbol: HashMap<String, String>,
    by_name: HashMap<String, String>,
}

impl NameTable {
    pub fn new<I, S, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: Into<String>,
    {
        let mut table = Self::default();
        for (symbol, name) in entries {
            table.insert(symbol.into(), name.into());
        }
        table
    }

    pub fn insert(&mut self, symbol: String, name: String) {
        if let Some(previous) = self.by_symbol.insert(symbol.clone(), name.clone()) {
            self.by_name.remove(&previous);
        }
        self.by_name.insert(name, symbol);
    }

    pub fn name_of(&self, symbol: &str) -> Option<&str> {
        self.by_symbol.get(symbol).map(String::as_str)
    }

    pub fn symbol_of(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Display name, falling back to the raw symbol for unknown entries.
    pub fn label<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.name_of(symbol).unwrap_or(symbol)
    }
}

/// Good catalog: names plus unit volumes, keyed by symbol.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoodCatalog {
    names: NameTable,
    volumes: HashMap<String, u32>,
}

impl GoodCatalog {
    pub fn from_types(goods: &[GoodType]) -> Self {
        Self {
            names: NameTable::new(goods.iter().map(|g| (g.symbol.clone(), g.name.clone()))),
            volumes: goods
                .iter()
                .map(|g| (g.symbol.clone(), g.volume_per_unit))
                .collect(),
        }
    }

    /// Resolves a typed good: a display name maps to its symbol, anything
    /// else is taken as a symbol. Blank input is no good at all.
    pub fn resolve(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(
            self.names
                .symbol_of(trimmed)
                .map(str::to_string)
                .unwrap_or_else(|| trimmed.to_uppercase()),
        )
    }

    pub fn label<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.names.label(symbol)
    }

    pub fn volume_per_unit(&self, symbol: &str) -> Option<u32> {
        self.volumes.get(symbol).copied()
    }
}

pub fn structure_type_names(types: &[StructureType]) -> NameTable {
    NameTable::new(types.iter().map(|t| (t.kind.clone(), t.name.clone())))
}
