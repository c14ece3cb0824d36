use std::{collections::HashMap, fmt};

/// Identifies one remote list in the query cache.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryKey {
    User,
    Ships,
    GoodTypes,
    StructureTypes,
    MyStructures,
    Marketplace(String),
    ShipListings(String),
    SystemLocations(String),
    Structure(String),
}

impl QueryKey {
    /// Whether a failed fetch for this key should be retried.
    ///
    /// The public structure lookup answers an unknown id with a generic
    /// server error, so retrying it only delays the error message.
    pub fn retries(&self) -> bool {
        !matches!(self, QueryKey::Structure(_))
    }

    /// Location, system or structure id carried by parameterised keys.
    pub fn param(&self) -> Option<&str> {
        match self {
            QueryKey::Marketplace(value)
            | QueryKey::ShipListings(value)
            | QueryKey::SystemLocations(value)
            | QueryKey::Structure(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::User => write!(f, "user"),
            QueryKey::Ships => write!(f, "ships"),
            QueryKey::GoodTypes => write!(f, "good-types"),
            QueryKey::StructureTypes => write!(f, "structure-types"),
            QueryKey::MyStructures => write!(f, "my-structures"),
            QueryKey::Marketplace(location) => write!(f, "marketplace/{location}"),
            QueryKey::ShipListings(system) => write!(f, "ship-listings/{system}"),
            QueryKey::SystemLocations(system) => write!(f, "locations/{system}"),
            QueryKey::Structure(id) => write!(f, "structure/{id}"),
        }
    }
}

/// Page-scoped query cache bookkeeping.
///
/// Each key carries a generation; queries observe their key's generation and
/// refetch when an invalidation bumps it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryCache {
    generations: HashMap<QueryKey, u64>,
}

impl QueryCache {
    pub fn generation(&self, key: &QueryKey) -> u64 {
        self.generations.get(key).copied().unwrap_or(0)
    }

    pub fn invalidate(&mut self, key: &QueryKey) {
        *self.generations.entry(key.clone()).or_insert(0) += 1;
    }

    pub fn invalidate_all<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a QueryKey>,
    {
        for key in keys {
            self.invalidate(key);
        }
    }
}

/// Fetch state of one query as seen by a page.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidation_bumps_only_the_given_key() {
        let mut cache = QueryCache::default();

        cache.invalidate(&QueryKey::Ships);

        assert_eq!(cache.generation(&QueryKey::Ships), 1);
        assert_eq!(cache.generation(&QueryKey::User), 0);
        assert_eq!(cache.generation(&QueryKey::Marketplace("OE-PM".into())), 0);
    }

    #[test]
    fn parameterised_keys_are_independent() {
        let mut cache = QueryCache::default();

        cache.invalidate_all(&[
            QueryKey::Structure("a".into()),
            QueryKey::Structure("a".into()),
        ]);

        assert_eq!(cache.generation(&QueryKey::Structure("a".into())), 2);
        assert_eq!(cache.generation(&QueryKey::Structure("b".into())), 0);
    }

    #[test]
    fn only_structure_lookup_skips_retries() {
        assert!(QueryKey::Ships.retries());
        assert!(QueryKey::Marketplace("OE-PM".into()).retries());
        assert!(!QueryKey::Structure("x".into()).retries());
    }

    #[test]
    fn param_is_only_set_on_parameterised_keys() {
        assert_eq!(QueryKey::Marketplace("OE-PM".into()).param(), Some("OE-PM"));
        assert_eq!(QueryKey::SystemLocations("OE".into()).param(), Some("OE"));
        assert_eq!(QueryKey::User.param(), None);
    }

    #[test]
    fn query_state_accessors() {
        let ready = QueryState::Ready(3);
        let failed: QueryState<u8> = QueryState::Failed("boom".into());

        assert_eq!(ready.data(), Some(&3));
        assert_eq!(failed.error(), Some("boom"));
        assert!(QueryState::<u8>::Loading.is_loading());
    }
}
