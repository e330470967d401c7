//! Snapshot views: key set, value list, entry set.
//!
//! Each view walks every chain once and copies what it finds into a freshly
//! built collection. The result shares nothing with the map, so mutating
//! either side afterwards leaves the other untouched.

use crate::chained_hash_map::ChainedHashMap;
use core::fmt;
use core::hash::Hash;
use hashbrown::HashSet;

/// An owned key-value pair copied out of a map. Renders as `key=value`,
/// with `null` for the sentinel key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapEntry<K, V> {
    pub key: Option<K>,
    pub value: V,
}

impl<K, V> MapEntry<K, V> {
    pub fn new(key: Option<K>, value: V) -> Self {
        Self { key, value }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for MapEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::display::write_pair(f, self.key.as_ref(), &self.value)
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    pub fn key_set(&self) -> HashSet<Option<K>>
    where
        K: Clone + Eq + Hash,
    {
        let mut keys = HashSet::with_capacity(self.len());
        keys.extend(self.iter().map(|(k, _)| k.cloned()));
        keys
    }

    /// Values in traversal order. Duplicated values are kept.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn entry_set(&self) -> HashSet<MapEntry<K, V>>
    where
        K: Clone + Eq + Hash,
        V: Clone + Eq + Hash,
    {
        let mut entries = HashSet::with_capacity(self.len());
        entries.extend(
            self.iter()
                .map(|(k, v)| MapEntry::new(k.cloned(), v.clone())),
        );
        entries
    }
}
