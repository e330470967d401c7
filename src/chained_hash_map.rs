//! ChainedHashMap: bucket array of owned chains with load-factor growth.

use crate::config::{growth_threshold, TableConfig};
use crate::entry::{Chain, ChainIter, Entry};
use crate::error::{ConfigError, PutError};
use crate::hashing::{bucket_index, hash_key};
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::mem;
use std::collections::hash_map::RandomState;
use tracing::{debug, trace};

/// A hash map with separate chaining.
///
/// Keys are `Option<K>`: `None` is a single nullable sentinel key that always
/// lives in bucket 0. Capacity starts at the configured value and doubles
/// whenever the number of entries reaches `growth_threshold()`. It never
/// shrinks. A table whose threshold floors to zero keeps its initial
/// capacity for good.
pub struct ChainedHashMap<K, V, S = RandomState> {
    hasher: S,
    buckets: Vec<Chain<K, V>>,
    len: usize,
    load_factor: f64,
    growth_threshold: usize,
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Chain<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Chain::new);
    buckets
}

impl<K, V> ChainedHashMap<K, V> {
    /// Capacity 16, load factor 0.75.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Default load factor with `capacity` initial buckets.
    ///
    /// Unlike `std::collections::HashMap::with_capacity` this can fail: a
    /// capacity of 0 returns [`ConfigError::InvalidCapacity`]. Any positive
    /// capacity is accepted.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_config(TableConfig::new().initial_capacity(capacity))
    }

    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f64,
    ) -> Result<Self, ConfigError> {
        Self::with_config(
            TableConfig::new()
                .initial_capacity(capacity)
                .load_factor(load_factor),
        )
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, RandomState::new())
    }
}

impl<K, V, S: Default> Default for ChainedHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Default capacity and load factor with a caller-supplied hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_valid_config(TableConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, hasher))
    }

    fn from_valid_config(config: TableConfig, hasher: S) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(config.initial_capacity),
            len: 0,
            load_factor: config.load_factor,
            growth_threshold: config.growth_threshold(),
        }
    }

    /// Number of live key-value pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Same as [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Entry count at which the next insertion of a new key doubles capacity.
    pub fn growth_threshold(&self) -> usize {
        self.growth_threshold
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Remove every entry. Capacity and threshold are kept.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        trace!(removed = self.len, capacity = self.capacity(), "cleared table");
        self.len = 0;
    }

    /// Visit entries bucket by bucket, each chain head to tail.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }

    pub(crate) fn buckets(&self) -> &[Chain<K, V>] {
        &self.buckets
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn make_hash(&self, key: Option<&K>) -> u64 {
        hash_key(&self.hasher, key)
    }

    fn chain(&self, hash: u64) -> &Chain<K, V> {
        &self.buckets[bucket_index(hash, self.buckets.len())]
    }

    fn chain_mut(&mut self, hash: u64) -> &mut Chain<K, V> {
        let index = bucket_index(hash, self.buckets.len());
        &mut self.buckets[index]
    }

    pub fn get(&self, key: Option<&K>) -> Option<&V> {
        let hash = self.make_hash(key);
        self.chain(hash).find(hash, key).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: Option<&K>) -> Option<&mut V> {
        let hash = self.make_hash(key);
        self.chain_mut(hash).find_mut(hash, key).map(|e| &mut e.value)
    }

    pub fn get_key_value(&self, key: Option<&K>) -> Option<(Option<&K>, &V)> {
        let hash = self.make_hash(key);
        self.chain(hash)
            .find(hash, key)
            .map(|e| (e.key.as_ref(), &e.value))
    }

    pub fn contains_key(&self, key: Option<&K>) -> bool {
        self.get(key).is_some()
    }

    /// Full scan comparing values with `==`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    /// Insert or update. Returns the previous value for `key`, or `None` when
    /// the key is new. A new key that brings the entry count to the growth
    /// threshold doubles the capacity.
    pub fn put(&mut self, key: Option<K>, value: V) -> Option<V> {
        let hash = self.make_hash(key.as_ref());
        let previous = self.insert_hashed(hash, key, value);
        if previous.is_none() && self.len == self.growth_threshold {
            self.grow();
        }
        previous
    }

    /// `put` for callers holding a possibly absent value. An absent value is
    /// rejected before the map is touched.
    pub fn try_put(&mut self, key: Option<K>, value: Option<V>) -> Result<Option<V>, PutError> {
        let value = value.ok_or(PutError::AbsentValue)?;
        Ok(self.put(key, value))
    }

    /// Put every entry of `source`, in its iteration order. `None` does nothing.
    /// The source may use a different hasher.
    pub fn put_all<S2>(&mut self, source: Option<&ChainedHashMap<K, V, S2>>)
    where
        K: Clone,
        V: Clone,
    {
        let Some(source) = source else {
            return;
        };
        for (k, v) in source.iter() {
            self.put(k.cloned(), v.clone());
        }
    }

    pub fn remove(&mut self, key: Option<&K>) -> Option<V> {
        let hash = self.make_hash(key);
        let removed = self.chain_mut(hash).remove(hash, key);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    // Chain insertion without the growth check. Also the replay path for grow().
    fn insert_hashed(&mut self, hash: u64, key: Option<K>, value: V) -> Option<V> {
        let previous = self.chain_mut(hash).upsert(hash, key, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2;
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        self.len = 0;
        self.growth_threshold = growth_threshold(new_capacity, self.load_factor);

        for mut chain in old {
            while let Some(entry) = chain.pop_front() {
                let Entry {
                    hash, key, value, ..
                } = *entry;
                self.insert_hashed(hash, key, value);
            }
        }

        debug!(
            old_capacity,
            new_capacity,
            growth_threshold = self.growth_threshold,
            len = self.len,
            "rehashed table"
        );
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut reachable = 0;
        for (index, chain) in self.buckets.iter().enumerate() {
            for e in chain.iter() {
                assert_eq!(e.hash, self.make_hash(e.key.as_ref()), "stale cached hash");
                assert_eq!(
                    bucket_index(e.hash, self.capacity()),
                    index,
                    "entry in wrong bucket"
                );
                assert_eq!(
                    chain.iter().filter(|o| o.key == e.key).count(),
                    1,
                    "duplicate key in chain"
                );
                reachable += 1;
            }
        }
        assert_eq!(reachable, self.len, "len out of sync with chains");
        assert_eq!(
            self.growth_threshold,
            growth_threshold(self.capacity(), self.load_factor)
        );
        assert!(
            self.growth_threshold == 0 || self.len < self.growth_threshold,
            "missed growth trigger"
        );
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for ChainedHashMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            buckets: self.buckets.clone(),
            len: self.len,
            load_factor: self.load_factor,
            growth_threshold: self.growth_threshold,
        }
    }
}

impl<K, V, S> Extend<(Option<K>, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (Option<K>, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(Option<K>, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (Option<K>, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (Option<&'a K>, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a `ChainedHashMap`.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain<K, V>>,
    chain: Option<ChainIter<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Option<&'a K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some((e.key.as_ref(), &e.value));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}
