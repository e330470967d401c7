//! chained-hashmap: a single-threaded hash map with separate chaining, a
//! nullable sentinel key, and load-factor driven growth.
//!
//! Internal Design:
//!
//! Summary
//! - Storage: a `Vec` of bucket slots. Each slot is empty or owns the head
//!   of a singly-linked chain of boxed entries (`entry::Chain`).
//! - Keys: `Option<K>`. `None` is the sentinel (null) key; it hashes to 0
//!   and always lives in bucket 0.
//! - Growth: capacity doubles when the insertion of a new key makes the
//!   entry count equal to floor(capacity * load_factor).
//!
//! Layers
//! - `entry`: chain node and in-place chain edits (append, replace, splice).
//! - `hashing`: sentinel handling, hash mixing, bucket selection.
//! - `ChainedHashMap<K, V, S>`: the map contract on top of the chains.
//! - `views` and `display`: read-only copies and renderings of the map.
//!
//! Hashing and rehashing invariants
//! - Each entry caches the mixed `u64` hash computed at insertion. Lookups
//!   compare the cached hash before calling `K: Eq`.
//! - Rehash replays every entry through the ordinary chain insertion using
//!   the cached hash, so `K: Hash` is never invoked after insertion.
//! - A non-sentinel key whose mixed hash is 0 shares bucket 0 with the
//!   sentinel key. Lookups stay correct since keys are compared by value.
//!
//! Constraints
//! - Single-threaded: every mutation takes `&mut self`; no internal locking.
//! - Capacity never shrinks; `remove` and `clear` keep the bucket array.
//! - Values are never absent. `try_put` rejects a `None` value up front.
//! - Iteration order is bucket order and is not stable across mutations.
//!
//! Errors
//! - Invalid construction parameters yield [`ConfigError`].
//! - Looking up or removing a missing key is not an error; it returns `None`.

mod chained_hash_map;
pub mod config;
mod display;
mod entry;
pub mod error;
mod hashing;
mod views;

#[cfg(test)]
mod chained_hash_map_proptest;

// Public surface
pub use chained_hash_map::{ChainedHashMap, Iter};
pub use config::{TableConfig, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use error::{ConfigError, PutError};
pub use views::MapEntry;
