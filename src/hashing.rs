//! Key hashing and bucket selection.
//!
//! The sentinel key (`None`) always hashes to 0. Any other key is hashed
//! with the map's `BuildHasher` and then multiplied by `17 * 31` to spread
//! clustered inputs before the modulo. A hash of exactly 0 always selects
//! bucket 0, so the sentinel key shares that bucket with any key whose mixed
//! hash happens to be 0.

use core::hash::{BuildHasher, Hash};

/// Hash of the sentinel key.
pub(crate) const SENTINEL_HASH: u64 = 0;

const MIX: u64 = 17 * 31;

#[inline]
pub(crate) fn mix(raw: u64) -> u64 {
    raw.wrapping_mul(MIX)
}

#[inline]
pub(crate) fn hash_key<K, S>(hasher: &S, key: Option<&K>) -> u64
where
    K: Hash,
    S: BuildHasher,
{
    match key {
        None => SENTINEL_HASH,
        Some(k) => mix(hasher.hash_one(k)),
    }
}

#[inline]
pub(crate) fn bucket_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    if hash == SENTINEL_HASH {
        0
    } else {
        (hash % capacity as u64) as usize
    }
}

/// Hasher that returns integer keys unchanged. Lets tests predict bucket
/// placement.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct IdentityHasher(u64);

#[cfg(test)]
impl core::hash::Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.rotate_left(8) ^ b as u64;
        }
    }

    fn write_u32(&mut self, i: u32) {
        self.0 = i as u64;
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    fn write_usize(&mut self, i: usize) {
        self.0 = i as u64;
    }
}

#[cfg(test)]
pub(crate) type IdentityState = core::hash::BuildHasherDefault<IdentityHasher>;
