//! Human-readable renderings of a map.
//!
//! `Display` dumps the bucket layout, one line per bucket:
//!
//! ```text
//! Bucket-0 [{null=n}]
//! Bucket-1 empty
//! Bucket-2 [{1=a} -> {5=e}]
//! Total entries: 3
//! ```
//!
//! `Debug` renders entries like a standard map.

use crate::chained_hash_map::ChainedHashMap;
use core::fmt;

const NULL_KEY: &str = "null";

pub(crate) fn write_pair<K, V>(
    f: &mut fmt::Formatter<'_>,
    key: Option<&K>,
    value: &V,
) -> fmt::Result
where
    K: fmt::Display,
    V: fmt::Display,
{
    match key {
        Some(k) => write!(f, "{}={}", k, value),
        None => write!(f, "{}={}", NULL_KEY, value),
    }
}

impl<K, V, S> fmt::Display for ChainedHashMap<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets().iter().enumerate() {
            if chain.is_empty() {
                writeln!(f, "Bucket-{} empty", index)?;
                continue;
            }
            write!(f, "Bucket-{} [", index)?;
            for (i, e) in chain.iter().enumerate() {
                if i > 0 {
                    f.write_str(" -> ")?;
                }
                f.write_str("{")?;
                write_pair(f, e.key.as_ref(), &e.value)?;
                f.write_str("}")?;
            }
            writeln!(f, "]")?;
        }
        write!(f, "Total entries: {}", self.len())
    }
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
