//! Bucket entries and the singly-linked chain that owns them.

use core::mem;

/// One key-value pair in a bucket chain.
///
/// `hash` is computed once at insertion. `next` is owned by this entry, so the
/// chain is a forward-owned list ending in `None`.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: Option<K>,
    pub(crate) value: V,
    pub(crate) next: Option<Box<Entry<K, V>>>,
}

impl<K, V> Entry<K, V> {
    fn new(hash: u64, key: Option<K>, value: V) -> Self {
        Self {
            hash,
            key,
            value,
            next: None,
        }
    }

    #[inline]
    pub(crate) fn matches(&self, hash: u64, key: Option<&K>) -> bool
    where
        K: Eq,
    {
        self.hash == hash && self.key.as_ref() == key
    }
}

/// A bucket slot: empty, or the head of an owned entry chain.
pub(crate) struct Chain<K, V> {
    head: Option<Box<Entry<K, V>>>,
}

impl<K, V> Chain<K, V> {
    pub(crate) const fn new() -> Self {
        Self { head: None }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub(crate) fn find(&self, hash: u64, key: Option<&K>) -> Option<&Entry<K, V>>
    where
        K: Eq,
    {
        self.iter().find(|e| e.matches(hash, key))
    }

    pub(crate) fn find_mut(&mut self, hash: u64, key: Option<&K>) -> Option<&mut Entry<K, V>>
    where
        K: Eq,
    {
        let mut cursor = self.head.as_deref_mut();
        while let Some(entry) = cursor {
            if entry.matches(hash, key) {
                return Some(entry);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    /// Replace the value of a matching entry and return the old one, or
    /// append a new entry at the tail and return `None`.
    pub(crate) fn upsert(&mut self, hash: u64, key: Option<K>, value: V) -> Option<V>
    where
        K: Eq,
    {
        let mut cursor = &mut self.head;
        while let Some(entry) = cursor {
            if entry.matches(hash, key.as_ref()) {
                return Some(mem::replace(&mut entry.value, value));
            }
            cursor = &mut entry.next;
        }
        *cursor = Some(Box::new(Entry::new(hash, key, value)));
        None
    }

    /// Unlink the matching entry and return its value.
    pub(crate) fn remove(&mut self, hash: u64, key: Option<&K>) -> Option<V>
    where
        K: Eq,
    {
        if self.head.as_ref()?.matches(hash, key) {
            let mut removed = self.head.take()?;
            self.head = removed.next.take();
            return Some(removed.value);
        }

        let mut prev = self.head.as_mut()?;
        while let Some(next) = prev.next.as_ref() {
            if next.matches(hash, key) {
                let mut removed = prev.next.take()?;
                prev.next = removed.next.take();
                return Some(removed.value);
            }
            prev = prev.next.as_mut()?;
        }
        None
    }

    /// Detach and return the head entry.
    pub(crate) fn pop_front(&mut self) -> Option<Box<Entry<K, V>>> {
        let mut head = self.head.take()?;
        self.head = head.next.take();
        Some(head)
    }

    pub(crate) fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    pub(crate) fn iter(&self) -> ChainIter<'_, K, V> {
        ChainIter {
            next: self.head.as_deref(),
        }
    }
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Iterative so that a long chain does not recurse once per entry.
impl<K, V> Drop for Chain<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Clone, V: Clone> Clone for Chain<K, V> {
    fn clone(&self) -> Self {
        let mut out = Chain::new();
        let mut tail = &mut out.head;
        for e in self.iter() {
            let copy = Box::new(Entry::new(e.hash, e.key.clone(), e.value.clone()));
            tail = &mut tail.insert(copy).next;
        }
        out
    }
}

/// Walks one chain from head to tail.
pub(crate) struct ChainIter<'a, K, V> {
    next: Option<&'a Entry<K, V>>,
}

impl<'a, K, V> Iterator for ChainIter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        Some(entry)
    }
}
