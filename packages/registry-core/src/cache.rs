//! Fixed-capacity LRU cache of idle payloads.
//!
//! Specialized to the registry's "at most one copy per identifier"
//! invariant: insertion is at the tail, eviction from the head, and a
//! cache *hit removes the entry* (it moves into the caller's Lease)
//! rather than merely bumping its recency. An identifier re-enters at the
//! tail only when its Lease is released. Capacity is fixed for the
//! lifetime of the cache.

use crate::identifier::Identifier;

struct Entry<P> {
    id: Identifier,
    payload: P,
}

pub(crate) struct PayloadCache<P> {
    capacity: usize,
    entries: Vec<Entry<P>>,
}

impl<P> PayloadCache<P> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(64)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes and returns the payload for `id`, if present.
    pub(crate) fn take(&mut self, id: &Identifier) -> Option<P> {
        let pos = self.entries.iter().position(|e| &e.id == id)?;
        Some(self.entries.remove(pos).payload)
    }

    /// Inserts `payload` at the tail, keyed by `id`, evicting from the head
    /// while over capacity. A zero-capacity cache evicts immediately.
    pub(crate) fn put(&mut self, id: Identifier, payload: P) {
        debug_assert!(
            self.entries.iter().all(|e| e.id != id),
            "identifier already present in payload cache"
        );
        self.entries.push(Entry { id, payload });
        while self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
    }

    /// Removes any entry for `id`, discarding its payload.
    pub(crate) fn purge(&mut self, id: &Identifier) {
        self.entries.retain(|e| &e.id != id);
    }

    /// Drops all entries.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::file::LocalFileDescriptor;

    fn id(region: &str, version: u64) -> Identifier {
        Identifier::new(Descriptor::new(
            LocalFileDescriptor::new(region, version, "/tmp/x"),
            1,
            17,
        ))
    }

    #[test]
    fn hit_removes_entry() {
        let mut cache = PayloadCache::new(4);
        let a = id("a", 1);
        cache.put(a.clone(), "payload-a");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.take(&a), Some("payload-a"));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.take(&a), None);
    }

    #[test]
    fn evicts_head_over_capacity() {
        let mut cache = PayloadCache::new(2);
        let a = id("a", 1);
        let b = id("b", 1);
        let c = id("c", 1);
        cache.put(a.clone(), "a");
        cache.put(b.clone(), "b");
        cache.put(c.clone(), "c");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.take(&a), None, "oldest entry should have been evicted");
        assert_eq!(cache.take(&b), Some("b"));
        assert_eq!(cache.take(&c), Some("c"));
    }

    #[test]
    fn purge_drops_matching_entry_only() {
        let mut cache = PayloadCache::new(4);
        let a = id("a", 1);
        let b = id("b", 1);
        cache.put(a.clone(), "a");
        cache.put(b.clone(), "b");

        cache.purge(&a);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.take(&b), Some("b"));
    }
}
