//! Resolution verdict cache.

use crate::models::{CacheEntry, ResourceId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Maps canonical resource ids to memoized resolution verdicts.
///
/// The cache is the single source of truth consulted before any network
/// access. It is owned by its resolver instance rather than being a
/// process-wide singleton, so independent resolvers (and tests) never share
/// state. Entries are never evicted automatically; [`Self::clear`] is the
/// only way to drop them.
///
/// Concurrent readers and writers are safe; last-writer-wins is acceptable
/// because concurrent walks over the same stable hierarchy agree on the
/// final verdict.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<ResourceId, CacheEntry>>,
}

impl ResolutionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for an id, if one has been recorded.
    #[must_use]
    pub fn get(&self, id: &ResourceId) -> Option<CacheEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Records a verdict, replacing any previous entry.
    pub fn insert(&self, id: ResourceId, entry: CacheEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, entry);
    }

    /// Records a verdict only when the id has no entry yet.
    pub fn insert_if_absent(&self, id: ResourceId, entry: CacheEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id)
            .or_insert(entry);
    }

    /// Drops all entries.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached verdicts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u8) -> ResourceId {
        ResourceId::parse(&format!("{:032x}", u128::from(n))).unwrap()
    }

    fn entry(allowed: bool) -> CacheEntry {
        CacheEntry {
            parent_id: None,
            is_allowed: allowed,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let cache = ResolutionCache::new();
        assert!(cache.get(&id(1)).is_none());
        cache.insert(id(1), entry(true));
        assert_eq!(cache.get(&id(1)), Some(entry(true)));
    }

    #[test]
    fn test_insert_replaces() {
        let cache = ResolutionCache::new();
        cache.insert(id(1), entry(false));
        cache.insert(id(1), entry(true));
        assert_eq!(cache.get(&id(1)), Some(entry(true)));
    }

    #[test]
    fn test_insert_if_absent_keeps_existing() {
        let cache = ResolutionCache::new();
        cache.insert(id(1), entry(true));
        cache.insert_if_absent(id(1), entry(false));
        assert_eq!(cache.get(&id(1)), Some(entry(true)));
        cache.insert_if_absent(id(2), entry(false));
        assert_eq!(cache.get(&id(2)), Some(entry(false)));
    }

    #[test]
    fn test_clear() {
        let cache = ResolutionCache::new();
        cache.insert(id(1), entry(true));
        cache.insert(id(2), entry(false));
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
