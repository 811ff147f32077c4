//! Bounded LRU cache for resolved addresses.
//!
//! Only successful lookups occupy cache slots; a failed lookup is never
//! stored and will be retried verbatim on the next request for the same
//! address. Addresses are used as keys without normalization.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::Serialize;

use crate::types::Coordinate;

/// Default number of cached addresses.
pub const DEFAULT_CACHE_CAPACITY: usize = 2500;

/// Snapshot of cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheInfo {
    /// Lookups answered from the cache since construction or the last clear.
    pub hits: u64,
    /// Lookups that required a remote call since construction or the last clear.
    pub misses: u64,
    /// Configured capacity.
    pub max_size: usize,
    /// Currently occupied slots.
    pub current_size: usize,
}

/// Address-to-coordinate cache with hit/miss accounting.
pub(crate) struct GeocodeCache {
    entries: LruCache<String, Coordinate>,
    hits: u64,
    misses: u64,
}

impl GeocodeCache {
    /// Creates an empty cache with the given capacity.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up an address, promoting it to most-recently-used on a hit.
    pub fn get(&mut self, address: &str) -> Option<Coordinate> {
        match self.entries.get(address) {
            Some(coordinate) => {
                self.hits += 1;
                Some(*coordinate)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores a resolved address, evicting the least-recently-used entry
    /// if the cache is at capacity.
    pub fn insert(&mut self, address: String, coordinate: Coordinate) {
        self.entries.put(address, coordinate);
    }

    /// Drops all entries and resets the hit/miss counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Returns a statistics snapshot.
    pub fn info(&self) -> CacheInfo {
        CacheInfo {
            hits: self.hits,
            misses: self.misses,
            max_size: self.entries.cap().get(),
            current_size: self.entries.len(),
        }
    }
}

impl std::fmt::Debug for GeocodeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodeCache")
            .field("info", &self.info())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> GeocodeCache {
        GeocodeCache::new(NonZeroUsize::new(capacity).unwrap())
    }

    fn coordinate(lat: f64) -> Coordinate {
        Coordinate { lat, lng: -lat }
    }

    #[test]
    fn test_miss_then_hit_accounting() {
        let mut cache = cache(10);

        assert_eq!(cache.get("Seoul"), None);
        cache.insert("Seoul".to_string(), coordinate(37.5));
        assert_eq!(cache.get("Seoul"), Some(coordinate(37.5)));

        let info = cache.info();
        assert_eq!(info.hits, 1);
        assert_eq!(info.misses, 1);
        assert_eq!(info.current_size, 1);
        assert_eq!(info.max_size, 10);
    }

    #[test]
    fn test_keys_are_not_normalized() {
        let mut cache = cache(10);
        cache.insert("Seoul".to_string(), coordinate(37.5));

        assert_eq!(cache.get("seoul"), None);
        assert_eq!(cache.get(" Seoul"), None);
        assert_eq!(cache.info().current_size, 1);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = cache(2);
        cache.insert("a".to_string(), coordinate(1.0));
        cache.insert("b".to_string(), coordinate(2.0));

        // Reading "a" makes "b" the eviction candidate.
        assert!(cache.get("a").is_some());
        cache.insert("c".to_string(), coordinate(3.0));

        assert_eq!(cache.info().current_size, 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_default_capacity_eviction() {
        let mut cache = cache(DEFAULT_CACHE_CAPACITY);
        for i in 0..=DEFAULT_CACHE_CAPACITY {
            cache.insert(format!("address {i}"), coordinate(i as f64));
        }

        let info = cache.info();
        assert_eq!(info.current_size, DEFAULT_CACHE_CAPACITY);
        // The very first insert is the least recently used.
        assert!(cache.get("address 0").is_none());
        assert!(cache.get("address 1").is_some());
        assert!(cache.get(&format!("address {DEFAULT_CACHE_CAPACITY}")).is_some());
    }

    #[test]
    fn test_clear_resets_entries_and_counters() {
        let mut cache = cache(10);
        cache.insert("Seoul".to_string(), coordinate(37.5));
        cache.get("Seoul");
        cache.get("Busan");

        cache.clear();

        let info = cache.info();
        assert_eq!(info.hits, 0);
        assert_eq!(info.misses, 0);
        assert_eq!(info.current_size, 0);
        assert_eq!(cache.get("Seoul"), None);
    }
}
