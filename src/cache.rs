//! Memoizing lookup shared by the Proxy and Flyweight demos.
//!
//! A key maps to a value computed on the first miss and served from memory
//! afterwards. There is no eviction, no expiry and no locking: entries live
//! as long as the cache does.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug)]
pub struct MemoCache<K, V> {
    label: &'static str,
    entries: HashMap<K, V>,
    stats: CacheStats,
}

impl<K: Eq + Hash + Debug, V> MemoCache<K, V> {
    /// `label` only shows up in log events.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Returns the value for `key`, running `producer` only on a miss.
    pub fn lookup<F>(&mut self, key: K, producer: F) -> (&V, CacheStatus)
    where
        F: FnOnce(&K) -> V,
    {
        match self.try_lookup(key, |k| Ok::<_, Infallible>(producer(k))) {
            Ok(found) => found,
            Err(never) => match never {},
        }
    }

    /// Like `lookup`, but the producer may fail. A failed miss stores
    /// nothing, so the next lookup for that key runs the producer again.
    pub fn try_lookup<E, F>(&mut self, key: K, producer: F) -> Result<(&V, CacheStatus), E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if self.entries.contains_key(&key) {
            self.stats.hits += 1;
            tracing::debug!(cache = self.label, ?key, "cache hit");
            return Ok((&self.entries[&key], CacheStatus::Hit));
        }

        self.stats.misses += 1;
        tracing::info!(cache = self.label, ?key, "cache miss");
        let value = producer(&key)?;
        Ok((self.entries.entry(key).or_insert(value), CacheStatus::Miss))
    }

    pub fn get_or_insert_with<F>(&mut self, key: K, producer: F) -> &V
    where
        F: FnOnce(&K) -> V,
    {
        self.lookup(key, producer).0
    }

    /// Peeks without counting or producing.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        tracing::debug!(cache = self.label, entries = self.entries.len(), "cache cleared");
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_lookup_misses_then_hits() {
        let mut cache = MemoCache::new("test");
        let mut calls = 0;

        let (value, status) = cache.lookup("a".to_string(), |k| {
            calls += 1;
            k.len()
        });
        assert_eq!((*value, status), (1, CacheStatus::Miss));

        let (value, status) = cache.lookup("a".to_string(), |_| {
            calls += 1;
            99
        });
        assert_eq!((*value, status), (1, CacheStatus::Hit));
        assert_eq!(calls, 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_clear_forces_recompute() {
        let mut cache = MemoCache::new("test");
        cache.get_or_insert_with(1, |k| k * 10);
        assert!(cache.contains(&1));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);

        let (_, status) = cache.lookup(1, |k| k * 10);
        assert_eq!(status, CacheStatus::Miss);
    }

    #[test]
    fn test_failed_producer_leaves_no_entry() {
        let mut cache: MemoCache<&str, u32> = MemoCache::new("test");

        let result = cache.try_lookup("a", |_| Err("offline"));
        assert_eq!(result.unwrap_err(), "offline");
        assert!(!cache.contains(&"a"));

        let (value, status) = cache.try_lookup("a", |_| Ok::<_, &str>(7)).unwrap();
        assert_eq!((*value, status), (7, CacheStatus::Miss));
        let (_, status) = cache.try_lookup("a", |_| Err("not called")).unwrap();
        assert_eq!(status, CacheStatus::Hit);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 2 });
    }

    proptest! {
        #[test]
        fn prop_producer_runs_once_per_distinct_key(keys in proptest::collection::vec(0u8..16, 0..64)) {
            let mut cache = MemoCache::new("prop");
            let mut produced = 0u64;
            for key in &keys {
                cache.get_or_insert_with(*key, |k| {
                    produced += 1;
                    u32::from(*k) * 2
                });
            }

            let distinct = keys.iter().collect::<std::collections::HashSet<_>>().len();
            prop_assert_eq!(produced as usize, distinct);
            prop_assert_eq!(cache.len(), distinct);
            prop_assert_eq!(cache.stats().hits + cache.stats().misses, keys.len() as u64);
            for key in &keys {
                prop_assert_eq!(cache.get(key), Some(&(u32::from(*key) * 2)));
            }
        }
    }
}
