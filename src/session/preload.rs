//! Reaction Animation Preload Cache
//!
//! Bounded priority cache for animations preloaded ahead of a predicted
//! gesture committing. When full, a new entry is admitted only if its
//! priority strictly exceeds the lowest-priority resident entry, which is
//! then evicted; otherwise the insert is silently dropped.

use std::collections::HashMap;
use tracing::debug;

/// Default cache capacity
pub const DEFAULT_PRELOAD_CAPACITY: usize = 5;

/// Priority-evicting preload cache keyed by animation name
#[derive(Debug, Clone)]
pub struct PreloadCache {
    entries: HashMap<String, f64>,
    capacity: usize,
}

impl PreloadCache {
    /// Create a cache with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PRELOAD_CAPACITY)
    }

    /// Create a cache admitting at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Insert an animation at the given priority.
    ///
    /// A key already resident has its priority raised to the maximum of the
    /// old and new values. Returns true if the entry is resident afterwards.
    pub fn insert(&mut self, key: &str, priority: f64) -> bool {
        if let Some(existing) = self.entries.get_mut(key) {
            if priority > *existing {
                *existing = priority;
            }
            return true;
        }

        if self.entries.len() < self.capacity {
            self.entries.insert(key.to_string(), priority);
            return true;
        }

        // Full: admit only above the current minimum, evicting it
        let min = self
            .entries
            .iter()
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(k, p)| (k.clone(), *p));

        match min {
            Some((min_key, min_priority)) if priority > min_priority => {
                debug!(evicted = %min_key, admitted = %key, "preload cache eviction");
                self.entries.remove(&min_key);
                self.entries.insert(key.to_string(), priority);
                true
            }
            _ => false,
        }
    }

    /// Check whether an animation is resident
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for PreloadCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_below_capacity() {
        let mut cache = PreloadCache::with_capacity(3);
        assert!(cache.insert("tap", 0.9));
        assert!(cache.insert("swipe-left", 0.8));
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("tap"));
    }

    #[test]
    fn test_full_cache_evicts_minimum() {
        let mut cache = PreloadCache::with_capacity(2);
        cache.insert("tap", 0.5);
        cache.insert("drag", 0.9);

        // Higher than the minimum resident (0.5): admitted, "tap" evicted
        assert!(cache.insert("swipe-up", 0.7));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("tap"));
        assert!(cache.contains("swipe-up"));
        assert!(cache.contains("drag"));
    }

    #[test]
    fn test_full_cache_drops_low_priority() {
        let mut cache = PreloadCache::with_capacity(2);
        cache.insert("tap", 0.5);
        cache.insert("drag", 0.9);

        // Not above the minimum: silently dropped
        assert!(!cache.insert("swipe-up", 0.5));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("swipe-up"));
    }

    #[test]
    fn test_reinsert_raises_priority() {
        let mut cache = PreloadCache::with_capacity(2);
        cache.insert("tap", 0.3);
        cache.insert("drag", 0.9);
        assert!(cache.insert("tap", 0.8));

        // The raised entry is now the minimum; a 0.5 challenger loses to it
        assert!(!cache.insert("pinch-in", 0.5));
        assert!(cache.contains("tap"));
    }

    #[test]
    fn test_clear() {
        let mut cache = PreloadCache::new();
        cache.insert("tap", 0.9);
        cache.clear();
        assert!(cache.is_empty());
    }
}
