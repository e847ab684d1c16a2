//! LRU Conversion Cache
//!
//! Keeps recent conversion results so repeated requests for the same scripts
//! and settings skip the converter.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::config::CacheConfig;
use crate::subtitle::{Conversion, SrtSettings};

/// Cache key: the exact request input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversionKey {
    pub scripts: Vec<String>,
    pub settings: SrtSettings,
}

impl ConversionKey {
    pub fn new(scripts: &[String], settings: SrtSettings) -> Self {
        Self {
            scripts: scripts.to_vec(),
            settings,
        }
    }
}

/// Cache entry with metadata
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub conversion: Arc<Conversion>,
    pub created_at: SystemTime,
    pub access_count: usize,
}

impl CacheEntry {
    pub fn new(conversion: Arc<Conversion>) -> Self {
        Self {
            conversion,
            created_at: SystemTime::now(),
            access_count: 1,
        }
    }

    pub fn age_secs(&self) -> u64 {
        self.created_at.elapsed().map(|d| d.as_secs()).unwrap_or(0)
    }

    pub fn is_expired(&self, ttl_secs: u64) -> bool {
        self.age_secs() > ttl_secs
    }
}

/// LRU cache for conversion results
pub struct ConversionCache {
    entries: Mutex<LruCache<ConversionKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    config: CacheConfig,
}

impl ConversionCache {
    /// Create a new conversion cache
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            config,
        }
    }

    /// Get a cached conversion, dropping it if expired
    pub fn get(&self, key: &ConversionKey) -> Option<Arc<Conversion>> {
        let mut entries = self.entries.lock();

        let expired = match entries.get_mut(key) {
            Some(entry) if !entry.is_expired(self.config.ttl_secs) => {
                entry.access_count += 1;
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.conversion.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.pop(key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Cache a conversion, evicting the least recently used entry when full
    pub fn insert(&self, key: ConversionKey, conversion: Arc<Conversion>) {
        if self.config.max_entries == 0 {
            return;
        }
        let mut entries = self.entries.lock();
        if let Some((_, evicted)) = entries.push(key, CacheEntry::new(conversion)) {
            tracing::trace!(
                "Evicted cached conversion ({} entries, age {}s)",
                evicted.conversion.entry_count(),
                evicted.age_secs()
            );
        }
    }

    /// Check if a conversion is cached
    pub fn contains(&self, key: &ConversionKey) -> bool {
        self.entries.lock().contains(key)
    }

    /// Clear all expired entries
    pub fn clear_expired(&self) -> usize {
        let mut entries = self.entries.lock();
        let expired: Vec<ConversionKey> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.config.ttl_secs))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.pop(key);
        }
        expired.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        let oldest_age = entries.iter().map(|(_, e)| e.age_secs()).max().unwrap_or(0);

        CacheStats {
            entry_count: entries.len(),
            capacity: entries.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            oldest_entry_age_secs: oldest_age,
        }
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub entry_count: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub oldest_entry_age_secs: u64,
}

impl Default for ConversionCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
