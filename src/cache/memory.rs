//! Memory cache implementation using cached::TimedCache.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use cached::{Cached, TimedCache};

use crate::cache::{CacheError, CacheKey, TranslationCache};
use crate::config::settings::MemoryCacheConfig;

/// In-memory cache with a fixed TTL.
///
/// Entries are only dropped once they expire and are read or overwritten;
/// there is no size bound.
pub struct MemoryTranslationCache {
    store: Mutex<TimedCache<CacheKey, String>>,
    ttl: Duration,
}

impl MemoryTranslationCache {
    pub fn new(config: &MemoryCacheConfig) -> Self {
        Self::with_ttl(Duration::from_secs(config.ttl_seconds))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            store: Mutex::new(TimedCache::with_lifespan(ttl)),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.store.lock().map(|store| store.cache_size()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TranslationCache for MemoryTranslationCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        Ok(store.cache_get(key).cloned())
    }

    async fn set(&self, key: &CacheKey, value: String) -> Result<(), CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        store.cache_set(key.clone(), value);
        Ok(())
    }
}
