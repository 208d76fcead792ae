//! Builds the configured cache backend.

use std::sync::Arc;

use crate::cache::memory::MemoryTranslationCache;
use crate::cache::redis::RedisTranslationCache;
use crate::cache::{CacheError, TranslationCache};
use crate::config::settings::{CacheBackend, CacheConfig};

/// Create the cache backend described by `config`.
///
/// Returns `None` when caching is disabled, in which case the client calls
/// the translation server for every request.
pub async fn build_cache(
    config: &CacheConfig,
) -> Result<Option<Arc<dyn TranslationCache>>, CacheError> {
    if !config.enabled {
        return Ok(None);
    }

    let backend: Arc<dyn TranslationCache> = match config.backend {
        CacheBackend::Memory => Arc::new(MemoryTranslationCache::new(&config.memory)),
        CacheBackend::Redis => Arc::new(RedisTranslationCache::new(&config.redis).await?),
    };

    tracing::debug!(backend = ?config.backend, "Translation cache initialized");
    Ok(Some(backend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheKey;
    use crate::phrase::Phrase;

    #[tokio::test]
    async fn test_disabled_cache_builds_nothing() {
        let config = CacheConfig::default();
        assert!(build_cache(&config).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_backend() {
        let config = CacheConfig {
            enabled: true,
            backend: CacheBackend::Memory,
            ..CacheConfig::default()
        };
        let cache = build_cache(&config).await.unwrap().expect("cache enabled");

        let key = CacheKey::new("se", None, &Phrase::from("hello"));
        cache.set(&key, "hej".to_string()).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some("hej"));
    }
}
