//! TranslationCache trait definition.

use async_trait::async_trait;

use crate::cache::{CacheError, CacheKey};

/// Trait for translation cache backends.
///
/// A miss, including an expired entry, is `Ok(None)` and never an error.
/// Errors are reserved for a backend that cannot be reached or used.
#[async_trait]
pub trait TranslationCache: Send + Sync {
    /// Get an unexpired translation.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    /// Store a translation stamped with the current time, replacing any
    /// previous entry for the key.
    async fn set(&self, key: &CacheKey, value: String) -> Result<(), CacheError>;

    /// Look up several keys at once. The result is aligned with `keys`.
    async fn get_multiple(&self, keys: &[CacheKey]) -> Result<Vec<Option<String>>, CacheError> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            values.push(self.get(key).await?);
        }
        Ok(values)
    }

    /// Store several translations at once.
    async fn set_multiple(&self, entries: Vec<(CacheKey, String)>) -> Result<(), CacheError> {
        for (key, value) in entries {
            self.set(&key, value).await?;
        }
        Ok(())
    }
}
