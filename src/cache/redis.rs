//! Redis cache implementation using bb8 connection pool.

use std::time::Duration;

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};

use crate::cache::{CacheError, CacheKey, TranslationCache};
use crate::config::settings::RedisCacheConfig;

type RedisPool = Pool<Client>;

/// Redis-based cache with bb8 connection pool.
///
/// Every entry is written with `SET EX`, so expiry is enforced by Redis.
pub struct RedisTranslationCache {
    pool: RedisPool,
    key_prefix: String,
    ttl_seconds: u64,
}

impl RedisTranslationCache {
    pub async fn new(config: &RedisCacheConfig) -> Result<Self, CacheError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| CacheError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout))
            .build(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            key_prefix: config.key_prefix.clone(),
            ttl_seconds: config.ttl_seconds,
        })
    }

    fn prefixed_key(&self, key: &CacheKey) -> String {
        prefixed_key(&self.key_prefix, key)
    }

    async fn get_conn(&self) -> Result<PooledConnection<'_, Client>, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }
}

fn prefixed_key(prefix: &str, key: &CacheKey) -> String {
    format!("{}:{}", prefix, key.storage_key())
}

#[async_trait]
impl TranslationCache for RedisTranslationCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed = self.prefixed_key(key);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        conn_ref
            .get(&prefixed)
            .await
            .map_err(|e: RedisError| CacheError::Operation(e.to_string()))
    }

    async fn set(&self, key: &CacheKey, value: String) -> Result<(), CacheError> {
        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed = self.prefixed_key(key);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        conn_ref
            .set_ex::<_, _, ()>(&prefixed, value, self.ttl_seconds)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))
    }

    async fn get_multiple(&self, keys: &[CacheKey]) -> Result<Vec<Option<String>>, CacheError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed: Vec<String> = keys.iter().map(|key| self.prefixed_key(key)).collect();

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&prefixed)
            .query_async(conn_ref)
            .await
            .map_err(|e: RedisError| CacheError::Operation(e.to_string()))?;

        if values.len() != keys.len() {
            return Err(CacheError::Operation(format!(
                "MGET returned {} values for {} keys",
                values.len(),
                keys.len()
            )));
        }
        Ok(values)
    }

    async fn set_multiple(&self, entries: Vec<(CacheKey, String)>) -> Result<(), CacheError> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let mut pipe = redis::pipe();
        for (key, value) in entries {
            pipe.set_ex(self.prefixed_key(&key), value, self.ttl_seconds)
                .ignore();
        }

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        pipe.query_async::<()>(conn_ref)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::Phrase;

    #[test]
    fn test_prefixed_key_layout() {
        let key = CacheKey::new("se", None, &Phrase::from(("translations", 1)));
        assert_eq!(
            prefixed_key("translations", &key),
            "translations:2:se0:1:translations"
        );
    }

    #[tokio::test]
    async fn test_invalid_url_is_connection_error() {
        let config = RedisCacheConfig {
            url: "not a url".to_string(),
            ..RedisCacheConfig::default()
        };
        let result = RedisTranslationCache::new(&config).await;
        assert!(matches!(result, Err(CacheError::Connection(_))));
    }
}
