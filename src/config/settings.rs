//! Configuration settings structures for the translation client
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============================================================================
// Default value functions
// ============================================================================

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5555
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_connect_timeout_ms() -> u64 {
    1000
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_redis_pool_size() -> u32 {
    4
}

fn default_redis_connection_timeout() -> u64 {
    5
}

fn default_redis_key_prefix() -> String {
    "translations".to_string()
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Translation server connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in milliseconds, covering send and receive
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

// ============================================================================
// Cache Configuration
// ============================================================================

/// Cache backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
}

/// Memory cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisCacheConfig {
    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub url: String,

    /// Time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,

    /// Connection pool size
    #[serde(default = "default_redis_pool_size")]
    pub pool_size: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_redis_connection_timeout")]
    pub connection_timeout: u64,

    /// Key prefix for all cache entries
    #[serde(default = "default_redis_key_prefix")]
    pub key_prefix: String,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            ttl_seconds: default_cache_ttl(),
            pool_size: default_redis_pool_size(),
            connection_timeout: default_redis_connection_timeout(),
            key_prefix: default_redis_key_prefix(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CacheConfig {
    /// Whether caching is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Cache backend type
    #[serde(default)]
    pub backend: CacheBackend,

    /// Memory cache settings
    #[serde(default)]
    pub memory: MemoryCacheConfig,

    /// Redis cache settings
    #[serde(default)]
    pub redis: RedisCacheConfig,
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClientSettings {
    /// Translation server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Return phrases untranslated without touching network or cache
    #[serde(default)]
    pub skip_translations: bool,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![
                Just("127.0.0.1".to_string()),
                Just("0.0.0.0".to_string()),
                Just("localhost".to_string()),
            ],
            1u16..=65535u16,
            1u64..=60_000u64,
            1u64..=60_000u64,
        )
            .prop_map(|(host, port, timeout_ms, connect_timeout_ms)| ServerConfig {
                host,
                port,
                timeout_ms,
                connect_timeout_ms,
            })
    }

    fn arb_cache_config() -> impl Strategy<Value = CacheConfig> {
        (
            any::<bool>(),
            prop_oneof![Just(CacheBackend::Memory), Just(CacheBackend::Redis)],
            1u64..=3600u64,
            1u32..=16u32,
            "[a-z]{1,12}",
        )
            .prop_map(|(enabled, backend, ttl_seconds, pool_size, key_prefix)| CacheConfig {
                enabled,
                backend,
                memory: MemoryCacheConfig { ttl_seconds },
                redis: RedisCacheConfig {
                    ttl_seconds,
                    pool_size,
                    key_prefix,
                    ..RedisCacheConfig::default()
                },
            })
    }

    fn arb_settings() -> impl Strategy<Value = ClientSettings> {
        (arb_server_config(), any::<bool>(), arb_cache_config()).prop_map(
            |(server, skip_translations, cache)| ClientSettings {
                server,
                skip_translations,
                cache,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_settings_toml_roundtrip(settings in arb_settings()) {
            let toml = toml_string(&settings);
            let parsed: ClientSettings = config::Config::builder()
                .add_source(config::File::from_str(&toml, config::FileFormat::Toml))
                .build()
                .unwrap()
                .try_deserialize()
                .unwrap();
            prop_assert_eq!(parsed, settings);
        }
    }

    fn toml_string(settings: &ClientSettings) -> String {
        let backend = match settings.cache.backend {
            CacheBackend::Memory => "memory",
            CacheBackend::Redis => "redis",
        };
        format!(
            r#"
skip_translations = {skip}

[server]
host = "{host}"
port = {port}
timeout_ms = {timeout}
connect_timeout_ms = {connect_timeout}

[cache]
enabled = {enabled}
backend = "{backend}"

[cache.memory]
ttl_seconds = {memory_ttl}

[cache.redis]
url = "{url}"
ttl_seconds = {redis_ttl}
pool_size = {pool_size}
connection_timeout = {redis_timeout}
key_prefix = "{prefix}"
"#,
            skip = settings.skip_translations,
            host = settings.server.host,
            port = settings.server.port,
            timeout = settings.server.timeout_ms,
            connect_timeout = settings.server.connect_timeout_ms,
            enabled = settings.cache.enabled,
            backend = backend,
            memory_ttl = settings.cache.memory.ttl_seconds,
            url = settings.cache.redis.url,
            redis_ttl = settings.cache.redis.ttl_seconds,
            pool_size = settings.cache.redis.pool_size,
            redis_timeout = settings.cache.redis.connection_timeout,
            prefix = settings.cache.redis.key_prefix,
        )
    }

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::default();
        assert_eq!(settings.server.address(), "127.0.0.1:5555");
        assert_eq!(settings.server.timeout(), Duration::from_secs(3));
        assert!(!settings.skip_translations);
        assert!(!settings.cache.enabled);
        assert_eq!(settings.cache.backend, CacheBackend::Memory);
        assert_eq!(settings.cache.memory.ttl_seconds, 300);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let parsed: ClientSettings = config::Config::builder()
            .add_source(config::File::from_str("", config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed, ClientSettings::default());
    }
}
