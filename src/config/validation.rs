//! Configuration validation logic
//!
//! This module provides validation methods for the configuration structures
//! so that a client is never built from settings it cannot honor.

use crate::config::error::ConfigError;
use crate::config::settings::{
    CacheBackend, CacheConfig, ClientSettings, RedisCacheConfig, ServerConfig,
};

/// Accepted Redis URL schemes
const VALID_REDIS_SCHEMES: &[&str] = &["redis://", "rediss://"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    /// - Request and connect timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host is required. Please specify the translation server address.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.timeout_ms == 0 {
            return Err(ConfigError::validation(
                "server.timeout_ms",
                "Request timeout must be greater than 0 milliseconds.",
            ));
        }

        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::validation(
                "server.connect_timeout_ms",
                "Connect timeout must be greater than 0 milliseconds.",
            ));
        }

        Ok(())
    }
}

impl RedisCacheConfig {
    /// Validate Redis cache configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_REDIS_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "cache.redis.url",
                "Invalid Redis URL. Expected format: redis://host[:port][/db] or rediss://...",
            ));
        }

        if self.ttl_seconds == 0 {
            return Err(ConfigError::validation(
                "cache.redis.ttl_seconds",
                "Cache TTL must be greater than 0 seconds.",
            ));
        }

        if self.pool_size == 0 {
            return Err(ConfigError::validation(
                "cache.redis.pool_size",
                "Connection pool size must be greater than 0.",
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "cache.redis.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl CacheConfig {
    /// Validate cache configuration
    ///
    /// Only the selected backend is checked, and nothing is checked when
    /// caching is disabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        match self.backend {
            CacheBackend::Memory => {
                if self.memory.ttl_seconds == 0 {
                    return Err(ConfigError::validation(
                        "cache.memory.ttl_seconds",
                        "Cache TTL must be greater than 0 seconds.",
                    ));
                }
                Ok(())
            }
            CacheBackend::Redis => self.redis.validate(),
        }
    }
}

impl ClientSettings {
    /// Validate all settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}
