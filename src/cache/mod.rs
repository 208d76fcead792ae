//! Translation cache with pluggable backends.
//!
//! A cache maps a normalized request key (language, context, phrase, count)
//! to a previously obtained translation. Every backend applies one fixed
//! time-to-live to all entries; an expired entry reads as a miss.
//!
//! Backends:
//! - Memory cache (in-process, unbounded, expiry only)
//! - Redis cache (shared between processes, expiry enforced by Redis)
//!
//! # Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! backend = "memory"  # or "redis"
//!
//! [cache.memory]
//! ttl_seconds = 300
//!
//! [cache.redis]
//! url = "redis://127.0.0.1:6379"
//! ttl_seconds = 300
//! pool_size = 4
//! connection_timeout = 5
//! key_prefix = "translations"
//! ```

mod error;
mod factory;
mod key;
mod memory;
mod redis;
mod traits;

pub use error::CacheError;
pub use factory::build_cache;
pub use key::CacheKey;
pub use memory::MemoryTranslationCache;
pub use self::redis::RedisTranslationCache;
pub use traits::TranslationCache;

// Re-export config types
pub use crate::config::settings::{
    CacheBackend, CacheConfig, MemoryCacheConfig, RedisCacheConfig,
};
