//! Translations Client
//!
//! Client library for a remote translation lookup service. A call sends a
//! language, an optional context and one or more phrases (optionally with a
//! count for plural forms) and gets the translations back in request order.
//! Results can be cached with a fixed time-to-live, and translation can be
//! bypassed entirely.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod phrase;
pub mod protocol;

pub use cache::{CacheKey, MemoryTranslationCache, RedisTranslationCache, TranslationCache};
pub use client::{BoundTranslator, TranslationsClient, TranslationsClientBuilder};
pub use crate::config::{ClientSettings, ConfigLoader};
pub use error::{ClientError, ClientResult};
pub use phrase::{Phrase, Translation};
