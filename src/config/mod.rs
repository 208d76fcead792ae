//! Configuration management for the translation client
//!
//! Settings are loaded from an optional TOML file and overridden by
//! `TRANSLATIONS_*` environment variables.
//!
//! # Configuration Priority (lowest to highest)
//! 1. Built-in defaults
//! 2. The TOML file given to the loader or named by `TRANSLATIONS_CONFIG_FILE`
//! 3. `TRANSLATIONS_*` environment variables

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ClientSettings, ServerConfig};
