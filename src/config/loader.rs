//! Configuration loader for the translation client
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from a TOML file and the environment with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::ClientSettings;

/// Environment variable naming the configuration file
const CONFIG_FILE_ENV: &str = "TRANSLATIONS_CONFIG_FILE";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "TRANSLATIONS";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader
///
/// Sources in order of priority (lowest first):
/// 1. Built-in defaults
/// 2. The configuration file, when one is set
/// 3. `TRANSLATIONS_*` environment variables
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Configuration file path
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that reads the file named by `TRANSLATIONS_CONFIG_FILE`,
    /// if that variable is set.
    pub fn new() -> Self {
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);
        Self { config_file }
    }

    /// Create a loader for an explicit configuration file.
    pub fn with_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_file: Some(path.into()),
        }
    }

    /// Get the configuration file path, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configuration file is set but missing
    /// - configuration parsing fails
    /// - configuration validation fails
    pub fn load(&self) -> Result<ClientSettings, ConfigError> {
        let config = self.build_config()?;
        let settings: ClientSettings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        tracing::debug!(
            server = %settings.server.address(),
            skip_translations = settings.skip_translations,
            cache_enabled = settings.cache.enabled,
            "Loaded translation client settings"
        );

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file)?,
            None => builder,
        };

        // Environment variables always win.
        // TRANSLATIONS_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    /// Add a required file source to the config builder
    fn add_file_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let path = path.to_str().ok_or_else(|| {
            ConfigError::ParseError(format!("Non UTF-8 configuration path: {}", path.display()))
        })?;

        Ok(builder.add_source(File::new(path, FileFormat::Toml).required(true)))
    }

    /// Add environment variable source to the config builder
    ///
    /// Examples:
    /// - `TRANSLATIONS_SERVER__PORT` -> `server.port`
    /// - `TRANSLATIONS_CACHE__REDIS__URL` -> `cache.redis.url`
    fn add_env_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}
