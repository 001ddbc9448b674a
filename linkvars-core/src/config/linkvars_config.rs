//! Top-level engine configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CacheConfig, EngineConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`LINKVARS_*`)
/// 3. Project config (`linkvars.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LinkvarsConfig {
    pub engine: EngineConfig,
    pub cache: CacheConfig,
}

/// Overrides supplied programmatically by the embedding analyzer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub cache_enabled: Option<bool>,
    pub cache_max_entries: Option<u64>,
    pub eager_closure: Option<bool>,
    pub log_rejections: Option<bool>,
}

impl LinkvarsConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &LinkvarsConfig) -> Result<(), ConfigError> {
        if let Some(max_entries) = config.cache.max_entries {
            if max_entries == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "cache.max_entries".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    fn merge_toml_file(config: &mut LinkvarsConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: LinkvarsConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut LinkvarsConfig, other: &LinkvarsConfig) {
        if other.engine.eager_closure.is_some() {
            base.engine.eager_closure = other.engine.eager_closure;
        }
        if other.engine.log_rejections.is_some() {
            base.engine.log_rejections = other.engine.log_rejections;
        }
        if other.cache.enabled.is_some() {
            base.cache.enabled = other.cache.enabled;
        }
        if other.cache.max_entries.is_some() {
            base.cache.max_entries = other.cache.max_entries;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `LINKVARS_CACHE_MAX_ENTRIES`, `LINKVARS_ENGINE_EAGER_CLOSURE`, etc.
    fn apply_env_overrides(config: &mut LinkvarsConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_value::<bool>("LINKVARS_CACHE_ENABLED")? {
            config.cache.enabled = Some(v);
        }
        if let Some(v) = env_value::<u64>("LINKVARS_CACHE_MAX_ENTRIES")? {
            config.cache.max_entries = Some(v);
        }
        if let Some(v) = env_value::<bool>("LINKVARS_ENGINE_EAGER_CLOSURE")? {
            config.engine.eager_closure = Some(v);
        }
        if let Some(v) = env_value::<bool>("LINKVARS_ENGINE_LOG_REJECTIONS")? {
            config.engine.log_rejections = Some(v);
        }
        Ok(())
    }

    fn apply_overrides(config: &mut LinkvarsConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.cache_enabled {
            config.cache.enabled = Some(v);
        }
        if let Some(v) = overrides.cache_max_entries {
            config.cache.max_entries = Some(v);
        }
        if let Some(v) = overrides.eager_closure {
            config.engine.eager_closure = Some(v);
        }
        if let Some(v) = overrides.log_rejections {
            config.engine.log_rejections = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Read and parse an environment variable. Unset is `Ok(None)`; a value
/// that does not parse is reported rather than silently dropped.
fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("cannot parse '{val}'"),
            }),
        Err(_) => Ok(None),
    }
}
