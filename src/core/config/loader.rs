#![allow(clippy::result_large_err)]

use super::{ConfigValidator, MigrateConfig};
use crate::core::error::AppError;
use crate::core::types::BlobFormat;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "fuzion-migrate.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/fuzion-migrate.toml)
    /// Environment variables override config file values
    pub fn load_from_workspace(workspace_path: &Path) -> Result<MigrateConfig, AppError> {
        Self::load(&workspace_path.join(CONFIG_FILE_NAME))
    }

    /// Load, apply env overrides and validate. A missing file means defaults.
    pub fn load(config_path: &Path) -> Result<MigrateConfig, AppError> {
        let config_file = Self::load_from_file(config_path)?;

        let mut config = config_file.unwrap_or_default();

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut config);

        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<MigrateConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                crate::core::types::ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: MigrateConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                crate::core::types::ErrorCategory::ValidationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
            .with_code("CONFIG-002")
        })?;

        Ok(Some(config))
    }

    /// Environment variables take precedence over config file values.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut MigrateConfig) {
        if let Ok(settings_file) = env::var("FUZION_MIGRATE_SETTINGS_FILE") {
            config.settings.file = PathBuf::from(settings_file);
        }

        if let Ok(blob_format_str) = env::var("FUZION_MIGRATE_BLOB_FORMAT") {
            match blob_format_str.parse::<BlobFormat>() {
                Ok(blob_format) => config.engine.blob_format = blob_format,
                Err(e) => tracing::warn!("ignoring FUZION_MIGRATE_BLOB_FORMAT: {}", e),
            }
        }

        if let Ok(fail_str) = env::var("FUZION_MIGRATE_FAIL_ON_FORMAT_ERROR") {
            match fail_str.parse::<bool>() {
                Ok(fail) => config.engine.fail_on_format_error = fail,
                Err(e) => tracing::warn!("ignoring FUZION_MIGRATE_FAIL_ON_FORMAT_ERROR: {}", e),
            }
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "FUZION_MIGRATE_SETTINGS_FILE - Override settings export path (default: fuzion_migrate.settings.yml)",
            "FUZION_MIGRATE_BLOB_FORMAT - Override serialized blob format (php/json, default: php)",
            "FUZION_MIGRATE_FAIL_ON_FORMAT_ERROR - Exit non-zero on malformed rows (true/false, default: true)",
        ]
    }
}
