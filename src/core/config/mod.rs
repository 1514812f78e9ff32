use crate::core::types::BlobFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration loaded from fuzion-migrate.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MigrateConfig {
    /// Rule settings export
    #[serde(default)]
    pub settings: SettingsConfig,

    /// Row evaluation behaviour
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Settings export path (.yml, .yaml, .toml or .json)
    #[serde(default = "default_settings_file")]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Encoding of serialized `data` blobs on field rows
    #[serde(default)]
    pub blob_format: BlobFormat,

    /// Exit non-zero when any row failed on malformed data
    #[serde(default = "default_fail_on_format_error")]
    pub fail_on_format_error: bool,
}

fn default_settings_file() -> PathBuf {
    PathBuf::from("fuzion_migrate.settings.yml")
}

fn default_fail_on_format_error() -> bool {
    true
}

impl Default for SettingsConfig {
    fn default() -> Self {
        SettingsConfig {
            file: default_settings_file(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            blob_format: BlobFormat::default(),
            fail_on_format_error: default_fail_on_format_error(),
        }
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
