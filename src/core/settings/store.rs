#![allow(clippy::result_large_err)]

use super::{ConfigNamespace, ConfigStore};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::utils::value::is_truthy;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// In-memory settings snapshot, usually loaded from a config export.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    values: IndexMap<String, Value>,
    source: Option<PathBuf>,
}

/// Syntax of a settings export, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Yaml,
    Toml,
    Json,
}

impl SettingsFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "yml" | "yaml" => Some(SettingsFormat::Yaml),
            "toml" => Some(SettingsFormat::Toml),
            "json" => Some(SettingsFormat::Json),
            _ => None,
        }
    }
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Load a settings export. A missing file yields an empty store, which
    /// makes every allow-list rule skip.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            tracing::warn!(
                "settings file {} not found; every allow-listed row will be skipped",
                path.display()
            );
            return Ok(SettingsStore {
                values: IndexMap::new(),
                source: Some(path.to_path_buf()),
            });
        }

        let format = SettingsFormat::from_path(path).ok_or_else(|| {
            AppError::new(
                ErrorCategory::SettingsError,
                format!(
                    "unsupported settings file extension for {} (expected .yml, .yaml, .toml or .json)",
                    path.display()
                ),
            )
            .with_code("SETTINGS-001")
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read settings file {}: {}", path.display(), e),
            )
        })?;

        let mut store = Self::parse(&content, format)
            .map_err(|e| e.with_context(path.display().to_string()))?;
        store.source = Some(path.to_path_buf());
        tracing::debug!(keys = store.len(), "loaded settings from {}", path.display());
        Ok(store)
    }

    /// Parse a flat key/value settings document.
    pub fn parse(content: &str, format: SettingsFormat) -> Result<Self, AppError> {
        let parsed: Result<IndexMap<String, Value>, String> = match format {
            SettingsFormat::Yaml => {
                if content.trim().is_empty() {
                    Ok(IndexMap::new())
                } else {
                    serde_yaml::from_str(content).map_err(|e| e.to_string())
                }
            }
            SettingsFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            SettingsFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        let values = parsed.map_err(|message| {
            AppError::new(
                ErrorCategory::SettingsError,
                format!("Failed to parse settings: {}", message),
            )
            .with_code("SETTINGS-002")
        })?;
        Ok(SettingsStore {
            values,
            source: None,
        })
    }

    /// Suffixes of every set key in `namespace`, in document order.
    pub fn set_suffixes(&self, namespace: ConfigNamespace) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(key, value)| {
                ConfigNamespace::of_key(key) == Some(namespace) && is_truthy(value)
            })
            .map(|(key, _)| &key[namespace.prefix().len()..])
            .collect()
    }
}

impl ConfigStore for SettingsStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SettingsStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SettingsStore {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source: None,
        }
    }
}
