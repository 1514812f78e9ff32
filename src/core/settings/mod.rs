//! Read-only rule settings: the namespaced key space the inclusion rules
//! consult, and the store that answers lookups against it.

use crate::utils::value::is_set;
use serde_json::Value;
use std::fmt;

pub mod store;

pub use store::SettingsStore;

/// Closed set of key namespaces understood by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigNamespace {
    /// Content type is enabled for migration.
    ContentType,
    /// Blocks provided by a module are enabled for migration.
    BlockModule,
    /// Fields provided by a module are disabled.
    FieldModule,
    /// A single field config is disabled.
    FieldConfig,
    /// A single field instance is disabled.
    FieldInstance,
    /// A view display is disabled.
    View,
}

impl ConfigNamespace {
    pub const ALL: [ConfigNamespace; 6] = [
        ConfigNamespace::ContentType,
        ConfigNamespace::BlockModule,
        ConfigNamespace::FieldModule,
        ConfigNamespace::FieldConfig,
        ConfigNamespace::FieldInstance,
        ConfigNamespace::View,
    ];

    /// Prefix used in exported settings.
    pub fn prefix(self) -> &'static str {
        match self {
            ConfigNamespace::ContentType => "d7ct_",
            ConfigNamespace::BlockModule => "d7bm_",
            ConfigNamespace::FieldModule => "d7fm_",
            ConfigNamespace::FieldConfig => "d7fc_",
            ConfigNamespace::FieldInstance => "d7fci_",
            ConfigNamespace::View => "d7vv_",
        }
    }

    /// Namespace owning `key`, if any.
    ///
    /// `d7fci_` is tested before `d7fc_` since the latter is its prefix.
    pub fn of_key(key: &str) -> Option<ConfigNamespace> {
        let mut ordered = ConfigNamespace::ALL;
        ordered.sort_by_key(|ns| std::cmp::Reverse(ns.prefix().len()));
        ordered.into_iter().find(|ns| key.starts_with(ns.prefix()))
    }
}

impl fmt::Display for ConfigNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigNamespace::ContentType => "content-type",
            ConfigNamespace::BlockModule => "block-module",
            ConfigNamespace::FieldModule => "field-module",
            ConfigNamespace::FieldConfig => "field-config",
            ConfigNamespace::FieldInstance => "field-instance",
            ConfigNamespace::View => "view",
        };
        f.write_str(name)
    }
}

/// A fully built settings key. Opaque outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigKey(String);

impl ConfigKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn make_key(namespace: ConfigNamespace, suffix: &str) -> ConfigKey {
    ConfigKey(format!("{}{}", namespace.prefix(), suffix))
}

/// Lookup contract the rules evaluate against. Implementations must not
/// change underneath an in-flight run.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<&Value>;

    /// Absent or loosely empty values are unset.
    fn is_set(&self, key: &ConfigKey) -> bool {
        is_set(self.get(key.as_str()))
    }

    /// String setting, treating absent and non-string values as empty.
    fn get_str(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }
}
