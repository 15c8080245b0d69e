//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Where the task/habit data file lives and how IDs are assigned
//! - The default size of the focused (`next`) view
//! - Day boundaries for time-of-day classification
//!
//! Configuration is stored at `~/.config/habitroom/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::agenda::FocusLimit;
use crate::error::ConfigError;
use crate::time_of_day::DayBoundaries;

/// How new task and habit IDs are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Persisted counter that never hands out an ID twice.
    #[default]
    Monotonic,
    /// `number of existing items + 1`. Can collide after removals.
    Count,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data file path. Defaults to `todo_data.json` in the data directory.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

/// Agenda configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaConfig {
    #[serde(default = "default_focus_count")]
    pub default_focus_count: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habitroom/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub agenda: AgendaConfig,
    #[serde(default)]
    pub day: DayBoundaries,
}

fn default_focus_count() -> u32 {
    3
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            default_focus_count: default_focus_count(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|e| invalid(e.to_string()))?,
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::DataDir(e.to_string()))
    }

    /// Load from disk, writing defaults when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let load_failed = |message: String| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message,
                };
                let cfg: Self = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.check_day_order().map_err(load_failed)?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, writing defaults", path.display());
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field (e.g. a clock time that is not `HH:MM`).
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.check_day_order().map_err(|message| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        })?;
        *self = updated;
        Ok(())
    }

    /// The afternoon must start before the evening.
    fn check_day_order(&self) -> Result<(), String> {
        if self.day.afternoon_starts < self.day.evening_starts {
            return Ok(());
        }
        Err(format!(
            "day.afternoon_starts ({}) must be before day.evening_starts ({})",
            self.day.afternoon_starts.format("%H:%M"),
            self.day.evening_starts.format("%H:%M")
        ))
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Data file location, honoring `storage.data_file`.
    pub fn data_file(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage.data_file {
            Some(path) => Ok(path.clone()),
            None => data_dir()
                .map(|dir| dir.join("todo_data.json"))
                .map_err(|e| ConfigError::DataDir(e.to_string())),
        }
    }

    /// Default size of the focused view, clamped into range.
    pub fn focus_limit(&self) -> FocusLimit {
        FocusLimit::new(i64::from(self.agenda.default_focus_count))
    }
}
