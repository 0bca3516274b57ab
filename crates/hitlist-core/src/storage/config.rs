//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Defaults for newly added habits
//! - Whether celebrations are shown
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calendar::MonthKey;
use crate::error::{ConfigError, Result};
use crate::habit::HabitCategory;

/// Defaults applied when adding a habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitsConfig {
    #[serde(default)]
    pub default_category: HabitCategory,
    /// Monthly goal in days. When unset, the goal is the month's length.
    #[serde(default)]
    pub default_goal: Option<u32>,
}

/// Celebration display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CelebrationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub habits: HabitsConfig,
    #[serde(default)]
    pub celebrations: CelebrationsConfig,
}

fn default_true() -> bool {
    true
}

impl Default for HabitsConfig {
    fn default() -> Self {
        Self {
            default_category: HabitCategory::Health,
            default_goal: None,
        }
    }
}

impl Default for CelebrationsConfig {
    fn default() -> Self {
        Self { enabled: true }
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

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }
        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let parse_number = |value: &str| {
            value
                .parse::<u64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|_| invalid(format!("cannot parse '{value}' as number")))
        };

        let new_value = match existing {
            serde_json::Value::Bool(_) => value
                .parse::<bool>()
                .map(serde_json::Value::Bool)
                .map_err(|e| invalid(e.to_string()))?,
            // Numeric keys are all optional; "none" clears them whether set or not.
            serde_json::Value::Number(_) | serde_json::Value::Null => match value.trim() {
                "" | "none" | "null" => serde_json::Value::Null,
                trimmed => parse_number(trimmed)?,
            },
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("cannot set a whole section".into()));
            }
            serde_json::Value::String(_) => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing the default there if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
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
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Goal used for a new habit in `month`.
    pub fn default_goal_for(&self, month: MonthKey) -> u32 {
        let days = month.days_in_month();
        self.habits.default_goal.map_or(days, |goal| goal.clamp(1, days.max(1)))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default config");
            Self::default()
        })
    }
}
