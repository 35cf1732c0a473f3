use crate::core::tracker::DEFAULT_IDENTITY;
use crate::errors::{AppError, AppResult};
use crate::models::currency::{Currency, DEFAULT_CURRENCY};
use crate::ui::messages::warning;
use crate::utils::path::resolve_in;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_identity")]
    pub session_identity: String,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_identity() -> String {
    DEFAULT_IDENTITY.to_string()
}
fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}
fn default_confirm_delete() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            session_identity: default_identity(),
            default_currency: default_currency(),
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.manetracker`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".manetracker")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("manetracker.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("manetracker.sqlite")
    }

    /// Load configuration from the standard location, or defaults if not found.
    pub fn load() -> Self {
        Self::load_from(&Self::config_file())
    }

    /// Load configuration from `path`. A missing file yields defaults; an
    /// unreadable or malformed one yields defaults and a warning.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(AppError::from)
            .and_then(|content| {
                serde_yaml::from_str::<Config>(&content)
                    .map_err(|e| AppError::Config(e.to_string()))
            });

        match parsed {
            Ok(cfg) => cfg,
            Err(e) => {
                warning(format!(
                    "Ignoring configuration file {}: {e}. Using defaults.",
                    path.display()
                ));
                Self::default()
            }
        }
    }

    /// Currency used when `--cost` is given without `--currency`.
    pub fn currency(&self) -> AppResult<Currency> {
        Currency::parse(&self.default_currency)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Create the configuration file (unless `is_test`) and return the
    /// configuration pointing at the chosen database.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => resolve_in(&dir, name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::load()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
