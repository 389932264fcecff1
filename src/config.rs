//! Configuration management module.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the key-value store keeps its records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Leave policy constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Yearly leave allowance used for the remaining-balance estimate.
    pub annual_allowance_days: i64,
    /// Payout per encashed day.
    pub encashment_rate: u64,
    pub currency: String,
    pub max_encashment_days: u32,
    pub min_password_len: usize,
    /// A holiday this many days away or fewer is flagged as soon.
    pub soon_window_days: i64,
    pub upcoming_holiday_limit: usize,
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Cosmetic pause before a command commits.
    pub processing_delay_ms: u64,
    pub requests_page_size: usize,
    pub employees_page_size: usize,
    pub history_page_size: usize,
    pub roster_page_size: usize,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for daily rolling log files; stderr only when unset.
    #[serde(default)]
    pub file_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Get config file path (platform config directory).
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("com", "Gianged", "smart-leave")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("Data directory cannot be empty".to_string()));
        }
        if self.policy.annual_allowance_days < 0 {
            return Err(ConfigError::Validation(
                "Annual allowance cannot be negative".to_string(),
            ));
        }
        if self.policy.max_encashment_days < 1 {
            return Err(ConfigError::Validation(
                "Max encashment days must be at least 1".to_string(),
            ));
        }
        if self.policy.currency.trim().is_empty() {
            return Err(ConfigError::Validation("Currency cannot be empty".to_string()));
        }
        if self.policy.min_password_len < 1 {
            return Err(ConfigError::Validation(
                "Minimum password length must be at least 1".to_string(),
            ));
        }
        let page_sizes = [
            self.ui.requests_page_size,
            self.ui.employees_page_size,
            self.ui.history_page_size,
            self.ui.roster_page_size,
        ];
        if page_sizes.contains(&0) {
            return Err(ConfigError::Validation("Page sizes must be at least 1".to_string()));
        }
        if self.ui.processing_delay_ms > 10_000 {
            return Err(ConfigError::Validation(
                "Processing delay cannot exceed 10 seconds".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl UiConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = ProjectDirs::from("com", "Gianged", "smart-leave")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("smart-leave-data"));
        Self { data_dir }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            annual_allowance_days: 21,
            encashment_rate: 25_000,
            currency: "RWF".to_string(),
            max_encashment_days: 31,
            min_password_len: 6,
            soon_window_days: 14,
            upcoming_holiday_limit: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_dir: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: 0,
            requests_page_size: 8,
            employees_page_size: 5,
            history_page_size: 5,
            roster_page_size: 5,
        }
    }
}
