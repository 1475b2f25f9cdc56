//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::validator::{ValidatorTarget, FRAGMENT_FIELD, VALIDATOR_CHECK_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the page's anchors and data live
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    /// Origin the page was served from; `/mood-data` is resolved against it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_mood_data_path")]
    pub mood_data_path: String,

    /// `action` of the validator form
    #[serde(default = "default_validator_action")]
    pub validator_action: String,

    /// Name of the validator form's fragment input
    #[serde(default = "default_fragment_field")]
    pub fragment_field: String,

    /// `id` of the element hosting the chart
    #[serde(default = "default_chart_element_id")]
    pub chart_element_id: String,

    /// Request timeout; unset means wait indefinitely
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_mood_data_path() -> String {
    "/mood-data".to_string()
}

fn default_validator_action() -> String {
    VALIDATOR_CHECK_URL.to_string()
}

fn default_fragment_field() -> String {
    FRAGMENT_FIELD.to_string()
}

fn default_chart_element_id() -> String {
    "moodChart".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mood_data_path: default_mood_data_path(),
            validator_action: default_validator_action(),
            fragment_field: default_fragment_field(),
            chart_element_id: default_chart_element_id(),
            request_timeout_ms: None,
        }
    }
}

impl PageConfig {
    /// Absolute URL of the mood data endpoint
    pub fn mood_data_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.mood_data_path.trim_start_matches('/')
        )
    }

    pub fn validator_target(&self) -> ValidatorTarget {
        ValidatorTarget {
            form_action: self.validator_action.clone(),
            field_name: self.fragment_field.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("moodjar").join("config.toml")),
            Some(PathBuf::from("/etc/moodjar/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MOODJAR_BASE_URL") {
            self.page.base_url = url;
        }
        if let Ok(path) = std::env::var("MOODJAR_MOOD_DATA_PATH") {
            self.page.mood_data_path = path;
        }
        if let Ok(timeout) = std::env::var("MOODJAR_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.page.request_timeout_ms = Some(ms);
            }
        }

        if let Ok(level) = std::env::var("MOODJAR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MOODJAR_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default configuration file
pub fn default_config_toml() -> String {
    r#"# Moodjar Configuration
#
# Environment variables override these settings:
# - MOODJAR_BASE_URL
# - MOODJAR_MOOD_DATA_PATH
# - MOODJAR_TIMEOUT_MS
# - MOODJAR_LOG_LEVEL
# - MOODJAR_LOG_FORMAT

[page]
# Origin serving the page and its data
base_url = "http://localhost:5000"

# Endpoint returning {"mood": count, ...}
mood_data_path = "/mood-data"

# Validator form action and the input receiving the serialized page
validator_action = "https://validator.w3.org/check"
fragment_field = "fragment"

# Element hosting the doughnut chart
chart_element_id = "moodChart"

# Request timeout in milliseconds (unset waits indefinitely)
# request_timeout_ms = 10000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
