//! Configuration file support for fieldbox.
//!
//! A dataset may carry a `fieldbox.json` next to its template. It is only
//! ever read; every value has a default, so a missing file or a partial one
//! are both fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_FILENAME, DEFAULT_DISPLAY_WIDTH, DEFAULT_HISTORY_LIMIT, MIN_HISTORY_LIMIT,
};
use crate::error::SetupError;
use crate::keybindings::KeyBindings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindings,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    /// Width images are resized to for display (aspect ratio kept)
    pub display_width: u32,

    /// Number of undo snapshots kept per image
    pub history_limit: usize,

    /// Image file extensions picked up from the images directory
    pub image_extensions: Vec<String>,

    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            display_width: DEFAULT_DISPLAY_WIDTH,
            history_limit: DEFAULT_HISTORY_LIMIT,
            image_extensions: vec!["jpg".to_string()],
            log_level: LogLevel::default(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
            keybindings: KeyBindings::default(),
        }
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        if config.preferences.display_width == 0 {
            return Err(ConfigError::Invalid("display_width must be positive".into()));
        }
        if config.preferences.history_limit < MIN_HISTORY_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "history_limit must be at least {}",
                MIN_HISTORY_LIMIT
            )));
        }

        Ok(config)
    }

    /// Load the configuration of a dataset, falling back to defaults when
    /// the dataset has no configuration file.
    pub fn load_for_dataset(dataset_dir: &Path) -> Result<Self, SetupError> {
        let path = dataset_dir.join(CONFIG_FILENAME);
        if !path.is_file() {
            log::debug!("No config file found at {:?}, using defaults", path);
            return Ok(Self::new());
        }

        let json = std::fs::read_to_string(&path)?;
        let config = Self::from_json(&json)
            .map_err(|source| SetupError::InvalidConfig { path: path.clone(), source })?;
        for (key, a, b) in config.keybindings.conflicts() {
            log::warn!("Key {:?} is bound to both '{}' and '{}'", key, a, b);
        }
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A value is out of range
    #[error("Invalid value: {0}")]
    Invalid(String),
}
