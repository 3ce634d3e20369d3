use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{QuickCartError, Result};

/// Top-level configuration for the QuickCart assistant.
///
/// Loaded from `~/.quickcart/config.toml` by default. Every section falls
/// back to its defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuickCartConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl QuickCartConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: QuickCartConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| QuickCartError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory holding the SQLite database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// HTTP port the API listens on.
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.quickcart/data".to_string(),
            log_level: "info".to_string(),
            port: 5000,
        }
    }
}

/// How the responder picks among an intent's replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSelection {
    /// Uniformly random reply.
    #[default]
    Random,
    /// Always the first listed reply.
    First,
}

/// Intent engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Path to an intent catalog TOML file. Empty means the built-in catalog.
    pub intents_path: String,
    /// Path to a language resource TOML file. Empty means built-in English.
    pub language_path: String,
    /// Maximum accepted message length in characters.
    pub max_message_length: usize,
    /// Reply selection mode.
    pub response_selection: ResponseSelection,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            intents_path: String::new(),
            language_path: String::new(),
            max_message_length: 2000,
            response_selection: ResponseSelection::Random,
        }
    }
}

/// Conversation log and product lookup limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Number of records returned by the history endpoint.
    pub history_limit: u32,
    /// Maximum products returned by a product search.
    pub product_search_limit: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            product_search_limit: 4,
        }
    }
}

/// HTTP API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}
