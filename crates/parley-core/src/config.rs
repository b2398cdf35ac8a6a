use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ParleyError, Result};

/// Top-level configuration for the Parley application.
///
/// Loaded from `~/.parley/config.toml` by default. Each section corresponds
/// to one collaborator or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub dialogue: DialogueConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl ParleyConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ParleyConfig = toml::from_str(&content)?;
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
            toml::to_string_pretty(self).map_err(|e| ParleyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Dialogue backend endpoint and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Base URL of the dialogue gateway functions.
    pub endpoint_url: String,
    /// API key forwarded in the `X-Client-Id` header.
    pub api_key: String,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "http://127.0.0.1:8080".to_string(),
            api_key: String::new(),
        }
    }
}

/// Translation backend endpoint, credentials, and the pivot locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub endpoint_url: String,
    pub api_key: String,
    /// The language the dialogue backend's NLU operates in. Text in any
    /// other locale is translated to/from this one at the gateway boundary.
    pub pivot_lang: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "http://127.0.0.1:8081".to_string(),
            api_key: String::new(),
            pivot_lang: "en".to_string(),
        }
    }
}

/// Delivery retry policy for the chat orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Number of retries after the first attempt. The default of 1 gives one
    /// attempt reusing the cached session id and one more on a fresh session.
    pub max_attempt: u32,
    /// Fixed wait between attempts, in milliseconds.
    pub retry_backoff_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_attempt: 1,
            retry_backoff_ms: 1000,
        }
    }
}

/// Gateway HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3030 }
    }
}
