use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::transport::GEMINI_API_URL;

/// Main configuration structure for the Antakshari helper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub songs: SongsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub model: String,
    pub base_url: String,
    /// Name of the environment variable holding the API key. The key itself
    /// is read per request and never stored here.
    pub api_key_env: String,
    /// Transport-level request limit; none by default.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SongsConfig {
    /// How many songs to ask for per letter
    pub count: u32,
    /// Lyric lines per song
    pub lyric_lines: u32,
    /// Film industry the songs come from, e.g. "Bollywood"
    pub catalog: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            base_url: GEMINI_API_URL.to_string(),
            api_key_env: "API_KEY".to_string(),
            timeout_seconds: None,
        }
    }
}

impl Default for SongsConfig {
    fn default() -> Self {
        Self {
            count: 10,
            lyric_lines: 2,
            catalog: "Bollywood".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides
    /// ALWAYS returns a valid config - never fails
    pub fn load() -> Self {
        // Load environment variables from .env files
        let env_paths = ["../.env", ".env"];

        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }

        if !env_loaded {
            tracing::debug!("No .env file found - continuing with env vars only");
        }

        let config_path =
            env::var("ANTAKSHARI_CONFIG_PATH").unwrap_or_else(|_| "antakshari.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => Self::from_yaml(&contents).unwrap_or_else(|e| {
                    tracing::error!(
                        "Failed to parse config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }),
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::debug!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides(|key| env::var(key).ok());

        // Validate configuration - log warnings but don't fail
        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        let config = serde_yaml::from_str::<Config>(contents)?;
        tracing::info!("Loaded configuration from YAML");
        Ok(config)
    }

    /// Apply environment variable overrides, looking each key up through `lookup`
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(model) = lookup("ANTAKSHARI_MODEL") {
            self.gemini.model = model;
        }
        if let Some(base_url) = lookup("ANTAKSHARI_BASE_URL") {
            self.gemini.base_url = base_url;
        }
        if let Some(var) = lookup("ANTAKSHARI_API_KEY_ENV") {
            self.gemini.api_key_env = var;
        }
        if let Some(timeout) = lookup("ANTAKSHARI_TIMEOUT_SECONDS") {
            match timeout.parse() {
                Ok(secs) => self.gemini.timeout_seconds = Some(secs),
                Err(_) => tracing::warn!("Ignoring invalid ANTAKSHARI_TIMEOUT_SECONDS: {}", timeout),
            }
        }

        if let Some(count) = lookup("ANTAKSHARI_SONG_COUNT") {
            match count.parse() {
                Ok(n) => self.songs.count = n,
                Err(_) => tracing::warn!("Ignoring invalid ANTAKSHARI_SONG_COUNT: {}", count),
            }
        }
        if let Some(lines) = lookup("ANTAKSHARI_LYRIC_LINES") {
            match lines.parse() {
                Ok(n) => self.songs.lyric_lines = n,
                Err(_) => tracing::warn!("Ignoring invalid ANTAKSHARI_LYRIC_LINES: {}", lines),
            }
        }
        if let Some(catalog) = lookup("ANTAKSHARI_CATALOG") {
            self.songs.catalog = catalog;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.gemini.model.trim().is_empty() {
            return Err("Gemini model cannot be empty".into());
        }
        if self.gemini.api_key_env.trim().is_empty() {
            return Err("API key environment variable name cannot be empty".into());
        }
        if self.gemini.timeout_seconds == Some(0) {
            return Err("Request timeout cannot be 0 seconds".into());
        }
        if self.songs.count == 0 {
            return Err("Song count cannot be 0".into());
        }
        if self.songs.lyric_lines == 0 {
            return Err("Lyric lines cannot be 0".into());
        }
        Ok(())
    }

    /// Get the transport timeout as Duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.gemini.timeout_seconds.map(Duration::from_secs)
    }
}
