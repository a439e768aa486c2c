//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::client::ClientConfig;
use crate::store::{StoreBackend, StoreConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File this config was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" for development, "json" for production
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

        let mut config = Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
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

    /// Load from the first default location that exists, or environment only.
    ///
    /// A file that exists but cannot be read or parsed is an error rather
    /// than a silent fallback to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("checkin").join("config.toml")),
            Some(PathBuf::from("/etc/checkin/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Load `path` if given, otherwise the default locations
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Self::load_default(),
        }
    }

    /// Log where the config came from; call once logging is up
    pub fn log_source(&self) {
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {}", path.display()),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Store overrides
        if let Some(data_dir) = var("CHECKIN_DATA_DIR") {
            self.store.data_dir = PathBuf::from(data_dir);
        }
        if let Some(backend) = var("CHECKIN_STORE_BACKEND") {
            match backend.parse::<StoreBackend>() {
                Ok(b) => self.store.backend = b,
                Err(e) => tracing::warn!("Ignoring CHECKIN_STORE_BACKEND: {}", e),
            }
        }

        // API overrides
        if let Some(host) = var("CHECKIN_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("CHECKIN_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Client overrides
        if let Some(url) = var("CHECKIN_API_URL") {
            self.client.api_url = url;
        }

        // Logging overrides
        if let Some(level) = var("CHECKIN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CHECKIN_LOG_FORMAT") {
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

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Checkin Configuration
#
# Environment variables override these settings:
# - CHECKIN_DATA_DIR
# - CHECKIN_STORE_BACKEND
# - CHECKIN_API_HOST
# - CHECKIN_API_PORT
# - CHECKIN_API_URL
# - CHECKIN_LOG_LEVEL
# - CHECKIN_LOG_FORMAT

[store]
# Directory for store files (default: the platform data dir, e.g. ~/.local/share/checkin)
# data_dir = "/var/lib/checkin"

# Backend: log (append-only record file) or sqlite
backend = "log"

# Fsync policy for the log backend: every_write, batched or none
sync_mode = "every_write"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8083

# Allowed CORS origins (empty allows any)
cors_origins = ["http://localhost:5173", "http://127.0.0.1:5173"]

# Maximum request body size (bytes)
max_body_size = 65536

[client]
# Where the front-end sends entries
api_url = "http://localhost:8083"

# Request timeout in milliseconds
request_timeout_ms = 10000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
