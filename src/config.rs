//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote metrics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_url")]
    pub base_url: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Per-request bound; the request is aborted once it elapses
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_remote_url() -> String {
    "http://3.111.196.92:8020".to_string()
}

fn default_username() -> String {
    "trial".to_string()
}

fn default_password() -> String {
    "assignment123".to_string()
}

fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_remote_url(),
            username: default_username(),
            password: default_password(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Which relational backend to read tables from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sqlite,
    Rest,
}

/// Relational store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,

    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,

    #[serde(default)]
    pub rest_url: String,

    #[serde(default)]
    pub rest_api_key: String,
}

fn default_backend() -> StoreBackend {
    StoreBackend::Sqlite
}

fn default_sqlite_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("salesboard").join("salesboard.db").to_string_lossy().to_string())
        .unwrap_or_else(|| "./salesboard_data/salesboard.db".to_string())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            sqlite_path: default_sqlite_path(),
            rest_url: String::new(),
            rest_api_key: String::new(),
        }
    }
}

/// JSON backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Session persistence and the demo account
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,
}

fn default_session_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("salesboard").join("auth.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./salesboard_data/auth.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
            username: default_username(),
            password: default_password(),
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

impl LoggingConfig {
    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` wins over the configured level when set. Output goes to
    /// stderr so that CLI output on stdout stays clean.
    pub fn init(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("salesboard={},tower_http=info", self.level))
        });

        let registry = tracing_subscriber::registry().with(filter);
        let result = if self.format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
        };

        if let Err(e) = result {
            eprintln!("Logging already initialized: {}", e);
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

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
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
            dirs::config_dir().map(|p| p.join("salesboard").join("config.toml")),
            Some(PathBuf::from("/etc/salesboard/config.toml")),
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

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Remote overrides
        if let Some(url) = var("SALESBOARD_API_URL") {
            self.remote.base_url = url;
        }
        if let Some(username) = var("SALESBOARD_API_USERNAME") {
            self.remote.username = username;
        }
        if let Some(password) = var("SALESBOARD_API_PASSWORD") {
            self.remote.password = password;
        }
        if let Some(timeout) = var("SALESBOARD_API_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.remote.timeout_ms = ms;
            }
        }

        // Store overrides
        if let Some(backend) = var("SALESBOARD_STORE_BACKEND") {
            match backend.to_lowercase().as_str() {
                "sqlite" => self.store.backend = StoreBackend::Sqlite,
                "rest" => self.store.backend = StoreBackend::Rest,
                other => tracing::warn!("Ignoring unknown store backend {:?}", other),
            }
        }
        if let Some(path) = var("SALESBOARD_SQLITE_PATH") {
            self.store.sqlite_path = path;
        }
        if let Some(url) = var("SALESBOARD_REST_URL") {
            self.store.rest_url = url;
        }
        if let Some(key) = var("SALESBOARD_REST_API_KEY") {
            self.store.rest_api_key = key;
        }

        // Server overrides
        if let Some(host) = var("SALESBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("SALESBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Some(path) = var("SALESBOARD_SESSION_PATH") {
            self.session.path = path;
        }

        // Logging overrides
        if let Some(level) = var("SALESBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SALESBOARD_LOG_FORMAT") {
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
///
/// Data paths are written out resolved for the current user.
pub fn generate_default_config() -> String {
    format!(
        r#"# Salesboard Configuration
#
# Environment variables override these settings:
# - SALESBOARD_API_URL, SALESBOARD_API_USERNAME, SALESBOARD_API_PASSWORD
# - SALESBOARD_API_TIMEOUT_MS
# - SALESBOARD_STORE_BACKEND, SALESBOARD_SQLITE_PATH
# - SALESBOARD_REST_URL, SALESBOARD_REST_API_KEY
# - SALESBOARD_HOST, SALESBOARD_PORT
# - SALESBOARD_SESSION_PATH
# - SALESBOARD_LOG_LEVEL, SALESBOARD_LOG_FORMAT

[remote]
# Metrics API base URL
base_url = "http://3.111.196.92:8020"

# Basic-auth credentials sent with every request
username = "trial"
password = "assignment123"

# Request timeout in milliseconds
timeout_ms = 15000

[store]
# Table backend: sqlite (local file) or rest (hosted PostgREST-style API)
backend = "sqlite"

# SQLite database file
sqlite_path = {sqlite_path}

# Hosted backend URL and API key (backend = "rest")
rest_url = ""
rest_api_key = ""

[server]
host = "0.0.0.0"
port = 8086

[session]
# Where the sign-in marker is kept
path = {session_path}

# Demo account
username = "trial"
password = "assignment123"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        sqlite_path = toml_string(default_sqlite_path()),
        session_path = toml_string(default_session_path()),
    )
}

fn toml_string(value: String) -> String {
    toml::Value::String(value).to_string()
}
