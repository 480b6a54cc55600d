//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//!
//! The provider keys keep the names the dashboard has always used
//! (`API_ENDPOINT`, `PUBLIC_KEY`, `SECRET_KEY`); everything else is
//! prefixed with `INVESTY_`.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Mono API settings
#[derive(Clone, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// Widget key, safe to hand to the browser
    #[serde(default)]
    pub public_key: String,

    /// Server-side key, sent as `mono-sec-key` and never rendered
    #[serde(default)]
    pub secret_key: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_endpoint() -> String {
    "https://api.withmono.com".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            public_key: String::new(),
            secret_key: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_endpoint", &self.api_endpoint)
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8085
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Persisted store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("investy").to_string_lossy().to_string())
        .unwrap_or_else(|| "./investy_data".to_string())
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StoreSettings {
    /// Path of the JSON store file inside the data directory
    pub fn store_path(&self) -> PathBuf {
        expand_home(&self.data_dir).join("store.json")
    }
}

/// Expand a leading `~` to the home directory; other paths pass through
fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
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

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Runs before logging is set up, so a file that exists but cannot be
    /// read or parsed is returned as an error instead of being skipped.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("investy").join("config.toml")),
            Some(PathBuf::from("/etc/investy/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Ok(Self::load_first(&config_paths)?.unwrap_or_else(Self::from_env))
    }

    /// Load the first existing file in `paths`, with environment overrides
    fn load_first(paths: &[PathBuf]) -> Result<Option<Self>, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load_with_env(path).map(Some),
            None => Ok(None),
        }
    }

    /// Apply overrides from a key lookup (the process environment in practice)
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Provider overrides
        if let Some(endpoint) = lookup("API_ENDPOINT") {
            self.provider.api_endpoint = endpoint;
        }
        if let Some(key) = lookup("PUBLIC_KEY") {
            self.provider.public_key = key;
        }
        if let Some(key) = lookup("SECRET_KEY") {
            self.provider.secret_key = key;
        }
        if let Some(timeout) = lookup("INVESTY_REQUEST_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.provider.request_timeout_secs = t;
            }
        }

        // Server overrides
        if let Some(host) = lookup("INVESTY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("INVESTY_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Store overrides
        if let Some(data_dir) = lookup("INVESTY_DATA_DIR") {
            self.store.data_dir = data_dir;
        }

        // Logging overrides
        if let Some(level) = lookup("INVESTY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("INVESTY_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Warn about settings that will make every provider call fail
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.provider.secret_key.is_empty() {
            warnings.push("SECRET_KEY is not set; provider requests will be rejected".to_string());
        }
        if self.provider.public_key.is_empty() {
            warnings.push("PUBLIC_KEY is not set; the Mono Connect widget cannot open".to_string());
        }
        warnings
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
    format!(
        r#"# Investy Configuration
#
# Environment variables override these settings:
# - API_ENDPOINT, PUBLIC_KEY, SECRET_KEY
# - INVESTY_REQUEST_TIMEOUT_SECS
# - INVESTY_HOST, INVESTY_PORT
# - INVESTY_DATA_DIR
# - INVESTY_LOG_LEVEL, INVESTY_LOG_FORMAT

[provider]
# Mono API base URL
api_endpoint = "https://api.withmono.com"

# Mono Connect widget key (rendered into the dashboard page)
public_key = ""

# Mono secret key (stays on the server)
secret_key = ""

# Per-request timeout in seconds
request_timeout_secs = 30

[server]
host = "127.0.0.1"
port = 8085

[store]
# Directory holding store.json
data_dir = {data_dir:?}

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        data_dir = default_data_dir()
    )
}
