//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Candidate database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("interviewer")
                .join("candidates.db")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./interviewer_data/candidates.db".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// PDF export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_chromium_path")]
    pub chromium_path: String,

    #[serde(default = "default_export_timeout")]
    pub timeout_secs: u64,
}

fn default_chromium_path() -> String {
    "chromium".to_string()
}

fn default_export_timeout() -> u64 {
    60
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            chromium_path: default_chromium_path(),
            timeout_secs: default_export_timeout(),
        }
    }
}

impl ExportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
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

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
        config.expand_paths();
        Ok(config)
    }

    /// Resolve a leading `~` in path settings against the home directory
    fn expand_paths(&mut self) {
        self.storage.database_path = expand_home(&self.storage.database_path);
        self.export.chromium_path = expand_home(&self.export.chromium_path);
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
            dirs::config_dir().map(|p| p.join("interviewer").join("config.toml")),
            Some(PathBuf::from("/etc/interviewer/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
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
        if let Some(path) = var("INTERVIEWER_DATABASE") {
            self.storage.database_path = path;
        }

        if let Some(host) = var("INTERVIEWER_HOST") {
            self.api.host = host;
        }
        // PORT is honoured for container platforms; the prefixed name wins
        for key in ["PORT", "INTERVIEWER_PORT"] {
            if let Some(port) = var(key).and_then(|p| p.parse().ok()) {
                self.api.port = port;
            }
        }

        if let Some(chromium) = var("INTERVIEWER_CHROMIUM") {
            self.export.chromium_path = chromium;
        }

        if let Some(level) = var("INTERVIEWER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("INTERVIEWER_LOG_FORMAT") {
            self.logging.format = format;
        }

        self.expand_paths();
    }
}

fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') || rest.starts_with(std::path::MAIN_SEPARATOR) => {
            &rest[1..]
        }
        _ => return path.to_string(),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home.to_string_lossy().to_string(),
        Some(home) => home.join(rest).to_string_lossy().to_string(),
        None => path.to_string(),
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
    r#"# Interviewer Configuration
#
# Environment variables override these settings:
# - INTERVIEWER_DATABASE
# - INTERVIEWER_HOST
# - INTERVIEWER_PORT (or PORT)
# - INTERVIEWER_CHROMIUM
# - INTERVIEWER_LOG_LEVEL
# - INTERVIEWER_LOG_FORMAT

[storage]
# SQLite database holding the candidate records
database_path = "~/.local/share/interviewer/candidates.db"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 5000

# Request timeout in seconds
request_timeout_secs = 30

[export]
# Chromium (or Chrome) binary used to print reports to PDF
chromium_path = "chromium"

# Give up on a report after this many seconds
timeout_secs = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.api.addr(), "0.0.0.0:5000");
        assert_eq!(config.export.chromium_path, "chromium");
        assert_eq!(config.export.timeout(), Duration::from_secs(60));
        assert!(config.storage.database_path.ends_with("candidates.db"));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_home_prefix_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        let config = Config::parse(&generate_default_config()).unwrap();
        assert!(!config.storage.database_path.starts_with('~'));
        assert_eq!(
            PathBuf::from(&config.storage.database_path),
            home.join(".local/share/interviewer/candidates.db")
        );

        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "INTERVIEWER_DATABASE" => Some("~/interviews.db".to_string()),
            _ => None,
        });
        assert_eq!(
            PathBuf::from(&config.storage.database_path),
            home.join("interviews.db")
        );
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        assert_eq!(expand_home("/srv/candidates.db"), "/srv/candidates.db");
        assert_eq!(expand_home("./data/candidates.db"), "./data/candidates.db");
        assert_eq!(expand_home("~bob/candidates.db"), "~bob/candidates.db");
        assert_eq!(expand_home("chromium"), "chromium");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse("[api]\nport = 8090\n").unwrap();
        assert_eq!(config.api.port, 8090);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "7000"),
            ("INTERVIEWER_PORT", "7100"),
            ("INTERVIEWER_DATABASE", "/tmp/x.db"),
            ("INTERVIEWER_CHROMIUM", "/usr/bin/google-chrome"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.port, 7100);
        assert_eq!(config.storage.database_path, "/tmp/x.db");
        assert_eq!(config.export.chromium_path, "/usr/bin/google-chrome");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/interviewer.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
