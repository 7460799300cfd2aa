//! Configuration management for csvsh
//!
//! This module handles loading, parsing, and managing configuration from various sources:
//! - Configuration files (TOML format)
//! - Environment variables
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables (`MOUNT_PATH`, `MONGODB_HOST`, `MONGODB_PORT`)
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Environment variable naming the workspace root directory.
pub const MOUNT_PATH_ENV: &str = "MOUNT_PATH";

/// Environment variable naming the MongoDB host.
pub const MONGODB_HOST_ENV: &str = "MONGODB_HOST";

/// Environment variable naming the MongoDB port.
pub const MONGODB_PORT_ENV: &str = "MONGODB_PORT";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Workspace configuration
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Connection configuration
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Completion configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Workspace (browsing root) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Directory the session starts browsing in
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

/// Connection-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// MongoDB host name
    #[serde(default = "default_host")]
    pub host: String,

    /// MongoDB port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Open an interactive database shell after a successful import
    #[serde(default = "default_open_shell")]
    pub open_shell: bool,

    /// External database shell binary
    #[serde(default = "default_shell_binary")]
    pub shell_binary: String,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Indentation width for JSON output
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Show the save progress indicator
    #[serde(default = "default_progress")]
    pub progress: bool,
}

/// Completion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Completion routing mode
    #[serde(default = "default_completion_mode")]
    pub mode: CompletionMode,
}

/// Completion routing mode options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionMode {
    /// Route between command keywords and filesystem paths based on the
    /// typed input (the consolidated behavior).
    Unified,

    /// Always suggest filesystem paths, never command keywords.
    PathOnly,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_root() -> PathBuf {
    PathBuf::from("/host")
}

fn default_host() -> String {
    "mongodb".to_string()
}

fn default_port() -> u16 {
    27017
}

fn default_timeout() -> u64 {
    30
}

fn default_open_shell() -> bool {
    true
}

fn default_shell_binary() -> String {
    "mongosh".to_string()
}

fn default_indent() -> usize {
    4
}

fn default_color_output() -> bool {
    true
}

fn default_progress() -> bool {
    true
}

fn default_completion_mode() -> CompletionMode {
    CompletionMode::Unified
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".csvsh_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout: default_timeout(),
            open_shell: default_open_shell(),
            shell_binary: default_shell_binary(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            color_output: default_color_output(),
            progress: default_progress(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            mode: default_completion_mode(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.to_path_buf()))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration from file and environment with proper precedence
    ///
    /// An explicit `path` must exist; the default config file is optional.
    /// Environment variables override file values.
    ///
    /// # Arguments
    /// * `path` - Explicit config file path, or None for the default location
    ///
    /// # Returns
    /// * `Result<Config>` - Merged configuration or error
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_with(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply environment overrides from an arbitrary lookup function.
    ///
    /// Split out from [`Config::load`] so tests can inject variables without
    /// touching the process environment.
    ///
    /// # Arguments
    /// * `lookup` - Function resolving an environment variable name to a value
    ///
    /// # Returns
    /// * `Result<()>` - Ok, or a `ConfigError` for unparseable values
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(MOUNT_PATH_ENV) {
            self.workspace.root = PathBuf::from(root);
        }

        if let Some(host) = lookup(MONGODB_HOST_ENV) {
            self.connection.host = host;
        }

        if let Some(port) = lookup(MONGODB_PORT_ENV) {
            self.connection.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: MONGODB_PORT_ENV.to_string(),
                value: port,
            })?;
        }

        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".csvsh")
            .join("config.toml")
    }

    /// Render the effective configuration as TOML
    ///
    /// # Returns
    /// * `Result<String>` - TOML document or error
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.connection.host.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "connection.host".to_string(),
                value: self.connection.host.clone(),
            }
            .into());
        }
        if self.display.indent > 16 {
            return Err(ConfigError::InvalidValue {
                field: "display.indent".to_string(),
                value: self.display.indent.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Get connection timeout as Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection.timeout)
    }
}

impl ConnectionConfig {
    /// Build the MongoDB connection URI from host and port
    ///
    /// # Returns
    /// * `String` - Connection URI in the form `mongodb://host:port`
    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}", self.host, self.port)
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.workspace.root, PathBuf::from("/host"));
        assert_eq!(config.connection.host, "mongodb");
        assert_eq!(config.connection.port, 27017);
        assert_eq!(config.display.indent, 4);
        assert_eq!(config.completion.mode, CompletionMode::Unified);
        assert!(config.connection.open_shell);
    }

    #[test]
    fn test_connection_uri() {
        let config = ConnectionConfig::default();
        assert_eq!(config.uri(), "mongodb://mongodb:27017");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_with(|name| match name {
                MOUNT_PATH_ENV => Some("/mnt/data".to_string()),
                MONGODB_HOST_ENV => Some("db.internal".to_string()),
                MONGODB_PORT_ENV => Some("27018".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.workspace.root, PathBuf::from("/mnt/data"));
        assert_eq!(config.connection.host, "db.internal");
        assert_eq!(config.connection.port, 27018);
    }

    #[test]
    fn test_env_overrides_absent() {
        let mut config = Config::default();
        config.apply_env_with(|_| None).unwrap();
        assert_eq!(config.workspace.root, PathBuf::from("/host"));
        assert_eq!(config.connection.host, "mongodb");
    }

    #[test]
    fn test_invalid_port_env() {
        let mut config = Config::default();
        let result = config.apply_env_with(|name| match name {
            MONGODB_PORT_ENV => Some("not-a-port".to_string()),
            _ => None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [workspace]
            root = "/srv/files"

            [connection]
            host = "localhost"
            port = 27017
            open_shell = false

            [completion]
            mode = "path-only"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.workspace.root, PathBuf::from("/srv/files"));
        assert_eq!(config.connection.host, "localhost");
        assert!(!config.connection.open_shell);
        assert_eq!(config.completion.mode, CompletionMode::PathOnly);
        // Unspecified sections fall back to defaults
        assert_eq!(config.display.indent, 4);
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut config = Config::default();
        config.connection.host.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_connection_timeout() {
        let config = Config::default();
        assert_eq!(config.connection_timeout(), Duration::from_secs(30));
    }
}
