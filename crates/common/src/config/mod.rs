//! Configuration management for paperdeck
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Data source configuration (viewer side)
    #[serde(default)]
    pub source: SourceConfig,

    /// Static server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Base of the data tree: an http(s) URL or a local directory path.
    /// `file://` URLs are rejected at the viewer boundary.
    #[serde(default = "default_base")]
    pub base: String,

    /// Fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding index.json and dates/*.json
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Optional directory with the static web shell, served at /
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json: bool,
}

// Default value functions
fn default_base() -> String { "http://127.0.0.1:8077/data".to_string() }
fn default_fetch_timeout() -> u64 { 10 }
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8077 }
fn default_data_dir() -> String { "data".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config").required(false))
            // Load local overrides
            .add_source(File::with_name("config.local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__SERVER__PORT=8081
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the fetch timeout as Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.source.fetch_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            server: ServerConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            static_dir: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
