//! TOML-based configuration for Schemer.
//!
//! Supports a config file (schemer.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [connections.production]
//! driver = "mssql"
//! connection_string = "${PROD_DB_CONNECTION_STRING}"
//!
//! [connections.dev]
//! driver = "duckdb"
//! connection_string = "./data/dev.duckdb"
//!
//! [worker]
//! path = "./schemer-worker"
//!
//! [worker.pool]
//! max_idle_conns = 5
//! max_open_conns = 10
//! conn_max_lifetime = "5m"
//! conn_max_idle_time = "1m"
//!
//! [metadata]
//! cache_enabled = true
//! default_pattern = "%"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::connection::Driver;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Unsupported driver: {0}")]
    UnsupportedDriver(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Named database connections.
    #[serde(default)]
    pub connections: HashMap<String, ConnectionSettings>,

    /// Worker configuration.
    #[serde(default)]
    pub worker: WorkerSettings,

    /// Metadata configuration.
    #[serde(default)]
    pub metadata: MetadataSettings,
}

/// Connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// Database driver (mssql, duckdb).
    pub driver: String,

    /// Connection string (supports ${ENV_VAR} expansion).
    pub connection_string: String,
}

impl ConnectionSettings {
    /// Get the driver type.
    pub fn driver_type(&self) -> Result<Driver, SettingsError> {
        Driver::from_str(&self.driver)
            .map_err(|_| SettingsError::UnsupportedDriver(self.driver.clone()))
    }

    /// Get the connection string with environment variables expanded.
    pub fn resolved_connection_string(&self) -> Result<String, SettingsError> {
        expand_env_vars(&self.connection_string)
    }
}

/// Worker configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerSettings {
    /// Path to the worker binary.
    pub path: Option<String>,

    /// Connection pool settings.
    pub pool: PoolSettings,
}

/// Connection pool settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Maximum number of idle connections per pool.
    pub max_idle_conns: u32,

    /// Maximum number of open connections per pool.
    pub max_open_conns: u32,

    /// Maximum connection lifetime (e.g., "5m", "1h").
    pub conn_max_lifetime: String,

    /// Maximum connection idle time (e.g., "1m", "30s").
    pub conn_max_idle_time: String,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_idle_conns: 5,
            max_open_conns: 10,
            conn_max_lifetime: "5m".to_string(),
            conn_max_idle_time: "1m".to_string(),
        }
    }
}

impl PoolSettings {
    /// Convert to worker command-line arguments.
    pub fn to_worker_args(&self) -> Vec<String> {
        vec![
            "-pool".to_string(),
            format!("-pool-max-idle={}", self.max_idle_conns),
            format!("-pool-max-open={}", self.max_open_conns),
            format!("-pool-conn-lifetime={}", self.conn_max_lifetime),
            format!("-pool-conn-idle={}", self.conn_max_idle_time),
        ]
    }
}

/// Metadata configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetadataSettings {
    /// Enable crawl-result caching in the web layer.
    pub cache_enabled: bool,

    /// Schema pattern used when a request does not specify one.
    pub default_pattern: String,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            default_pattern: "%".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SCHEMER_CONFIG`
    /// 2. `./schemer.toml`
    /// 3. `~/.config/schemer/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        // Check environment variable first
        if let Ok(path) = env::var("SCHEMER_CONFIG") {
            return Self::from_file(&path);
        }

        // Check local directory
        let local_config = PathBuf::from("schemer.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        // Check user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("schemer").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    /// Get a connection by name.
    pub fn get_connection(&self, name: &str) -> Result<&ConnectionSettings, SettingsError> {
        self.connections
            .get(name)
            .ok_or_else(|| SettingsError::ConnectionNotFound(name.to_string()))
    }

    /// Get the default connection ("default" if it exists, else the first
    /// one defined).
    pub fn default_connection(&self) -> Option<(&str, &ConnectionSettings)> {
        if let Some(conn) = self.connections.get("default") {
            return Some(("default", conn));
        }
        self.connections.iter().next().map(|(k, v)| (k.as_str(), v))
    }

    /// Get the configured worker binary path, if any.
    pub fn worker_path(&self) -> Option<PathBuf> {
        let path = self.worker.path.as_ref()?;
        let expanded = expand_env_vars(path).ok()?;
        Some(PathBuf::from(expanded))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' {
            // Check for ${VAR} or $VAR
            if chars.peek() == Some(&'{') {
                chars.next(); // consume '{'
                let mut var_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }
                let value = env::var(&var_name)
                    .map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
                result.push_str(&value);
            } else {
                // $VAR (ends at non-alphanumeric/underscore)
                let mut var_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        var_name.push(chars.next().unwrap());
                    } else {
                        break;
                    }
                }
                if var_name.is_empty() {
                    // Just a lone $, keep it
                    result.push('$');
                } else {
                    let value = env::var(&var_name)
                        .map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
                    result.push_str(&value);
                }
            }
        } else {
            result.push(c);
        }
    }

    Ok(result)
}
