//! Configuration loading and typed config structures.
//!
//! The configuration lives in an optional `zookeepr-config.yaml` in the
//! working directory. Every field has a default, so an absent file or a
//! partial one is fine. Environment variables are applied on top:
//!
//! - `PORT` overrides `server.port`
//! - `ZOOKEEPR_DATA_DIR` moves both collection files into that directory

use std::path::{Path, PathBuf};

use serde::Deserialize;
use zookeepr_api::ServerConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}: {reason}")]
    Env {
        /// The environment variable.
        var: &'static str,
        /// The raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZookeeprConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ListenConfig,

    /// Collection file locations.
    #[serde(default)]
    pub data: DataConfig,

    /// Directory the front-end is served from.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ZookeeprConfig {
    fn default() -> Self {
        Self {
            server: ListenConfig::default(),
            data: DataConfig::default(),
            public_dir: default_public_dir(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ZookeeprConfig {
    /// Load configuration from a YAML file at the given path, then apply
    /// environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for when no file exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply overrides looked up through `lookup`.
    ///
    /// Taking the lookup as a function keeps tests off the process
    /// environment.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("PORT") {
            self.server.port = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Env {
                    var: "PORT",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(dir) = lookup("ZOOKEEPR_DATA_DIR") {
            let dir = PathBuf::from(dir);
            self.data.animals_path = dir.join(file_name_or(&self.data.animals_path, "animals.json"));
            self.data.zookeepers_path =
                dir.join(file_name_or(&self.data.zookeepers_path, "zookeepers.json"));
        }
        Ok(())
    }

    /// The listener settings in the form the API server takes.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where each collection is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// The animals collection file.
    #[serde(default = "default_animals_path")]
    pub animals_path: PathBuf,

    /// The zookeepers collection file.
    #[serde(default = "default_zookeepers_path")]
    pub zookeepers_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            animals_path: default_animals_path(),
            zookeepers_path: default_zookeepers_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn file_name_or(path: &Path, fallback: &str) -> PathBuf {
    path.file_name()
        .map_or_else(|| PathBuf::from(fallback), PathBuf::from)
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3001
}

fn default_animals_path() -> PathBuf {
    PathBuf::from("data/animals.json")
}

fn default_zookeepers_path() -> PathBuf {
    PathBuf::from("data/zookeepers.json")
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_log_level() -> String {
    "info".to_owned()
}
