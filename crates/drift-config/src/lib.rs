//! Configuration for the drift background.
//!
//! The file lives at `<config_dir>/drift/config.toml` (platform specific, see
//! [`directories::ProjectDirs`]). Every field is optional:
//!
//! ```toml
//! frame_rate = 30
//! labels = ["AAPL", "TSLA", "NVDA"]
//! show_help = true
//!
//! [log]
//! level = "debug"
//! file = "/tmp/drift.log"
//! ```
//!
//! Scene sizes and animation coefficients are fixed and not part of the file.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use drift_core::DEFAULT_SYMBOLS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted frame rate.
pub const MIN_FRAME_RATE: u32 = 1;

/// Highest accepted frame rate.
pub const MAX_FRAME_RATE: u32 = 240;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive passed to the subscriber (e.g. `info`, `drift_scene=debug`).
    pub level: String,
    /// Log destination. Nothing is logged without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target frames per second.
    pub frame_rate: u32,
    /// Symbols used for the floating labels.
    pub labels: Vec<String>,
    /// Show the key hint bar on the last row.
    pub show_help: bool,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            labels: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            show_help: true,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "drift")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML text and normalize the result.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(contents)?;
        Ok(config.normalized())
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Clamp the frame rate and drop blank labels.
    pub fn normalized(mut self) -> Self {
        self.frame_rate = self.frame_rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE);
        self.labels = self
            .labels
            .into_iter()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect();
        self
    }
}
