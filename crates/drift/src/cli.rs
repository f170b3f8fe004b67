//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use drift_config::{Config, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "drift")]
#[command(version, about = "An animated particle field for your terminal")]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Target frames per second
    #[arg(long, value_name = "FPS")]
    pub fps: Option<u32>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Hide the key hint bar
    #[arg(long)]
    pub no_help: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// Config file to read, and to write with `--write-config`.
    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::default_path(),
        }
    }

    /// Layer command line overrides on top of the file configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(fps) = self.fps {
            config.frame_rate = fps;
        }
        if let Some(file) = &self.log_file {
            config.log.file = Some(file.clone());
        }
        if self.verbose {
            config.log.level = "debug".to_string();
        }
        if self.no_help {
            config.show_help = false;
        }
        config.normalized()
    }
}
