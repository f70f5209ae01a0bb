use anyhow::{anyhow, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

use crate::theme::DEFAULT_THEME;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Theme applied when the command line does not name one
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Optional JSON theme catalog replacing the built-in one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where and how converted files are written
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct OutputConfig {
    // @field: Target directory, next to each input when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    // @field: Replace existing outputs instead of skipping them
    #[serde(default)]
    pub force_overwrite: bool,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(anyhow!("Invalid log level: {}", s)),
        }
    }
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.theme.trim().is_empty() {
            return Err(anyhow!("Theme name must not be empty"));
        }

        if let Some(path) = &self.catalog_path {
            if !path.is_file() {
                return Err(anyhow!("Theme catalog file does not exist: {:?}", path));
            }
        }

        Ok(())
    }

    /// Theme to request from the catalog
    pub fn theme_name(&self) -> &str {
        self.theme.trim()
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            theme: default_theme(),
            catalog_path: None,
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
