use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::language_utils::Locale;
use crate::processing::chinese::ChineseVariant;

/// Host configuration module
/// This module handles the configuration of the component hosting the
/// processing pipelines: where the descriptor lives, the log level, and
/// stage options that are not part of the descriptor itself.
/// Represents the host configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Path of the pipeline descriptor; the built-in descriptor is used when absent
    #[serde(default)]
    pub pipeline_file: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Chinese preprocessing options
    #[serde(default)]
    pub chinese: ChineseConfig,
}

/// Chinese preprocessing options
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChineseConfig {
    /// Locale tag of the variant input is normalized into
    #[serde(default = "default_internal_variant")]
    pub internal_variant: String,
}

impl Default for ChineseConfig {
    fn default() -> Self {
        Self {
            internal_variant: default_internal_variant(),
        }
    }
}

impl ChineseConfig {
    /// Resolve the configured internal variant
    pub fn variant(&self) -> Result<ChineseVariant> {
        let locale = Locale::parse(&self.internal_variant)?;
        ChineseVariant::from_locale(&locale)
            .ok_or_else(|| anyhow!("Internal variant {} is not a supported Chinese variant", locale))
    }
}

/// Log level
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

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_internal_variant() -> String {
    "zh-TW".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.chinese.variant()?;

        if let Some(path) = &self.pipeline_file {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("Pipeline file path must not be empty"));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            pipeline_file: None,
            log_level: LogLevel::default(),
            chinese: ChineseConfig::default(),
        }
    }
}
