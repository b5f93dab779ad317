use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Report outputs the CLI can write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Full analytics report as JSON
    Json,
    /// Human-readable Markdown report
    Markdown,
    /// Raw node table
    Csv,
}

impl ReportFormat {
    /// File name written into the output directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Json => "analytics_report.json",
            ReportFormat::Markdown => "analytics_report.md",
            ReportFormat::Csv => "nodes.csv",
        }
    }
}

/// Top-level configuration that mirrors the YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    #[serde(default = "default_formats")]
    pub formats: Vec<ReportFormat>,
    /// Rows in the Markdown "top performing nodes" list
    #[serde(default = "default_top_nodes")]
    pub top_nodes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Delay between snapshot refreshes, e.g. "30s"
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
    /// 0 runs until interrupted
    #[serde(default)]
    pub max_iterations: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("analytics_output")
}

fn default_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Csv]
}

fn default_top_nodes() -> usize {
    5
}

fn default_interval() -> Duration {
    Duration::from_secs(30)
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            formats: default_formats(),
            top_nodes: default_top_nodes(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            max_iterations: 0,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid output configuration: {0}")]
    InvalidOutput(String),
    #[error("Invalid watch configuration: {0}")]
    InvalidWatch(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.general.log_level.trim().is_empty() {
            return Err(ValidationError::InvalidGeneral(
                "log_level cannot be empty".to_string(),
            ));
        }

        if self.output.directory.as_os_str().is_empty() {
            return Err(ValidationError::InvalidOutput(
                "directory cannot be empty".to_string(),
            ));
        }
        if self.output.formats.is_empty() {
            return Err(ValidationError::InvalidOutput(
                "at least one report format is required".to_string(),
            ));
        }
        if self.output.top_nodes == 0 {
            return Err(ValidationError::InvalidOutput(
                "top_nodes must be at least 1".to_string(),
            ));
        }

        if self.watch.interval.is_zero() {
            return Err(ValidationError::InvalidWatch(
                "interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load and validate configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    let file = File::open(config_path)
        .with_context(|| format!("Failed to open config file {}", config_path.display()))?;
    let config: Config = serde_yaml::from_reader(file)
        .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

    config.validate()?;
    Ok(config)
}

/// CLI arguments that override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub output: Option<PathBuf>,
    pub formats: Option<Vec<ReportFormat>>,
    pub interval: Option<Duration>,
    pub iterations: Option<u64>,
}

/// Apply CLI overrides on top of a loaded configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(ref level) = overrides.log_level {
        config.general.log_level = level.clone();
    }
    if let Some(ref output) = overrides.output {
        config.output.directory = output.clone();
    }
    if let Some(ref formats) = overrides.formats {
        if !formats.is_empty() {
            config.output.formats = formats.clone();
        }
    }
    if let Some(interval) = overrides.interval {
        config.watch.interval = interval;
    }
    if let Some(iterations) = overrides.iterations {
        config.watch.max_iterations = iterations;
    }

    // Re-validate after applying overrides
    config.validate()?;
    Ok(())
}

/// Parse a refresh interval such as "30s", "5m" or "1m30s"
///
/// Same grammar as `watch.interval` in the YAML file.
pub fn parse_interval(value: &str) -> Result<Duration, String> {
    humantime_serde::re::humantime::parse_duration(value.trim())
        .map_err(|e| format!("Invalid interval '{}': {}", value, e))
}
