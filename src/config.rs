// ⚙️ Run Configuration
//
// Resolution order for every setting:
// 1. Command-line flag (highest priority)
// 2. LODGING_* environment variable (handled by clap)
// 3. TOML config file passed with --config
// 4. Built-in default

use crate::charts::FigureOptions;
use crate::error::{PipelineError, Result};
use crate::loader::SourceFormat;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// DEFAULTS
// ============================================================================

pub const DEFAULT_INPUT: &str = "lodging_records.json";
pub const DEFAULT_OUTPUT: &str = "lodging_data_cleaned.csv";
pub const DEFAULT_FIGURES_DIR: &str = "figures";

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_figures_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FIGURES_DIR)
}

fn default_holiday_start() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2022, 10, 1)
}

fn default_holiday_end() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2022, 12, 31)
}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Stored record collection
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Input format; detected from the extension when absent
    #[serde(default)]
    pub input_format: Option<SourceFormat>,

    /// Cleaned flat file
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Directory receiving one JSON document per figure
    #[serde(default = "default_figures_dir")]
    pub figures_dir: PathBuf,

    /// Highlighted span on the revenue line plot
    #[serde(default = "default_holiday_start")]
    pub holiday_start: Option<NaiveDate>,

    #[serde(default = "default_holiday_end")]
    pub holiday_end: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: default_input(),
            input_format: None,
            output: default_output(),
            figures_dir: default_figures_dir(),
            holiday_start: default_holiday_start(),
            holiday_end: default_holiday_end(),
        }
    }
}

/// Values coming from flags or environment; `None` leaves the file/default value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub input_format: Option<SourceFormat>,
    pub output: Option<PathBuf>,
    pub figures_dir: Option<PathBuf>,
}

impl Config {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(text).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file
    pub fn from_file(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Config::from_toml_str(&text)
    }

    /// Load from an optional file, then apply overrides
    pub fn load(file: Option<&Path>, overrides: ConfigOverrides) -> Result<Config> {
        let config = match file {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        Ok(config.with_overrides(overrides))
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Config {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if overrides.input_format.is_some() {
            self.input_format = overrides.input_format;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(figures_dir) = overrides.figures_dir {
            self.figures_dir = figures_dir;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        match (self.holiday_start, self.holiday_end) {
            (Some(start), Some(end)) if start > end => Err(PipelineError::Config(format!(
                "holiday_start {} is after holiday_end {}",
                start, end
            ))),
            (Some(_), None) | (None, Some(_)) => Err(PipelineError::Config(
                "holiday_start and holiday_end must be set together".to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn figure_options(&self) -> FigureOptions {
        FigureOptions {
            holiday: self.holiday_start.zip(self.holiday_end),
        }
    }
}
