//! Application configuration
//!
//! Loaded from a TOML file; every field has a default so a partial (or
//! missing) file is fine. Command-line flags override what is loaded here.

use crate::data::OutlierSet;
use crate::error::{ForecastError, Result};
use crate::models::SeasonalTrendModel;
use chrono::NaiveDate;
use forecast_math::YearlySeasonality;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Series and horizon defaults
    #[serde(default)]
    pub input: InputSettings,

    /// Forecasting model settings
    #[serde(default)]
    pub model: ModelSettings,

    /// Where results are written
    #[serde(default)]
    pub output: OutputSettings,
}

/// Defaults for the values a user enters before pasting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Month of the first pasted value
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Number of past months to use
    #[serde(default = "default_periods")]
    pub past_periods: usize,

    /// Number of future months to forecast
    #[serde(default = "default_periods")]
    pub future_periods: usize,

    /// Months (1 = January) to exclude from fitting
    #[serde(default)]
    pub outlier_months: OutlierSet,
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}
fn default_periods() -> usize {
    12
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            past_periods: default_periods(),
            future_periods: default_periods(),
            outlier_months: OutlierSet::new(),
        }
    }
}

/// Forecasting model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Width of the prediction interval, between 0 and 1
    #[serde(default = "default_interval_width")]
    pub interval_width: f64,

    /// auto, enabled or disabled
    #[serde(default)]
    pub yearly_seasonality: YearlySeasonality,

    /// Number of Fourier pairs for the yearly component
    #[serde(default = "default_fourier_order")]
    pub fourier_order: usize,
}

fn default_interval_width() -> f64 {
    0.8
}
fn default_fourier_order() -> usize {
    3
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            interval_width: default_interval_width(),
            yearly_seasonality: YearlySeasonality::default(),
            fourier_order: default_fourier_order(),
        }
    }
}

impl ModelSettings {
    /// Build the model these settings describe
    pub fn build(&self) -> Result<SeasonalTrendModel> {
        Ok(SeasonalTrendModel::new(self.interval_width)?
            .with_seasonality(self.yearly_seasonality)
            .with_fourier_order(self.fourier_order))
    }
}

/// Output destinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Spreadsheet written by export (.xlsx or .csv)
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,

    /// Forecast chart data, written when set
    #[serde(default)]
    pub plot_path: Option<PathBuf>,

    /// Components chart data, written when set
    #[serde(default)]
    pub components_path: Option<PathBuf>,
}

fn default_export_path() -> PathBuf {
    PathBuf::from("forecasted_sales.xlsx")
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
            plot_path: None,
            components_path: None,
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Load from `path` when given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
