//! Forecasting model interface
//!
//! The session only ever talks to a model through [`ForecastModel`] and
//! [`FittedModel`], so the numerical method behind them can be swapped
//! without touching series construction, the table, plots or export.

use crate::data::Observation;
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Predicted sales with lower/upper confidence bounds for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// One row of model output, including its decomposition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Trend component of `predicted`
    pub trend: f64,
    /// Yearly seasonal component of `predicted`
    pub yearly: f64,
}

impl ModelPoint {
    /// Drop the decomposition
    pub fn record(&self) -> ForecastRecord {
        ForecastRecord {
            date: self.date,
            predicted: self.predicted,
            lower_bound: self.lower_bound,
            upper_bound: self.upper_bound,
        }
    }
}

/// A model estimated on a concrete history
pub trait FittedModel: Debug {
    /// Back-fit every fitted observation, in order, followed by `horizon`
    /// monthly predictions after the last fitted date.
    fn predict(&self, horizon: usize) -> Result<Vec<ModelPoint>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be fitted on a monthly series
pub trait ForecastModel: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedModel;

    /// Fit the model on observations sorted by date
    fn fit(&self, observations: &[Observation]) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod seasonal_trend;

pub use seasonal_trend::{FittedSeasonalTrend, SeasonalTrendModel};
