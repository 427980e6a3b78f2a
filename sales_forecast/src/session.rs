//! Forecast session: the single owner of the sales series and the last run
//!
//! ```text
//! Empty --paste--> SeriesReady --run--> Forecasted --run--> Forecasted ...
//!                       ^                    |
//!                       +------paste---------+
//! ```
//!
//! Failed actions never change the session. A successful run replaces the
//! previous one; nothing is merged or kept.

use crate::data::{validate_periods, Observation, OutlierSet, SalesSeries};
use crate::error::{ForecastError, Result};
use crate::models::{FittedModel, ForecastModel, ForecastRecord, ModelPoint};
use crate::utils::{format_date, months_between};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    /// No series has been pasted yet
    Empty,
    /// A series is loaded but not forecast
    SeriesReady,
    /// The last run succeeded and its output is available
    Forecasted,
}

/// Output of one successful fit + predict cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRun {
    records: Vec<ForecastRecord>,
    model_output: Vec<ModelPoint>,
    outliers: OutlierSet,
    fitted_observations: usize,
    future_periods: usize,
    model_name: String,
}

impl ForecastRun {
    /// Forecast rows for exactly the requested future months
    pub fn records(&self) -> &[ForecastRecord] {
        &self.records
    }

    /// Everything the model produced: back-fitted history and the horizon
    pub fn model_output(&self) -> &[ModelPoint] {
        &self.model_output
    }

    /// Outlier months excluded from this fit
    pub fn outliers(&self) -> &OutlierSet {
        &self.outliers
    }

    /// Number of observations the model was fitted on
    pub fn fitted_observations(&self) -> usize {
        self.fitted_observations
    }

    pub fn future_periods(&self) -> usize {
        self.future_periods
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Dates of the forecast rows
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Fit `model` on `series` minus the outlier months and forecast
/// `future_periods` months past the end of the full series.
///
/// The fit set is always re-derived from the unfiltered series. If the
/// outlier months trim the end of the history, the model's horizon is
/// extended so the returned rows still start the month after the last
/// historical month.
pub fn run_forecast<M: ForecastModel>(
    model: &M,
    series: &SalesSeries,
    outliers: &OutlierSet,
    future_periods: usize,
) -> Result<ForecastRun> {
    validate_periods(future_periods, "future months")?;

    let last_history = series
        .last_date()
        .ok_or_else(|| ForecastError::validation("No sales values have been pasted yet."))?;

    let filtered: Vec<Observation> = series.exclude_outliers(outliers);
    let last_fitted = match filtered.last() {
        Some(observation) => observation.date,
        None => {
            return Err(ForecastError::validation(format!(
                "Every observation falls in an excluded month ({}); nothing left to fit.",
                outliers
            )))
        }
    };

    let gap = months_between(last_fitted, last_history).max(0) as usize;
    let horizon = future_periods + gap;

    let fitted = model.fit(&filtered)?;
    let model_output = fitted.predict(horizon)?;

    if model_output.len() < future_periods {
        return Err(ForecastError::ForecastingError(format!(
            "Model returned {} rows, expected at least {}",
            model_output.len(),
            future_periods
        )));
    }

    let records: Vec<ForecastRecord> = model_output[model_output.len() - future_periods..]
        .iter()
        .map(ModelPoint::record)
        .collect();

    info!(
        model = fitted.name(),
        fitted = filtered.len(),
        excluded = series.len() - filtered.len(),
        first = %format_date(records[0].date),
        periods = future_periods,
        "forecast complete"
    );

    Ok(ForecastRun {
        records,
        model_output,
        outliers: outliers.clone(),
        fitted_observations: filtered.len(),
        future_periods,
        model_name: fitted.name().to_string(),
    })
}

/// Holds the pasted series and the last successful forecast
#[derive(Debug, Clone)]
pub struct ForecastSession<M: ForecastModel> {
    model: M,
    series: Option<SalesSeries>,
    run: Option<ForecastRun>,
}

impl<M: ForecastModel> ForecastSession<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            series: None,
            run: None,
        }
    }

    pub fn state(&self) -> SessionState {
        match (&self.series, &self.run) {
            (None, _) => SessionState::Empty,
            (Some(_), None) => SessionState::SeriesReady,
            (Some(_), Some(_)) => SessionState::Forecasted,
        }
    }

    /// Build a series from pasted text and make it current.
    ///
    /// Any earlier forecast is discarded because it describes the old series.
    pub fn paste_values(
        &mut self,
        start: NaiveDate,
        past_periods: usize,
        pasted: &str,
    ) -> Result<&SalesSeries> {
        let series = SalesSeries::from_pasted(start, past_periods, pasted)?;
        Ok(self.load_series(series))
    }

    /// Replace the current series
    pub fn load_series(&mut self, series: SalesSeries) -> &SalesSeries {
        info!(observations = series.len(), "series loaded");
        self.run = None;
        self.series.insert(series)
    }

    pub fn series(&self) -> Result<&SalesSeries> {
        self.series
            .as_ref()
            .ok_or_else(|| ForecastError::validation("No sales values have been pasted yet."))
    }

    /// Fit and forecast; on success the result replaces the previous run
    pub fn run_forecast(
        &mut self,
        outliers: &OutlierSet,
        future_periods: usize,
    ) -> Result<&ForecastRun> {
        let run = run_forecast(&self.model, self.series()?, outliers, future_periods)?;
        Ok(self.run.insert(run))
    }

    /// The last successful run
    pub fn last_run(&self) -> Result<&ForecastRun> {
        self.run
            .as_ref()
            .ok_or_else(|| ForecastError::validation("No forecast has been run yet."))
    }

    /// Forecast rows of the last successful run
    pub fn forecast_records(&self) -> Result<&[ForecastRecord]> {
        Ok(self.last_run()?.records())
    }
}
