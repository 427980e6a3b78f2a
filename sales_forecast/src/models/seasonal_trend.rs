//! Linear trend + yearly seasonality model on a monthly time axis

use crate::data::Observation;
use crate::error::{ForecastError, Result};
use crate::models::{FittedModel, ForecastModel, ModelPoint};
use crate::utils::{add_months, month_index};
use chrono::NaiveDate;
use forecast_math::{SeasonalTrend, SeasonalTrendFit, YearlySeasonality};
use tracing::{debug, warn};

/// Additive trend/seasonality model
#[derive(Debug, Clone)]
pub struct SeasonalTrendModel {
    /// Name of the model
    name: String,
    /// Numerical configuration
    model: SeasonalTrend,
}

/// Fitted trend/seasonality model
#[derive(Debug, Clone)]
pub struct FittedSeasonalTrend {
    /// Name of the model
    name: String,
    /// Estimated parameters
    fit: SeasonalTrendFit,
    /// Dates the model was fitted on
    history: Vec<NaiveDate>,
}

impl Default for SeasonalTrendModel {
    fn default() -> Self {
        Self::from_parts(SeasonalTrend::default())
    }
}

impl SeasonalTrendModel {
    /// Create a model with the given prediction interval width, e.g. `0.8`
    pub fn new(interval_width: f64) -> Result<Self> {
        Ok(Self::from_parts(SeasonalTrend::new(interval_width)?))
    }

    pub fn with_seasonality(self, seasonality: YearlySeasonality) -> Self {
        Self::from_parts(self.model.with_seasonality(seasonality))
    }

    pub fn with_fourier_order(self, order: usize) -> Self {
        Self::from_parts(self.model.with_fourier_order(order))
    }

    pub fn interval_width(&self) -> f64 {
        self.model.interval_width()
    }

    fn from_parts(model: SeasonalTrend) -> Self {
        Self {
            name: format!(
                "Seasonal Trend (interval={:.0}%, seasonality={:?})",
                model.interval_width() * 100.0,
                model.seasonality()
            ),
            model,
        }
    }
}

impl ForecastModel for SeasonalTrendModel {
    type Fitted = FittedSeasonalTrend;

    fn fit(&self, observations: &[Observation]) -> Result<Self::Fitted> {
        if observations.is_empty() {
            return Err(ForecastError::ForecastingError(
                "Empty time series data".to_string(),
            ));
        }

        if observations.windows(2).any(|w| w[0].date >= w[1].date) {
            return Err(ForecastError::ForecastingError(
                "Observations must be in strictly ascending date order".to_string(),
            ));
        }

        let times: Vec<f64> = observations
            .iter()
            .map(|o| month_index(o.date) as f64)
            .collect();
        let values: Vec<f64> = observations.iter().map(|o| o.value).collect();

        let fit = self.model.fit(&times, &values)?;
        if fit.seasonality_reduced() {
            warn!(
                observations = observations.len(),
                fourier_order = fit.fourier_order(),
                "history too short or too many months excluded for the requested seasonality; using a simpler model"
            );
        }
        debug!(
            observations = fit.observations(),
            fourier_order = fit.fourier_order(),
            residual_std = fit.residual_std(),
            interval_width = fit.interval_width(),
            "model fitted"
        );

        Ok(FittedSeasonalTrend {
            name: self.name.clone(),
            fit,
            history: observations.iter().map(|o| o.date).collect(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedSeasonalTrend {
    /// Fourier order the fit ended up using
    pub fn fourier_order(&self) -> usize {
        self.fit.fourier_order()
    }

    fn point(&self, date: NaiveDate) -> Result<ModelPoint> {
        let p = self.fit.predict(month_index(date) as f64)?;
        Ok(ModelPoint {
            date,
            predicted: p.yhat,
            lower_bound: p.lower,
            upper_bound: p.upper,
            trend: p.trend,
            yearly: p.seasonal,
        })
    }
}

impl FittedModel for FittedSeasonalTrend {
    fn predict(&self, horizon: usize) -> Result<Vec<ModelPoint>> {
        let last = match self.history.last() {
            Some(date) => *date,
            None => {
                return Err(ForecastError::ForecastingError(
                    "Model has no fitted history".to_string(),
                ))
            }
        };

        let mut points = Vec::with_capacity(self.history.len() + horizon);
        for &date in &self.history {
            points.push(self.point(date)?);
        }
        for step in 1..=horizon {
            points.push(self.point(add_months(last, step)?)?);
        }

        Ok(points)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
