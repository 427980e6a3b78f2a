//! Additive linear-trend + Fourier-seasonality model
//!
//! ```text
//! trend(t)    = a + b * (t - centre) / scale
//! seasonal(t) = Σ_{k=1..K} c_k cos(2πkt/P) + d_k sin(2πkt/P)
//! yhat(t)     = trend(t) + seasonal(t)
//! ```
//!
//! Prediction intervals are `yhat ± z · se(t)` where `z` is the normal
//! quantile for the configured interval width and `se` is the OLS standard
//! error of a new observation.

use crate::regression::LeastSquares;
use crate::seasonality::{fourier_terms, max_fourier_order};
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::BTreeSet;

/// Whether the seasonal component is estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum YearlySeasonality {
    /// Only when the history covers at least two full seasonal periods
    #[default]
    Auto,
    /// Always, as far as the number of observations allows
    Enabled,
    /// Trend only
    Disabled,
}

/// Model configuration. Call [`SeasonalTrend::fit`] to estimate it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalTrend {
    seasonality: YearlySeasonality,
    fourier_order: usize,
    period: f64,
    interval_width: f64,
}

impl Default for SeasonalTrend {
    fn default() -> Self {
        Self {
            seasonality: YearlySeasonality::Auto,
            fourier_order: 3,
            period: 12.0,
            interval_width: 0.8,
        }
    }
}

impl SeasonalTrend {
    /// Create a model with the given prediction interval width, e.g. `0.8`
    pub fn new(interval_width: f64) -> Result<Self> {
        if !(interval_width > 0.0 && interval_width < 1.0) {
            return Err(MathError::InvalidInput(format!(
                "Interval width must be between 0 and 1 (exclusive), got {}",
                interval_width
            )));
        }

        Ok(Self {
            interval_width,
            ..Self::default()
        })
    }

    pub fn with_seasonality(mut self, seasonality: YearlySeasonality) -> Self {
        self.seasonality = seasonality;
        self
    }

    /// Requested Fourier order; capped at fit time by the period and the
    /// amount of data.
    pub fn with_fourier_order(mut self, order: usize) -> Self {
        self.fourier_order = order;
        self
    }

    pub fn interval_width(&self) -> f64 {
        self.interval_width
    }

    pub fn seasonality(&self) -> YearlySeasonality {
        self.seasonality
    }

    /// Fit the model to `values` observed at `times`
    pub fn fit(&self, times: &[f64], values: &[f64]) -> Result<SeasonalTrendFit> {
        if times.len() != values.len() {
            return Err(MathError::InvalidInput(format!(
                "Got {} times but {} values",
                times.len(),
                values.len()
            )));
        }

        if times.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Model needs at least 2 observations, got {}",
                times.len()
            )));
        }

        if times.iter().chain(values).any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Times and values must be finite numbers".to_string(),
            ));
        }

        let t_min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let t_max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = t_max - t_min;
        if span <= 0.0 {
            return Err(MathError::InsufficientData(
                "Observations must cover more than one point in time".to_string(),
            ));
        }

        let requested = match self.seasonality {
            YearlySeasonality::Disabled => 0,
            YearlySeasonality::Enabled => self.fourier_order,
            YearlySeasonality::Auto if span + 1.0 >= 2.0 * self.period => self.fourier_order,
            YearlySeasonality::Auto => 0,
        };

        // 2K Fourier columns plus the intercept need 2K + 1 distinct phases
        let phases = distinct_phases(times, self.period);
        let mut order = requested
            .min(max_fourier_order(self.period))
            .min(phases.saturating_sub(1) / 2);
        // Keep at least one residual degree of freedom
        while order > 0 && 2 + 2 * order >= times.len() {
            order -= 1;
        }

        let centre = times.iter().sum::<f64>() / times.len() as f64;
        let (layout, regression) = loop {
            let layout = Layout {
                centre,
                scale: span,
                period: self.period,
                order,
            };
            let design: Vec<Vec<f64>> = times.iter().map(|&t| layout.row(t)).collect();
            match LeastSquares::fit(&design, values) {
                Ok(regression) => break (layout, regression),
                Err(MathError::CalculationError(_)) if order > 0 => order -= 1,
                Err(err) => return Err(err),
            }
        };

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| MathError::CalculationError(format!("Normal distribution: {}", e)))?;
        let z = normal.inverse_cdf(0.5 + self.interval_width / 2.0);

        Ok(SeasonalTrendFit {
            regression,
            layout,
            z,
            interval_width: self.interval_width,
            requested_order: requested,
        })
    }
}

/// Number of distinct positions within the period among `times`
fn distinct_phases(times: &[f64], period: f64) -> usize {
    let phases: BTreeSet<i64> = times
        .iter()
        .map(|t| (t.rem_euclid(period) * 1e6).round() as i64)
        .collect();
    phases.len()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    centre: f64,
    scale: f64,
    period: f64,
    order: usize,
}

impl Layout {
    fn row(&self, t: f64) -> Vec<f64> {
        let mut row = Vec::with_capacity(2 + 2 * self.order);
        row.push(1.0);
        row.push((t - self.centre) / self.scale);
        row.extend(fourier_terms(t, self.period, self.order));
        row
    }
}

/// One model evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalTrendPoint {
    pub yhat: f64,
    pub lower: f64,
    pub upper: f64,
    pub trend: f64,
    pub seasonal: f64,
}

/// A fitted [`SeasonalTrend`] model
#[derive(Debug, Clone)]
pub struct SeasonalTrendFit {
    regression: LeastSquares,
    layout: Layout,
    z: f64,
    interval_width: f64,
    requested_order: usize,
}

impl SeasonalTrendFit {
    /// Evaluate the model at time `t`
    pub fn predict(&self, t: f64) -> Result<SeasonalTrendPoint> {
        if !t.is_finite() {
            return Err(MathError::InvalidInput(format!(
                "Cannot predict at non-finite time {}",
                t
            )));
        }

        let row = self.layout.row(t);
        let coefficients = self.regression.coefficients();

        let trend = coefficients[0] + coefficients[1] * row[1];
        let yhat = self.regression.predict(&row)?;
        let seasonal = yhat - trend;
        let margin = self.z * self.regression.prediction_std_error(&row)?;

        Ok(SeasonalTrendPoint {
            yhat,
            lower: yhat - margin,
            upper: yhat + margin,
            trend,
            seasonal,
        })
    }

    /// Fourier order actually used
    pub fn fourier_order(&self) -> usize {
        self.layout.order
    }

    /// True when seasonality was wanted but had to be reduced for lack of data
    pub fn seasonality_reduced(&self) -> bool {
        self.layout.order < self.requested_order
    }

    pub fn interval_width(&self) -> f64 {
        self.interval_width
    }

    /// Residual standard deviation of the fit
    pub fn residual_std(&self) -> f64 {
        self.regression.residual_variance().sqrt()
    }

    pub fn observations(&self) -> usize {
        self.regression.observations()
    }
}
