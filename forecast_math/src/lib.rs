//! # Forecast Math
//!
//! Numerical core of the sales forecaster. The crate knows nothing about
//! calendars or sales: it fits an additive model
//!
//! ```text
//! y(t) = a + b * t' + Σ_k [c_k cos(2πkt/P) + d_k sin(2πkt/P)] + ε
//! ```
//!
//! by ordinary least squares and predicts with Gaussian prediction
//! intervals. `t` is any numeric time axis; `P` is the seasonal period on
//! that axis (12 for monthly data with a yearly cycle).

use thiserror::Error;

pub mod regression;
pub mod seasonal_trend;
pub mod seasonality;

pub use regression::LeastSquares;
pub use seasonal_trend::{SeasonalTrend, SeasonalTrendFit, SeasonalTrendPoint, YearlySeasonality};

/// Errors that can occur while fitting or evaluating a model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = MathError::InsufficientData("less than 2 observations".to_string());
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: less than 2 observations"
        );
    }
}
