//! # Sales Forecaster
//!
//! Umbrella crate for the workspace: re-exports the forecasting model
//! (`forecast_math`) and the series builder / presentation layer
//! (`sales_forecast`).
//!
//! ## Example
//!
//! ```
//! use sales_forecaster_workspace::sales::{ForecastSession, OutlierSet, SeasonalTrendModel};
//! use chrono::NaiveDate;
//!
//! let mut session = ForecastSession::new(SeasonalTrendModel::default());
//! let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! session.paste_values(start, 3, "100 110 120").unwrap();
//!
//! let outliers = OutlierSet::from_months([2]).unwrap();
//! let run = session.run_forecast(&outliers, 2).unwrap();
//! assert_eq!(run.fitted_observations(), 2);
//! ```

pub use forecast_math as math;
pub use sales_forecast as sales;

/// Workspace version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
