//! # Sales Forecast
//!
//! Monthly sales forecasting: paste a column of historical sales figures,
//! exclude outlier months, fit a trend + yearly seasonality model, and view
//! or export predicted sales with confidence bounds.
//!
//! ## Features
//!
//! - Month-indexed series built from whitespace-delimited pasted text
//! - Outlier-month exclusion, re-derived from the full series on every run
//! - Pluggable models behind [`ForecastModel`] / [`models::FittedModel`]
//! - Forecast table, JSON plot data and `.xlsx`/`.csv` export
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sales_forecast::{ForecastSession, OutlierSet, SeasonalTrendModel};
//!
//! let mut session = ForecastSession::new(SeasonalTrendModel::default());
//! let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! session.paste_values(start, 3, "100 110 120")?;
//!
//! let run = session.run_forecast(&OutlierSet::new(), 2)?;
//! assert_eq!(run.records().len(), 2);
//! # Ok::<(), sales_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod models;
pub mod plot;
pub mod report;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use crate::data::{DataLoader, Observation, OutlierSet, SalesSeries};
pub use crate::error::{ForecastError, Result};
pub use crate::export::{ExportFormat, ExportTable};
pub use crate::models::{ForecastModel, ForecastRecord, SeasonalTrendModel};
pub use crate::report::ForecastTable;
pub use crate::session::{ForecastRun, ForecastSession, SessionState};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
