//! Plot data for the forecast and components charts
//!
//! Rendering is left to whatever consumes the JSON; these structures carry
//! exactly what the charts show.

use crate::data::SalesSeries;
use crate::error::Result;
use crate::session::ForecastRun;
use crate::utils::round_sales;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// A historical observation as drawn on the forecast chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub value: f64,
    /// Month was in the outlier set and not used for fitting
    pub excluded: bool,
}

/// Fitted line with its confidence band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Label drawn above a forecast point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub date: NaiveDate,
    pub value: f64,
    pub label: String,
}

/// History + forecast with confidence band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub history: Vec<HistoryPoint>,
    pub band: Vec<BandPoint>,
    pub annotations: Vec<Annotation>,
}

impl ForecastPlot {
    pub fn new(series: &SalesSeries, run: &ForecastRun) -> Self {
        let history = series
            .observations()
            .iter()
            .map(|o| HistoryPoint {
                date: o.date,
                value: o.value,
                excluded: run.outliers().contains(o.date.month()),
            })
            .collect();

        let band = run
            .model_output()
            .iter()
            .map(|p| BandPoint {
                date: p.date,
                predicted: p.predicted,
                lower: p.lower_bound,
                upper: p.upper_bound,
            })
            .collect();

        let annotations = run
            .records()
            .iter()
            .map(|r| Annotation {
                date: r.date,
                value: r.predicted,
                label: round_sales(r.predicted).to_string(),
            })
            .collect();

        Self {
            title: "Sales Forecast".to_string(),
            x_label: "Date".to_string(),
            y_label: "Sales".to_string(),
            history,
            band,
            annotations,
        }
    }
}

/// A (date, value) pair of one component series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Trend and yearly seasonality of the fitted model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentsPlot {
    pub trend: Vec<ComponentPoint>,
    pub yearly: Vec<ComponentPoint>,
}

impl ComponentsPlot {
    pub fn new(run: &ForecastRun) -> Self {
        let output = run.model_output();
        Self {
            trend: output
                .iter()
                .map(|p| ComponentPoint {
                    date: p.date,
                    value: p.trend,
                })
                .collect(),
            yearly: output
                .iter()
                .map(|p| ComponentPoint {
                    date: p.date,
                    value: p.yearly,
                })
                .collect(),
        }
    }
}

/// Write any plot document as pretty-printed JSON
pub fn write_json<T: Serialize, P: AsRef<Path>>(plot: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, plot)?;
    info!(path = %path.display(), "plot data written");
    Ok(())
}
