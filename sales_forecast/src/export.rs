//! Spreadsheet export: history rows followed by forecast rows on one sheet

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::session::ForecastRun;
use crate::utils::round_sales;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Columns of the combined sheet
pub const COLUMNS: [&str; 5] = [
    "Date",
    "Sales",
    "Predicted Sales",
    "Lower Bound",
    "Upper Bound",
];

/// One row of the combined sheet. History rows fill `sales`; forecast rows
/// fill the prediction columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Sales")]
    pub sales: Option<i64>,
    #[serde(rename = "Predicted Sales")]
    pub predicted: Option<i64>,
    #[serde(rename = "Lower Bound")]
    pub lower_bound: Option<i64>,
    #[serde(rename = "Upper Bound")]
    pub upper_bound: Option<i64>,
}

/// History + forecast, every number rounded to an integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    rows: Vec<ExportRow>,
    history_rows: usize,
}

impl ExportTable {
    pub fn new(series: &SalesSeries, run: &ForecastRun) -> Self {
        let history = series.observations().iter().map(|o| ExportRow {
            date: o.date,
            sales: Some(round_sales(o.value)),
            predicted: None,
            lower_bound: None,
            upper_bound: None,
        });

        let forecast = run.records().iter().map(|r| ExportRow {
            date: r.date,
            sales: None,
            predicted: Some(round_sales(r.predicted)),
            lower_bound: Some(round_sales(r.lower_bound)),
            upper_bound: Some(round_sales(r.upper_bound)),
        });

        Self {
            rows: history.chain(forecast).collect(),
            history_rows: series.len(),
        }
    }

    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    pub fn history_rows(&self) -> &[ExportRow] {
        &self.rows[..self.history_rows]
    }

    pub fn forecast_rows(&self) -> &[ExportRow] {
        &self.rows[self.history_rows..]
    }
}

/// Output format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xlsx") => Ok(ExportFormat::Xlsx),
            Some("csv") => Ok(ExportFormat::Csv),
            _ => Err(ForecastError::validation(format!(
                "Unsupported export file '{}': use a .xlsx or .csv extension",
                path.display()
            ))),
        }
    }
}

/// Write `table` to `path` in the format implied by its extension
pub fn export<P: AsRef<Path>>(table: &ExportTable, path: P) -> Result<ExportFormat> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path)?;

    match format {
        ExportFormat::Xlsx => write_xlsx(table, path)?,
        ExportFormat::Csv => write_csv(table, path)?,
    }

    info!(
        path = %path.display(),
        history = table.history_rows().len(),
        forecast = table.forecast_rows().len(),
        "forecast exported"
    );
    Ok(format)
}

fn write_xlsx(table: &ExportTable, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let worksheet = workbook.add_worksheet();
    worksheet.set_column_width(0, 12)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, row) in table.rows().iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_date_with_format(r, 0, &row.date, &date_format)?;

        let numbers = [row.sales, row.predicted, row.lower_bound, row.upper_bound];
        for (offset, value) in numbers.iter().enumerate() {
            if let Some(v) = value {
                worksheet.write_number(r, (offset + 1) as u16, *v as f64)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_csv(table: &ExportTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
