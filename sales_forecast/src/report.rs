//! Forecast table for terminal display

use crate::models::ForecastRecord;
use crate::utils::{format_date, round_sales};
use std::fmt;

/// Column headings, in display order
pub const HEADERS: [&str; 4] = ["Date", "Predicted Sales", "Lower Bound", "Upper Bound"];

/// A display row; numbers are rounded to whole units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub date: String,
    pub predicted: i64,
    pub lower_bound: i64,
    pub upper_bound: i64,
}

impl From<&ForecastRecord> for TableRow {
    fn from(record: &ForecastRecord) -> Self {
        Self {
            date: format_date(record.date),
            predicted: round_sales(record.predicted),
            lower_bound: round_sales(record.lower_bound),
            upper_bound: round_sales(record.upper_bound),
        }
    }
}

impl TableRow {
    fn cells(&self) -> [String; 4] {
        [
            self.date.clone(),
            self.predicted.to_string(),
            self.lower_bound.to_string(),
            self.upper_bound.to_string(),
        ]
    }
}

/// Forecast rows for the future horizon only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastTable {
    rows: Vec<TableRow>,
}

impl ForecastTable {
    pub fn from_records(records: &[ForecastRecord]) -> Self {
        Self {
            rows: records.iter().map(TableRow::from).collect(),
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for ForecastTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<[String; 4]> = self.rows.iter().map(TableRow::cells).collect();

        let mut widths = HEADERS.map(str::len);
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        // Date left-aligned, numbers right-aligned
        let line = |f: &mut fmt::Formatter<'_>, row: [&str; 4]| -> fmt::Result {
            write!(f, "{:<w$}", row[0], w = widths[0])?;
            for (cell, width) in row[1..].iter().zip(&widths[1..]) {
                write!(f, " | {:>w$}", cell, w = *width)?;
            }
            writeln!(f)
        };

        line(f, HEADERS)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &cells {
            line(f, [row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()])?;
        }
        Ok(())
    }
}
