//! Historical sales series: construction from pasted text and outlier filtering

use crate::error::{ForecastError, Result};
use crate::utils::{format_date, month_sequence, month_start_on_or_after};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A single historical (month, sales) data point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// First day of the month the value belongs to
    pub date: NaiveDate,
    /// Sales figure for that month
    pub value: f64,
}

/// Calendar months (1 = January) excluded from model fitting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct OutlierSet {
    months: BTreeSet<u32>,
}

impl OutlierSet {
    /// An empty set; filtering with it keeps every observation
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from month numbers, rejecting anything outside 1..=12
    pub fn from_months<I: IntoIterator<Item = u32>>(months: I) -> Result<Self> {
        let mut set = BTreeSet::new();
        for month in months {
            if !(1..=12).contains(&month) {
                return Err(ForecastError::validation(format!(
                    "Outlier month must be between 1 and 12, got {}",
                    month
                )));
            }
            set.insert(month);
        }
        Ok(Self { months: set })
    }

    pub fn contains(&self, month: u32) -> bool {
        self.months.contains(&month)
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Selected months in ascending order
    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        self.months.iter().copied()
    }
}

impl TryFrom<Vec<u32>> for OutlierSet {
    type Error = ForecastError;

    fn try_from(months: Vec<u32>) -> Result<Self> {
        Self::from_months(months)
    }
}

impl From<OutlierSet> for Vec<u32> {
    fn from(set: OutlierSet) -> Self {
        set.months.into_iter().collect()
    }
}

impl fmt::Display for OutlierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months.is_empty() {
            return write!(f, "none");
        }
        let months: Vec<String> = self.months.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", months.join(", "))
    }
}

/// Ordered monthly sales history, one observation per period
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesSeries {
    observations: Vec<Observation>,
}

impl SalesSeries {
    /// Build a series from whitespace-delimited pasted text.
    ///
    /// One month start is generated per period beginning at `start` (rolled
    /// forward to the 1st if needed). Fails when `past_periods` is zero, any
    /// token is not a finite number, or the token count differs from
    /// `past_periods`.
    pub fn from_pasted(start: NaiveDate, past_periods: usize, pasted: &str) -> Result<Self> {
        validate_periods(past_periods, "past months")?;
        let values = parse_pasted_values(pasted)?;
        Self::from_values(start, past_periods, values)
    }

    /// Build a series from already-parsed values
    pub fn from_values(start: NaiveDate, past_periods: usize, values: Vec<f64>) -> Result<Self> {
        validate_periods(past_periods, "past months")?;

        if values.len() != past_periods {
            return Err(ForecastError::validation(format!(
                "Number of sales values pasted ({}) does not match the number of past months ({}).",
                values.len(),
                past_periods
            )));
        }

        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(ForecastError::validation(format!(
                "Sales values must be finite numbers, got {}",
                bad
            )));
        }

        let dates = month_sequence(month_start_on_or_after(start)?, past_periods)?;
        debug!(
            first = %format_date(dates[0]),
            last = %format_date(dates[dates.len() - 1]),
            "generated dates"
        );
        debug!(?values, "pasted values");

        let observations = dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| Observation { date, value })
            .collect();

        Ok(Self { observations })
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Fresh copy without the outlier months; the stored series is untouched
    pub fn exclude_outliers(&self, outliers: &OutlierSet) -> Vec<Observation> {
        exclude_outliers(&self.observations, outliers)
    }
}

/// Keep only observations whose calendar month is not in `outliers`, in order
pub fn exclude_outliers(observations: &[Observation], outliers: &OutlierSet) -> Vec<Observation> {
    observations
        .iter()
        .filter(|o| !outliers.contains(o.date.month()))
        .copied()
        .collect()
}

/// Parse whitespace-delimited decimal numbers
pub fn parse_pasted_values(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ForecastError::validation(format!(
                "Failed to parse values: '{}' is not a number",
                token
            ))),
        })
        .collect()
}

/// Parse a start date given as `YYYY-MM-DD` or `YYYY-MM`
pub fn parse_start_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d"))
        .map_err(|_| {
            ForecastError::validation(format!(
                "Invalid start date '{}', expected YYYY-MM-DD",
                text
            ))
        })
}

/// Reject a zero period count
pub fn validate_periods(count: usize, what: &str) -> Result<usize> {
    if count == 0 {
        return Err(ForecastError::validation(format!(
            "Number of {} must be a positive integer.",
            what
        )));
    }
    Ok(count)
}

/// Source of the pasted sales column
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Read pasted text from a file, or from stdin when `source` is `-`
    pub fn read_text(source: &str) -> Result<String> {
        if source == "-" {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            return Ok(buffer);
        }
        Self::from_file(source)
    }

    /// Read pasted text from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Read and build a series in one step
    pub fn load_series(source: &str, start: NaiveDate, past_periods: usize) -> Result<SalesSeries> {
        let text = Self::read_text(source)?;
        SalesSeries::from_pasted(start, past_periods, &text)
    }
}
