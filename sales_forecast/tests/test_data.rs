use chrono::{Datelike, NaiveDate};
use pretty_assertions::assert_eq;
use rstest::rstest;
use sales_forecast::data::{
    exclude_outliers, parse_pasted_values, parse_start_date, DataLoader, Observation, OutlierSet,
    SalesSeries,
};
use sales_forecast::ForecastError;
use std::io::Write;
use tempfile::NamedTempFile;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn obs(y: i32, m: u32, value: f64) -> Observation {
    Observation {
        date: ymd(y, m, 1),
        value,
    }
}

#[test]
fn test_construct_series_example() {
    let series = SalesSeries::from_pasted(ymd(2023, 1, 1), 3, "100 110 120").unwrap();

    assert_eq!(
        series.observations(),
        &[obs(2023, 1, 100.0), obs(2023, 2, 110.0), obs(2023, 3, 120.0)]
    );
    assert_eq!(series.first_date(), Some(ymd(2023, 1, 1)));
    assert_eq!(series.last_date(), Some(ymd(2023, 3, 1)));
}

#[rstest]
#[case(1)]
#[case(12)]
#[case(13)]
#[case(60)]
fn test_series_is_monthly_and_ascending(#[case] periods: usize) {
    let text: Vec<String> = (0..periods).map(|i| format!("{}.5", i)).collect();
    let series = SalesSeries::from_pasted(ymd(2021, 11, 1), periods, &text.join("\n")).unwrap();

    assert_eq!(series.len(), periods);
    for pair in series.observations().windows(2) {
        let (a, b) = (pair[0].date, pair[1].date);
        assert!(a < b);
        assert_eq!(b.day(), 1);
        let months = (b.year() - a.year()) * 12 + b.month() as i32 - a.month() as i32;
        assert_eq!(months, 1);
    }
}

#[rstest]
#[case(3, "100 110")]
#[case(3, "100 110 120 130")]
#[case(1, "")]
#[case(2, "   \n\t ")]
fn test_count_mismatch_is_validation_error(#[case] periods: usize, #[case] text: &str) {
    let err = SalesSeries::from_pasted(ymd(2023, 1, 1), periods, text).unwrap_err();
    assert!(err.is_validation(), "unexpected error: {}", err);
}

#[test]
fn test_mismatch_message_reports_counts() {
    let err = SalesSeries::from_pasted(ymd(2023, 1, 1), 3, "1 2").unwrap_err();
    assert!(err.to_string().contains("(2)"));
    assert!(err.to_string().contains("(3)"));
}

#[test]
fn test_zero_periods_rejected() {
    let err = SalesSeries::from_pasted(ymd(2023, 1, 1), 0, "").unwrap_err();
    assert!(matches!(err, ForecastError::ValidationError(_)));
}

#[rstest]
#[case("100 abc 120")]
#[case("100 NaN 120")]
#[case("100 inf 120")]
#[case("1,000 2 3")]
fn test_non_numeric_rejected(#[case] text: &str) {
    let err = SalesSeries::from_pasted(ymd(2023, 1, 1), 3, text).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_parse_pasted_values_handles_spreadsheet_columns() {
    let values = parse_pasted_values("100\r\n110.5\r\n-3\r\n1e3\r\n").unwrap();
    assert_eq!(values, vec![100.0, 110.5, -3.0, 1000.0]);
}

#[test]
fn test_start_date_rolls_to_next_month_start() {
    let series = SalesSeries::from_pasted(ymd(2023, 1, 15), 2, "1 2").unwrap();
    assert_eq!(series.first_date(), Some(ymd(2023, 2, 1)));
}

#[test]
fn test_parse_start_date_formats() {
    assert_eq!(parse_start_date("2023-01-01").unwrap(), ymd(2023, 1, 1));
    assert_eq!(parse_start_date(" 2023-07 ").unwrap(), ymd(2023, 7, 1));
    assert!(parse_start_date("01/02/2023").unwrap_err().is_validation());
    assert!(parse_start_date("2023-13-01").is_err());
}

#[test]
fn test_exclude_outliers_removes_months_and_keeps_order() {
    let series = SalesSeries::from_pasted(
        ymd(2022, 11, 1),
        6,
        "1 2 3 4 5 6", // Nov Dec Jan Feb Mar Apr
    )
    .unwrap();
    let outliers = OutlierSet::from_months([12, 2]).unwrap();

    let filtered = series.exclude_outliers(&outliers);
    let values: Vec<f64> = filtered.iter().map(|o| o.value).collect();

    assert_eq!(values, vec![1.0, 3.0, 5.0, 6.0]);
    assert!(filtered.iter().all(|o| !outliers.contains(o.date.month())));
    // The stored series is untouched
    assert_eq!(series.len(), 6);
}

#[test]
fn test_empty_outlier_set_is_identity() {
    let series = SalesSeries::from_pasted(ymd(2023, 1, 1), 4, "4 3 2 1").unwrap();
    let filtered = exclude_outliers(series.observations(), &OutlierSet::new());
    assert_eq!(filtered.as_slice(), series.observations());
}

#[test]
fn test_outlier_set_validation_and_display() {
    assert!(OutlierSet::from_months([0]).unwrap_err().is_validation());
    assert!(OutlierSet::from_months([13]).is_err());

    let set = OutlierSet::from_months([7, 2, 7]).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.months().collect::<Vec<_>>(), vec![2, 7]);
    assert_eq!(set.to_string(), "2, 7");
    assert_eq!(OutlierSet::new().to_string(), "none");
}

#[test]
fn test_data_loader_reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "100").unwrap();
    writeln!(file, "110").unwrap();
    writeln!(file, "120").unwrap();

    let path = file.path().to_str().unwrap();
    let series = DataLoader::load_series(path, ymd(2023, 1, 1), 3).unwrap();
    assert_eq!(series.values(), vec![100.0, 110.0, 120.0]);
}

#[test]
fn test_data_loader_missing_file() {
    let result = DataLoader::read_text("/nonexistent/sales.txt");
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}
