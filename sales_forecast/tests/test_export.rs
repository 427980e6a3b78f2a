use chrono::{Datelike, NaiveDate};
use pretty_assertions::assert_eq;
use sales_forecast::export::{export, ExportFormat, ExportRow, ExportTable, COLUMNS};
use sales_forecast::{ForecastSession, OutlierSet, SeasonalTrendModel};
use std::path::Path;
use tempfile::tempdir;

fn example_table() -> ExportTable {
    let mut session = ForecastSession::new(SeasonalTrendModel::default());
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    session.paste_values(start, 3, "100.4 110.6 120").unwrap();
    session.run_forecast(&OutlierSet::new(), 2).unwrap();

    ExportTable::new(session.series().unwrap(), session.last_run().unwrap())
}

#[test]
fn test_table_has_history_then_forecast_rows() {
    let table = example_table();

    assert_eq!(table.rows().len(), 5);
    assert_eq!(table.history_rows().len(), 3);
    assert_eq!(table.forecast_rows().len(), 2);

    assert_eq!(
        table.history_rows()[0],
        ExportRow {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            sales: Some(100),
            predicted: None,
            lower_bound: None,
            upper_bound: None,
        }
    );
    assert_eq!(table.history_rows()[1].sales, Some(111));

    let first_forecast = &table.forecast_rows()[0];
    assert_eq!(first_forecast.date, NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
    assert_eq!(first_forecast.sales, None);
    assert!(first_forecast.predicted.is_some());
    assert!(first_forecast.lower_bound <= first_forecast.predicted);
    assert!(first_forecast.upper_bound >= first_forecast.predicted);
    assert_eq!(
        table.forecast_rows()[1].date,
        NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()
    );
}

#[test]
fn test_csv_export_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("forecast.csv");
    let table = example_table();

    let format = export(&table, &path).unwrap();
    assert_eq!(format, ExportFormat::Csv);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(headers, COLUMNS.to_vec());

    let rows: Vec<ExportRow> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(rows, table.rows().to_vec());

    // Dates are written in ISO form
    let text = std::fs::read_to_string(&path).unwrap();
    let dates: Vec<&str> = text
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2023-01-01", "2023-02-01", "2023-03-01", "2023-04-01", "2023-05-01"]
    );
}

#[test]
fn test_export_rows_carry_calendar_dates() {
    let table = example_table();
    let dates: Vec<NaiveDate> = table.rows().iter().map(|r| r.date).collect();

    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert!(dates.iter().all(|d| d.day() == 1));
}

#[test]
fn test_xlsx_export_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("forecasted_sales.xlsx");

    let format = export(&example_table(), &path).unwrap();

    assert_eq!(format, ExportFormat::Xlsx);
    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0);
}

#[test]
fn test_unknown_extension_is_validation_error() {
    let dir = tempdir().unwrap();
    let err = export(&example_table(), dir.path().join("forecast.ods")).unwrap_err();
    assert!(err.is_validation());

    assert!(ExportFormat::from_path(Path::new("no_extension")).is_err());
    assert_eq!(
        ExportFormat::from_path(Path::new("OUT.XLSX")).unwrap(),
        ExportFormat::Xlsx
    );
}
