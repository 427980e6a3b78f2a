use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sales_forecast::models::ForecastRecord;
use sales_forecast::plot::{write_json, ComponentsPlot, ForecastPlot};
use sales_forecast::report::{TableRow, HEADERS};
use sales_forecast::{ForecastSession, ForecastTable, OutlierSet, SeasonalTrendModel};
use tempfile::tempdir;

fn record(month: u32, predicted: f64, lower: f64, upper: f64) -> ForecastRecord {
    ForecastRecord {
        date: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
        predicted,
        lower_bound: lower,
        upper_bound: upper,
    }
}

#[test]
fn test_table_rows_are_rounded() {
    let table = ForecastTable::from_records(&[
        record(1, 1234.6, 1100.2, 1369.5),
        record(2, 99.5, 80.0, 120.49),
    ]);

    assert_eq!(
        table.rows(),
        &[
            TableRow {
                date: "2024-01-01".to_string(),
                predicted: 1235,
                lower_bound: 1100,
                upper_bound: 1370,
            },
            TableRow {
                date: "2024-02-01".to_string(),
                predicted: 100,
                lower_bound: 80,
                upper_bound: 120,
            },
        ]
    );
}

#[test]
fn test_table_display() {
    let table = ForecastTable::from_records(&[record(3, 10.0, 9.0, 11.0)]);
    let text = table.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    for heading in HEADERS {
        assert!(lines[0].contains(heading));
    }
    assert!(lines[1].starts_with("----------"));
    assert!(lines[2].starts_with("2024-03-01"));
    assert!(lines[2].trim_end().ends_with("11"));
}

#[test]
fn test_empty_table_still_has_headers() {
    let table = ForecastTable::default();
    assert!(table.is_empty());
    assert_eq!(table.to_string().lines().count(), 2);
}

fn forecasted_session() -> ForecastSession<SeasonalTrendModel> {
    let mut session = ForecastSession::new(SeasonalTrendModel::default());
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    session
        .paste_values(start, 6, "100 140 120 130 150 160")
        .unwrap();
    session
        .run_forecast(&OutlierSet::from_months([2]).unwrap(), 3)
        .unwrap();
    session
}

#[test]
fn test_forecast_plot_contents() {
    let session = forecasted_session();
    let run = session.last_run().unwrap();
    let plot = ForecastPlot::new(session.series().unwrap(), run);

    assert_eq!(plot.title, "Sales Forecast");
    assert_eq!(plot.history.len(), 6);
    assert_eq!(plot.history.iter().filter(|p| p.excluded).count(), 1);
    assert!(plot.history[1].excluded);
    assert_eq!(plot.band.len(), run.model_output().len());

    assert_eq!(plot.annotations.len(), 3);
    for (annotation, record) in plot.annotations.iter().zip(run.records()) {
        assert_eq!(annotation.date, record.date);
        assert_eq!(annotation.label, (record.predicted.round_ties_even() as i64).to_string());
    }
}

#[test]
fn test_components_plot_and_json() {
    let session = forecasted_session();
    let run = session.last_run().unwrap();
    let components = ComponentsPlot::new(run);

    assert_eq!(components.trend.len(), run.model_output().len());
    assert_eq!(components.yearly.len(), run.model_output().len());

    let dir = tempdir().unwrap();
    let path = dir.path().join("components.json");
    write_json(&components, &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["trend"].as_array().unwrap().len(), components.trend.len());
    assert_eq!(json["trend"][0]["date"], "2023-01-01");
}

#[test]
fn test_run_summary_json() {
    let session = forecasted_session();
    let json = session.last_run().unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["outliers"], serde_json::json!([2]));
    assert_eq!(value["records"].as_array().unwrap().len(), 3);
    assert_eq!(value["fitted_observations"], 5);
}
