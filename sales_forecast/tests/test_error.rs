use forecast_math::MathError;
use sales_forecast::ForecastError;
use std::io;

#[test]
fn test_math_error_becomes_forecasting_error() {
    let err: ForecastError = MathError::InsufficientData("need 2 observations".to_string()).into();

    assert!(matches!(err, ForecastError::ForecastingError(_)));
    assert!(!err.is_validation());
    assert!(err.to_string().contains("need 2 observations"));
}

#[test]
fn test_io_error_conversion() {
    let err: ForecastError = io::Error::new(io::ErrorKind::NotFound, "sales.txt").into();
    assert!(matches!(err, ForecastError::IoError(_)));
    assert_eq!(err.to_string(), "IO error: sales.txt");
}

#[test]
fn test_validation_helper() {
    let err = ForecastError::validation("Number of future months must be a positive integer.");
    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "Validation error: Number of future months must be a positive integer."
    );
}

#[test]
fn test_toml_error_is_config_error() {
    let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
    let err: ForecastError = toml_err.into();
    assert!(matches!(err, ForecastError::ConfigError(_)));
}
