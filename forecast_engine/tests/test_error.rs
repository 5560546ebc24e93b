use forecast_engine::error::ForecastError;
use forecast_engine::{ForecastConfig, SeasonalMode};
use revenue_math::MathError;

#[test]
fn test_error_conversion() {
    // Math errors keep their classification where one exists
    let err = ForecastError::from(MathError::InsufficientData("need 24 points".to_string()));
    assert!(matches!(err, ForecastError::InsufficientData(_)));

    let err = ForecastError::from(MathError::InvalidInput("alpha out of range".to_string()));
    assert!(matches!(err, ForecastError::InvalidArgument(_)));

    let err = ForecastError::from(MathError::CalculationError("overflow".to_string()));
    assert!(matches!(err, ForecastError::Math(_)));

    // JSON errors become serialization errors
    let json_error = serde_json::from_str::<ForecastConfig>("{not json").unwrap_err();
    let err = ForecastError::from(json_error);
    assert!(matches!(err, ForecastError::Serialization(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidArgument("Horizon must be positive, got 0".to_string());
    let error_string = format!("{}", error);
    assert!(error_string.contains("Invalid argument"));
    assert!(error_string.contains("Horizon must be positive"));

    let error = ForecastError::Math(MathError::CalculationError("NaN".to_string()));
    let error_string = format!("{}", error);
    assert!(error_string.contains("Math error"));
    assert!(error_string.contains("NaN"));
}

#[test]
fn test_only_optimization_failure_is_recoverable() {
    assert!(ForecastError::OptimizationFailure("no finite fit".to_string()).is_recoverable());
    assert!(!ForecastError::InsufficientData("4 months".to_string()).is_recoverable());
    assert!(!ForecastError::InvalidArgument("bad".to_string()).is_recoverable());
}

#[test]
fn test_config_errors() {
    let result = ForecastConfig::from_json(r#"{"seasonal_mode": "quarterly"}"#);
    assert!(matches!(result, Err(ForecastError::Serialization(_))));

    let result = "weekly".parse::<SeasonalMode>();
    assert!(matches!(result, Err(ForecastError::InvalidArgument(_))));

    let config =
        ForecastConfig::new(6, SeasonalMode::HoltWinters).with_initial_guess(1.5, 0.1, 0.1);
    assert!(matches!(
        config.validate(),
        Err(ForecastError::InvalidArgument(_))
    ));
}
