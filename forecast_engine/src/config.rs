//! Forecast configuration

use crate::error::{ForecastError, Result};
use crate::models::SmoothingParameters;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest horizon a forecast may request, one hundred years
pub const MAX_HORIZON_MONTHS: i32 = 1200;

/// Longest seasonal cycle, ten years
pub const MAX_PERIOD_LENGTH: i32 = 120;

/// Validate a requested horizon and convert it to a count
pub(crate) fn check_horizon(horizon_months: i32) -> Result<usize> {
    if horizon_months <= 0 || horizon_months > MAX_HORIZON_MONTHS {
        return Err(ForecastError::InvalidArgument(format!(
            "Horizon must be between 1 and {} months, got {}",
            MAX_HORIZON_MONTHS, horizon_months
        )));
    }
    Ok(horizon_months as usize)
}

/// Seasonal decomposition strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalMode {
    /// Month-of-period means relative to the overall mean, applied multiplicatively
    #[default]
    Average,
    /// Additive Holt-Winters state with optimised smoothing coefficients
    HoltWinters,
}

impl fmt::Display for SeasonalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonalMode::Average => write!(f, "average"),
            SeasonalMode::HoltWinters => write!(f, "holt_winters"),
        }
    }
}

impl FromStr for SeasonalMode {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "average" | "avg" => Ok(SeasonalMode::Average),
            "holt_winters" | "holt-winters" | "hw" => Ok(SeasonalMode::HoltWinters),
            other => Err(ForecastError::InvalidArgument(format!(
                "Unknown seasonal mode: {}",
                other
            ))),
        }
    }
}

/// Settings for one forecasting call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of future months to project
    pub horizon_months: i32,
    /// Seasonal decomposition strategy
    pub seasonal_mode: SeasonalMode,
    /// Length of the seasonal cycle in months
    pub period_length: i32,
    /// Starting point of the smoothing parameter search, `[alpha, beta, gamma]`
    pub optimizer_initial_guess: Option<[f64; 3]>,
    /// Coverage of the confidence bounds on the Holt-Winters path
    pub confidence_level: f64,
    /// Exponential smoothing applied before the trend fit in average mode
    pub trend_smoothing: Option<f64>,
    /// Upper bound on optimizer polling rounds
    pub max_iterations: usize,
    /// Retry with average seasonality when the parameter search fails
    pub fallback_to_average: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_months: 6,
            seasonal_mode: SeasonalMode::Average,
            period_length: 12,
            optimizer_initial_guess: None,
            confidence_level: 0.95,
            trend_smoothing: None,
            max_iterations: 200,
            fallback_to_average: true,
        }
    }
}

impl ForecastConfig {
    /// Create a configuration with default settings for everything but horizon and mode
    pub fn new(horizon_months: i32, seasonal_mode: SeasonalMode) -> Self {
        Self {
            horizon_months,
            seasonal_mode,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the seasonal cycle length
    pub fn with_period_length(mut self, period_length: i32) -> Self {
        self.period_length = period_length;
        self
    }

    /// Set the optimizer starting point
    pub fn with_initial_guess(mut self, alpha: f64, beta: f64, gamma: f64) -> Self {
        self.optimizer_initial_guess = Some([alpha, beta, gamma]);
        self
    }

    /// Set the confidence level of the Holt-Winters bounds
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Smooth the series with `alpha` before fitting the trend
    pub fn with_trend_smoothing(mut self, alpha: f64) -> Self {
        self.trend_smoothing = Some(alpha);
        self
    }

    /// Set the optimizer polling budget
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable the average-mode fallback
    pub fn with_fallback(mut self, fallback_to_average: bool) -> Self {
        self.fallback_to_average = fallback_to_average;
        self
    }

    /// Check every setting, reporting the first violation
    pub fn validate(&self) -> Result<()> {
        self.horizon()?;
        self.period()?;
        self.initial_guess()?;

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::InvalidArgument(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }

        if let Some(alpha) = self.trend_smoothing {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(ForecastError::InvalidArgument(format!(
                    "Trend smoothing alpha must be in (0, 1], got {}",
                    alpha
                )));
            }
        }

        if self.max_iterations == 0 {
            return Err(ForecastError::InvalidArgument(
                "Optimizer iteration budget must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Horizon as a count, rejecting values outside `1..=MAX_HORIZON_MONTHS`
    pub fn horizon(&self) -> Result<usize> {
        check_horizon(self.horizon_months)
    }

    /// Period length as a count, rejecting values outside `1..=MAX_PERIOD_LENGTH`
    pub fn period(&self) -> Result<usize> {
        if self.period_length <= 0 || self.period_length > MAX_PERIOD_LENGTH {
            return Err(ForecastError::InvalidArgument(format!(
                "Period length must be between 1 and {}, got {}",
                MAX_PERIOD_LENGTH, self.period_length
            )));
        }
        Ok(self.period_length as usize)
    }

    /// Optimizer starting point, `(0.1, 0.1, 0.1)` unless overridden
    pub fn initial_guess(&self) -> Result<SmoothingParameters> {
        match self.optimizer_initial_guess {
            Some([alpha, beta, gamma]) => SmoothingParameters::new(alpha, beta, gamma),
            None => Ok(SmoothingParameters::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ForecastConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.period().unwrap(), 12);
        assert_eq!(config.initial_guess().unwrap(), SmoothingParameters::default());
    }

    #[test]
    fn test_rejects_non_positive_values() {
        assert!(ForecastConfig::new(0, SeasonalMode::Average).validate().is_err());
        assert!(ForecastConfig::new(-3, SeasonalMode::Average).validate().is_err());
        assert!(ForecastConfig::new(3, SeasonalMode::Average)
            .with_period_length(0)
            .validate()
            .is_err());
        assert!(ForecastConfig::new(3, SeasonalMode::Average)
            .with_initial_guess(0.1, 1.5, 0.1)
            .validate()
            .is_err());
        assert!(ForecastConfig::new(3, SeasonalMode::Average)
            .with_confidence_level(1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_oversized_values() {
        assert_eq!(
            ForecastConfig::new(MAX_HORIZON_MONTHS, SeasonalMode::Average).horizon().unwrap(),
            1200
        );
        for horizon in [MAX_HORIZON_MONTHS + 1, i32::MAX] {
            assert!(matches!(
                ForecastConfig::new(horizon, SeasonalMode::Average).validate(),
                Err(ForecastError::InvalidArgument(_))
            ));
        }
        assert!(ForecastConfig::new(3, SeasonalMode::Average)
            .with_period_length(i32::MAX)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config =
            ForecastConfig::from_json(r#"{"horizon_months": 3, "seasonal_mode": "holt_winters"}"#)
                .unwrap();
        assert_eq!(config.horizon_months, 3);
        assert_eq!(config.seasonal_mode, SeasonalMode::HoltWinters);
        assert_eq!(config.period_length, 12);
        assert!(config.fallback_to_average);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            "holt-winters".parse::<SeasonalMode>().unwrap(),
            SeasonalMode::HoltWinters
        );
        assert_eq!("Average".parse::<SeasonalMode>().unwrap(), SeasonalMode::Average);
        assert!("arima".parse::<SeasonalMode>().is_err());
    }
}
