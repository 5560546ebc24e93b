//! Forecast value types and the trend and seasonal models

use crate::config::SeasonalMode;
use crate::data::{MonthPeriod, MonthlyPoint};
use crate::error::{ForecastError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod seasonal;
pub mod trend;

pub use seasonal::{Combination, SeasonalFactors, SeasonalModel};
pub use trend::{fit_trend, TrendLine};

/// Holt-Winters smoothing coefficients, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingParameters {
    /// Level smoothing
    pub alpha: f64,
    /// Trend smoothing
    pub beta: f64,
    /// Seasonal smoothing
    pub gamma: f64,
}

impl Default for SmoothingParameters {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            beta: 0.1,
            gamma: 0.1,
        }
    }
}

impl SmoothingParameters {
    /// Create a new parameter set
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        for (name, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidArgument(format!(
                    "Smoothing coefficient {} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(Self { alpha, beta, gamma })
    }

    /// Coefficients as `[alpha, beta, gamma]`
    pub fn to_array(self) -> [f64; 3] {
        [self.alpha, self.beta, self.gamma]
    }

    /// Move one coefficient by `delta`, clamped to `[0, 1]`
    pub(crate) fn shifted(self, axis: usize, delta: f64) -> Self {
        let mut coefficients = self.to_array();
        coefficients[axis] = (coefficients[axis] + delta).clamp(0.0, 1.0);
        Self {
            alpha: coefficients[0],
            beta: coefficients[1],
            gamma: coefficients[2],
        }
    }
}

/// One projected month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Month being projected
    pub period: MonthPeriod,
    /// Projected revenue, never negative
    pub value: Decimal,
    /// Lower confidence bound, never negative
    pub lower_bound: Decimal,
    /// Upper confidence bound, at least `lower_bound`
    pub upper_bound: Decimal,
}

/// Output of a forecasting call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Observed monthly totals
    pub historic: Vec<MonthlyPoint>,
    /// Projected months following the last observed one
    pub forecast: Vec<ForecastPoint>,
    /// In-sample root mean square error
    pub fit_error: f64,
    /// Seasonal mode that produced the forecast
    pub method: SeasonalMode,
    /// Smoothing coefficients on the Holt-Winters path
    pub parameters: Option<SmoothingParameters>,
}

impl ForecastResult {
    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.forecast.len()
    }

    /// Sum of projected values
    pub fn forecast_total(&self) -> Decimal {
        self.forecast.iter().map(|p| p.value).sum()
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_is_clamped() {
        let params = SmoothingParameters::default();
        let up = params.shifted(0, 2.0);
        assert_eq!(up.alpha, 1.0);
        let down = params.shifted(2, -0.5);
        assert_eq!(down.gamma, 0.0);
        assert_eq!(down.beta, 0.1);
    }

    #[test]
    fn test_parameter_validation() {
        assert!(SmoothingParameters::new(0.0, 1.0, 0.5).is_ok());
        assert!(SmoothingParameters::new(f64::NAN, 0.1, 0.1).is_err());
        assert!(SmoothingParameters::new(0.1, 0.1, -0.01).is_err());
    }
}
