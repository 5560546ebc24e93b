//! Fit metrics and confidence band statistics

use crate::error::{ForecastError, Result};
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;

/// In-sample accuracy of a fitted series
#[derive(Debug, Clone, PartialEq)]
pub struct FitAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
}

impl std::fmt::Display for FitAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MAE {:.4}, MSE {:.4}, RMSE {:.4}",
            self.mae, self.mse, self.rmse
        )
    }
}

/// Calculate accuracy metrics for fitted vs actual values
pub fn fit_accuracy(actual: &[f64], fitted: &[f64]) -> Result<FitAccuracy> {
    let rmse = revenue_math::rmse(actual, fitted)?;
    let n = actual.len() as f64;

    let mae = actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, f)| (a - f).abs())
        .sum::<f64>()
        / n;

    Ok(FitAccuracy {
        mae,
        mse: rmse * rmse,
        rmse,
    })
}

/// Sample standard deviation of residuals, 0.0 with fewer than two
pub fn residual_std_dev(residuals: &[f64]) -> f64 {
    if residuals.len() < 2 {
        return 0.0;
    }
    residuals.std_dev()
}

/// Two-sided standard normal quantile for `confidence_level`, e.g. 1.96 for 0.95
pub fn z_score(confidence_level: f64) -> Result<f64> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(ForecastError::InvalidArgument(
            "Confidence level must be between 0 and 1".to_string(),
        ));
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::InvalidArgument(format!("Normal distribution: {}", e)))?;
    Ok(normal.inverse_cdf(0.5 + confidence_level / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_z_score() {
        assert_abs_diff_eq!(z_score(0.95).unwrap(), 1.96, epsilon = 1e-3);
        assert_abs_diff_eq!(z_score(0.99).unwrap(), 2.576, epsilon = 1e-3);
        assert!(z_score(1.0).is_err());
    }

    #[test]
    fn test_residual_std_dev() {
        assert_eq!(residual_std_dev(&[]), 0.0);
        assert_eq!(residual_std_dev(&[3.0]), 0.0);
        // Sample standard deviation of 2, 4, 4, 4, 5, 5, 7, 9
        let sd = residual_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_abs_diff_eq!(sd, (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_fit_accuracy() {
        let accuracy = fit_accuracy(&[10.0, 20.0], &[12.0, 18.0]).unwrap();
        assert_abs_diff_eq!(accuracy.mae, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(accuracy.rmse, 2.0, epsilon = 1e-12);
        assert!(fit_accuracy(&[1.0], &[]).is_err());
    }
}
