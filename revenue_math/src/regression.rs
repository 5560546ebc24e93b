//! Ordinary least squares over index positions
//!
//! The x axis is always the 0-based position of a value in the series, so a
//! fit over `[a, b, c]` regresses on `x = 0, 1, 2`.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// A fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Change per position
    pub slope: f64,
    /// Value at position 0
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the line at position `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Get the R-squared value (coefficient of determination) of this line against `values`.
    ///
    /// Returns `None` when the values have no variance.
    pub fn r_squared(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }

        let y_mean = values.iter().sum::<f64>() / values.len() as f64;

        let mut ss_total = 0.0; // total sum of squares
        let mut ss_residual = 0.0; // residual sum of squares

        for (i, &y) in values.iter().enumerate() {
            let y_pred = self.value_at(i as f64);
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - y_pred).powi(2);
        }

        if ss_total.abs() < 1e-10 {
            return None;
        }

        Some(1.0 - (ss_residual / ss_total))
    }
}

/// Fit a least-squares line through `values` over positions `0..n`.
///
/// A single value yields a flat line through it. When the x values carry no
/// variance the slope is 0.
pub fn least_squares(values: &[f64]) -> Result<LinearFit> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Not enough data for a trend fit. Need at least 1 point.".to_string(),
        ));
    }

    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Trend fit input contains a non-finite value".to_string(),
        ));
    }

    if values.len() == 1 {
        return Ok(LinearFit {
            slope: 0.0,
            intercept: values[0],
        });
    }

    let n = values.len() as f64;

    // Calculate means
    let x_mean = (0..values.len()).map(|i| i as f64).sum::<f64>() / n;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        numerator += (x - x_mean) * (y - y_mean);
        denominator += (x - x_mean) * (x - x_mean);
    }

    let slope = if denominator.abs() < 1e-10 {
        0.0
    } else {
        numerator / denominator
    };

    Ok(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_linear_series() {
        let fit = least_squares(&[100.0, 200.0, 300.0, 400.0, 500.0, 600.0]).unwrap();

        assert!((fit.slope - 100.0).abs() < 1e-9);
        assert!((fit.intercept - 100.0).abs() < 1e-9);
        assert!((fit.value_at(6.0) - 700.0).abs() < 1e-9);

        // R-squared should be 1.0 for perfect linear data
        assert!(fit.r_squared(&[100.0, 200.0, 300.0, 400.0, 500.0, 600.0]).unwrap() > 0.999);
    }

    #[test]
    fn test_single_value_is_flat() {
        let fit = least_squares(&[100.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 100.0);
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        assert!(matches!(
            least_squares(&[]),
            Err(MathError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_flat_series() {
        let fit = least_squares(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 5.0);
        assert!(fit.r_squared(&[5.0, 5.0, 5.0, 5.0]).is_none());
    }

    #[test]
    fn test_non_finite_input() {
        assert!(matches!(
            least_squares(&[1.0, f64::NAN]),
            Err(MathError::InvalidInput(_))
        ));
    }
}
