//! Fit statistics

use crate::{MathError, Result};

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Root mean square error between fitted and actual values
pub fn rmse(actual: &[f64], fitted: &[f64]) -> Result<f64> {
    if actual.len() != fitted.len() || actual.is_empty() {
        return Err(MathError::InvalidInput(format!(
            "Actual ({}) and fitted ({}) values must have the same non-zero length",
            actual.len(),
            fitted.len()
        )));
    }

    let mse = actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, f)| (a - f).powi(2))
        .sum::<f64>()
        / actual.len() as f64;

    Ok(mse.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn test_rmse() {
        let value = rmse(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]).unwrap();
        assert_relative_eq!(value, (4.0f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_eq!(rmse(&[2.0], &[2.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_rmse_length_mismatch() {
        assert!(rmse(&[1.0], &[1.0, 2.0]).is_err());
        assert!(rmse(&[], &[]).is_err());
    }
}
