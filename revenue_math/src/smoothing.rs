//! Exponential smoothing kernels
//!
//! Contains:
//! - Simple exponential smoothing over a whole series
//! - Additive Holt-Winters (triple exponential smoothing) with one-step-ahead fits

use crate::{MathError, Result};

/// Smooth a series with an exponential moving average.
///
/// The first output equals the first input; each later output is
/// `alpha * value + (1 - alpha) * previous`.
pub fn exponential_smoothing(values: &[f64], alpha: f64) -> Result<Vec<f64>> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(MathError::InvalidInput(
            "Alpha must be in (0, 1]".to_string(),
        ));
    }

    let mut smoothed: Vec<f64> = Vec::with_capacity(values.len());
    for &value in values {
        let next = match smoothed.last() {
            None => value,
            Some(&previous) => alpha * value + (1.0 - alpha) * previous,
        };
        smoothed.push(next);
    }

    Ok(smoothed)
}

/// Additive Holt-Winters model
///
/// Seasonal state is stored by slot `(offset + t) % period`, where `t` is the
/// position in the fitted series. With `offset` set to the season index of
/// the first observation, slots line up with calendar positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdditiveHoltWinters {
    alpha: f64,
    beta: f64,
    gamma: f64,
    period: usize,
    offset: usize,
}

/// Final state and in-sample diagnostics of a Holt-Winters run
#[derive(Debug, Clone, PartialEq)]
pub struct HoltWintersFit {
    /// Level after the last observation
    pub level: f64,
    /// Trend after the last observation
    pub trend: f64,
    /// Seasonal components indexed by slot
    pub seasonal: Vec<f64>,
    /// One-step-ahead fitted values for positions `period..n`
    pub fitted: Vec<f64>,
    /// Observation minus fitted value for positions `period..n`
    pub residuals: Vec<f64>,
}

impl HoltWintersFit {
    /// Root mean square of the one-step-ahead residuals
    pub fn rmse(&self) -> f64 {
        if self.residuals.is_empty() {
            return 0.0;
        }
        let mse = self.residuals.iter().map(|r| r * r).sum::<f64>() / self.residuals.len() as f64;
        mse.sqrt()
    }
}

impl AdditiveHoltWinters {
    /// Create a new model. Every coefficient must lie in `[0, 1]`.
    pub fn new(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        for (name, value) in [("Alpha", alpha), ("Beta", beta), ("Gamma", gamma)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MathError::InvalidInput(format!(
                    "{} must be between 0 and 1 (inclusive), got {}",
                    name, value
                )));
            }
        }
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            alpha,
            beta,
            gamma,
            period,
            offset: 0,
        })
    }

    /// Set the seasonal slot of the first observation
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset % self.period;
        self
    }

    /// Get the seasonal period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Slot holding the seasonal component for series position `t`
    pub fn slot(&self, t: usize) -> usize {
        (self.offset + t) % self.period
    }

    /// Run the recursion over `values`.
    ///
    /// Needs at least two full periods: the first initialises level and
    /// seasonal state, the first two together initialise the trend.
    pub fn fit(&self, values: &[f64]) -> Result<HoltWintersFit> {
        let p = self.period;
        if values.len() < 2 * p {
            return Err(MathError::InsufficientData(format!(
                "Holt-Winters with period {} needs at least {} observations, have {}",
                p,
                2 * p,
                values.len()
            )));
        }

        let first_season = values[..p].iter().sum::<f64>() / p as f64;
        let second_season = values[p..2 * p].iter().sum::<f64>() / p as f64;

        let mut level = first_season;
        let mut trend = (second_season - first_season) / p as f64;
        let mut seasonal = vec![0.0; p];
        for (t, &value) in values[..p].iter().enumerate() {
            seasonal[self.slot(t)] = value - level;
        }

        let mut fitted = Vec::with_capacity(values.len() - p);
        let mut residuals = Vec::with_capacity(values.len() - p);

        for (t, &value) in values.iter().enumerate().skip(p) {
            let slot = self.slot(t);
            let season = seasonal[slot];

            let forecast = level + trend + season;
            fitted.push(forecast);
            residuals.push(value - forecast);

            let prev_level = level;
            level = self.alpha * (value - season) + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - prev_level) + (1.0 - self.beta) * trend;
            seasonal[slot] = self.gamma * (value - level) + (1.0 - self.gamma) * season;
        }

        Ok(HoltWintersFit {
            level,
            trend,
            seasonal,
            fitted,
            residuals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_smoothing() {
        let smoothed = exponential_smoothing(&[10.0, 20.0], 0.3).unwrap();
        // Initial level = 10, then 0.3*20 + 0.7*10 = 13
        assert!((smoothed[0] - 10.0).abs() < 0.001);
        assert!((smoothed[1] - 13.0).abs() < 0.001);
    }

    #[test]
    fn test_exponential_smoothing_rejects_bad_alpha() {
        assert!(exponential_smoothing(&[1.0], 0.0).is_err());
        assert!(exponential_smoothing(&[1.0], 1.5).is_err());
        assert!(exponential_smoothing(&[], 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_holt_winters_requires_two_periods() {
        let model = AdditiveHoltWinters::new(0.1, 0.1, 0.1, 12).unwrap();
        let result = model.fit(&[1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(result, Err(MathError::InsufficientData(_))));
    }

    #[test]
    fn test_holt_winters_tracks_pure_seasonal_pattern() {
        // Repeating pattern without trend is reproduced exactly by the initial state
        let pattern = [10.0, 20.0, 30.0];
        let values: Vec<f64> = pattern.iter().cycle().take(12).copied().collect();

        let model = AdditiveHoltWinters::new(0.5, 0.5, 0.5, 3).unwrap();
        let fit = model.fit(&values).unwrap();

        assert_eq!(fit.fitted.len(), 9);
        assert!(fit.rmse() < 1e-9);
        assert!((fit.level - 20.0).abs() < 1e-9);
        assert!(fit.trend.abs() < 1e-9);
        assert!((fit.seasonal[0] + 10.0).abs() < 1e-9);
        assert!((fit.seasonal[2] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_rotates_slots() {
        let model = AdditiveHoltWinters::new(0.2, 0.1, 0.3, 4)
            .unwrap()
            .with_offset(6);
        assert_eq!(model.slot(0), 2);
        assert_eq!(model.slot(2), 0);
    }

    #[test]
    fn test_rejects_out_of_range_coefficients() {
        assert!(AdditiveHoltWinters::new(-0.1, 0.1, 0.1, 12).is_err());
        assert!(AdditiveHoltWinters::new(0.1, 1.1, 0.1, 12).is_err());
        assert!(AdditiveHoltWinters::new(0.1, 0.1, 0.1, 0).is_err());
    }
}
