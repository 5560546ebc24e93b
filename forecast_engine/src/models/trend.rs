//! Linear trend estimation

use crate::error::Result;
use revenue_math::{least_squares, LinearFit};
use serde::{Deserialize, Serialize};

/// Straight-line trend over series positions `0..observations`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    /// Change per month
    pub slope: f64,
    /// Value at the first month
    pub intercept: f64,
    /// Number of months the line was fitted on
    pub observations: usize,
}

impl TrendLine {
    /// Express a Holt-Winters end state as a line.
    ///
    /// `level` and `trend` describe position `observations - 1`, so the line
    /// reproduces `level + h * trend` for `h` months ahead.
    pub fn from_level(level: f64, trend: f64, observations: usize) -> Self {
        let last = observations.saturating_sub(1) as f64;
        Self {
            slope: trend,
            intercept: level - trend * last,
            observations,
        }
    }

    /// Value at 0-based position `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Value `step` months after the last fitted month
    pub fn value_after(&self, step: usize) -> f64 {
        let last = self.observations.saturating_sub(1);
        self.value_at((last + step) as f64)
    }

    /// Coefficient of determination against `series`, `None` without variance
    pub fn r_squared(&self, series: &[f64]) -> Option<f64> {
        LinearFit {
            slope: self.slope,
            intercept: self.intercept,
        }
        .r_squared(series)
    }
}

/// Fit a least-squares trend over `series`.
///
/// An empty series is `InsufficientData`; a single value gives a flat line.
pub fn fit_trend(series: &[f64]) -> Result<TrendLine> {
    let fit = least_squares(series)?;
    Ok(TrendLine {
        slope: fit.slope,
        intercept: fit.intercept,
        observations: series.len(),
    })
}
