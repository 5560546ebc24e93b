//! Forecast projection
//!
//! Extends a trend line past the last observed month, applies the seasonal
//! factor of each future month and attaches confidence bounds.

use crate::config::check_horizon;
use crate::data::MonthPeriod;
use crate::error::{ForecastError, Result};
use crate::metrics::{residual_std_dev, z_score};
use crate::models::{ForecastPoint, SeasonalFactors, TrendLine};
use num_traits::FromPrimitive;
use revenue_math::MathError;
use rust_decimal::Decimal;

/// Symmetric band of `z` residual standard deviations around each value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBand {
    /// Normal quantile for the confidence level
    pub z: f64,
    /// Standard deviation of the in-sample residuals
    pub std_dev: f64,
}

impl ConfidenceBand {
    /// Band for `confidence_level` from one-step-ahead residuals
    pub fn from_residuals(confidence_level: f64, residuals: &[f64]) -> Result<Self> {
        Ok(Self {
            z: z_score(confidence_level)?,
            std_dev: residual_std_dev(residuals),
        })
    }

    /// Half-width of the band
    pub fn margin(&self) -> f64 {
        self.z * self.std_dev
    }
}

/// Project `horizon_months` months after `last_period`.
///
/// The horizon must lie in `1..=MAX_HORIZON_MONTHS`.
///
/// Step `h` evaluates the trend at position `n - 1 + h` and combines it with
/// the seasonal factor of that month. The combined value is clamped at zero;
/// bounds are taken around the clamped value and clamped independently.
/// Without a band both bounds equal the value.
pub fn project(
    trend: &TrendLine,
    factors: &SeasonalFactors,
    last_period: MonthPeriod,
    horizon_months: i32,
    band: Option<&ConfidenceBand>,
) -> Result<Vec<ForecastPoint>> {
    let horizon = check_horizon(horizon_months)?;
    let mut points = Vec::with_capacity(horizon);

    for step in 1..=horizon {
        let period = last_period.add_months(step as i64);
        let base = trend.value_after(step);
        let raw = factors.apply(base, period);
        if !raw.is_finite() {
            return Err(ForecastError::Math(MathError::CalculationError(format!(
                "Projected value for {} is not finite",
                period
            ))));
        }

        let value = non_negative(raw);
        let (lower, upper) = match band {
            Some(band) => {
                let margin = band.margin();
                (non_negative(value - margin), non_negative(value + margin))
            }
            None => (value, value),
        };

        points.push(ForecastPoint {
            period,
            value: to_money(value)?,
            lower_bound: to_money(lower)?,
            upper_bound: to_money(upper)?,
        });
    }

    Ok(points)
}

fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Convert to a decimal rounded to cents
fn to_money(value: f64) -> Result<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| {
            ForecastError::Math(MathError::CalculationError(format!(
                "Projected value {} is outside the decimal range",
                value
            )))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_HORIZON_MONTHS;
    use crate::models::Combination;
    use pretty_assertions::assert_eq;

    fn june() -> MonthPeriod {
        MonthPeriod::new(2024, 6).unwrap()
    }

    #[test]
    fn test_linear_projection() {
        let trend = TrendLine {
            slope: 100.0,
            intercept: 100.0,
            observations: 6,
        };
        let factors = SeasonalFactors::neutral(Combination::Multiplicative, 12);
        let points = project(&trend, &factors, june(), 3, None).unwrap();

        let values: Vec<Decimal> = points.iter().map(|p| p.value).collect();
        assert_eq!(
            values,
            vec![Decimal::from(700), Decimal::from(800), Decimal::from(900)]
        );
        assert_eq!(points[0].period, MonthPeriod::new(2024, 7).unwrap());
        assert_eq!(points[2].period, MonthPeriod::new(2024, 9).unwrap());
        assert_eq!(points[0].lower_bound, points[0].value);
        assert_eq!(points[0].upper_bound, points[0].value);
    }

    #[test]
    fn test_negative_trend_is_clamped() {
        let trend = TrendLine {
            slope: -100.0,
            intercept: 150.0,
            observations: 2,
        };
        let factors = SeasonalFactors::neutral(Combination::Additive, 12);
        let band = ConfidenceBand {
            z: 1.96,
            std_dev: 10.0,
        };
        let points = project(&trend, &factors, june(), 4, Some(&band)).unwrap();

        for point in &points {
            assert!(point.value >= Decimal::ZERO);
            assert!(point.lower_bound >= Decimal::ZERO);
            assert!(point.lower_bound <= point.value);
            assert!(point.value <= point.upper_bound);
        }
        // Step 1 is 150 - 100 * 2 = -50
        assert_eq!(points[0].value, Decimal::ZERO);
        assert_eq!(points[0].upper_bound, Decimal::new(1960, 2));
    }

    #[test]
    fn test_additive_factor_applies_to_future_month() {
        let trend = TrendLine {
            slope: 0.0,
            intercept: 50.0,
            observations: 24,
        };
        let mut table = vec![0.0; 12];
        table[6] = 25.0; // July
        let factors = SeasonalFactors::from_factors(Combination::Additive, table).unwrap();

        let points = project(&trend, &factors, june(), 2, None).unwrap();
        assert_eq!(points[0].value, Decimal::from(75));
        assert_eq!(points[1].value, Decimal::from(50));
    }

    #[test]
    fn test_out_of_range_horizon() {
        let trend = TrendLine {
            slope: 0.0,
            intercept: 1.0,
            observations: 1,
        };
        let factors = SeasonalFactors::neutral(Combination::Multiplicative, 12);
        for horizon in [0, -1, MAX_HORIZON_MONTHS + 1, i32::MAX] {
            assert!(matches!(
                project(&trend, &factors, june(), horizon, None),
                Err(ForecastError::InvalidArgument(_))
            ));
        }
    }
}
