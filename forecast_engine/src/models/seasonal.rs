//! Seasonal decomposition
//!
//! Two strategies share one contract, a monthly series in and a factor table
//! out:
//!
//! - **Average**: mean of each season index divided by the overall mean,
//!   applied multiplicatively
//! - **Holt-Winters**: final seasonal state of an additive Holt-Winters run,
//!   applied additively
//!
//! Factor tables are keyed by calendar season index (see
//! [`MonthPeriod::season_index`]), so a series starting in March still maps
//! March observations to the March slot.

use crate::config::SeasonalMode;
use crate::data::{MonthPeriod, MonthlySeries};
use crate::error::{ForecastError, Result};
use crate::models::SmoothingParameters;
use revenue_math::{mean, AdditiveHoltWinters, HoltWintersFit};
use serde::{Deserialize, Serialize};

/// How a seasonal factor combines with the trend value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combination {
    /// `base * factor`, neutral factor 1.0
    Multiplicative,
    /// `base + factor`, neutral factor 0.0
    Additive,
}

impl Combination {
    /// Factor that leaves the base unchanged
    pub fn neutral(&self) -> f64 {
        match self {
            Combination::Multiplicative => 1.0,
            Combination::Additive => 0.0,
        }
    }
}

/// Seasonal adjustment per season index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalFactors {
    combination: Combination,
    factors: Vec<f64>,
}

impl SeasonalFactors {
    /// Table with every index neutral
    pub fn neutral(combination: Combination, period_length: usize) -> Self {
        Self {
            combination,
            factors: vec![combination.neutral(); period_length.max(1)],
        }
    }

    /// Table from explicit factors, indexed by season index
    pub fn from_factors(combination: Combination, factors: Vec<f64>) -> Result<Self> {
        if factors.is_empty() {
            return Err(ForecastError::InvalidArgument(
                "Seasonal factor table must not be empty".to_string(),
            ));
        }
        Ok(Self {
            combination,
            factors,
        })
    }

    /// Get the combination rule
    pub fn combination(&self) -> Combination {
        self.combination
    }

    /// Number of season indices
    pub fn period_length(&self) -> usize {
        self.factors.len()
    }

    /// Get the factors
    pub fn factors(&self) -> &[f64] {
        &self.factors
    }

    /// Factor applying to `period`
    pub fn factor_for(&self, period: MonthPeriod) -> f64 {
        self.factors[period.season_index(self.factors.len())]
    }

    /// Combine a trend value for `period` with its seasonal factor
    pub fn apply(&self, base: f64, period: MonthPeriod) -> f64 {
        let factor = self.factor_for(period);
        match self.combination {
            Combination::Multiplicative => base * factor,
            Combination::Additive => base + factor,
        }
    }
}

/// Seasonal decomposition strategy with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeasonalModel {
    /// Month-of-period averages
    Average,
    /// Additive Holt-Winters with fixed coefficients
    HoltWinters(SmoothingParameters),
}

impl SeasonalModel {
    /// Mode this strategy implements
    pub fn mode(&self) -> SeasonalMode {
        match self {
            SeasonalModel::Average => SeasonalMode::Average,
            SeasonalModel::HoltWinters(_) => SeasonalMode::HoltWinters,
        }
    }

    /// Derive the seasonal factor table for `series`
    pub fn decompose(
        &self,
        series: &MonthlySeries,
        period_length: usize,
    ) -> Result<SeasonalFactors> {
        match self {
            SeasonalModel::Average => average_factors(series, period_length),
            SeasonalModel::HoltWinters(params) => {
                let fit = fit_holt_winters(series, period_length, *params)?;
                SeasonalFactors::from_factors(Combination::Additive, fit.seasonal)
            }
        }
    }
}

/// Average-mode factors: per-index mean over overall mean.
///
/// An overall mean of zero makes every factor neutral, as does an index with
/// no observations.
pub fn average_factors(series: &MonthlySeries, period_length: usize) -> Result<SeasonalFactors> {
    if period_length == 0 {
        return Err(ForecastError::InvalidArgument(
            "Period length must be positive".to_string(),
        ));
    }

    let values = series.values();
    let overall_mean = match mean(values) {
        Some(m) if m.abs() >= f64::EPSILON => m,
        _ => {
            return Ok(SeasonalFactors::neutral(
                Combination::Multiplicative,
                period_length,
            ))
        }
    };

    let mut sums = vec![0.0; period_length];
    let mut counts = vec![0usize; period_length];
    for (i, &value) in values.iter().enumerate() {
        let index = series.period_at(i).season_index(period_length);
        sums[index] += value;
        counts[index] += 1;
    }

    let factors = sums
        .iter()
        .zip(counts.iter())
        .map(|(&sum, &count)| {
            if count == 0 {
                1.0
            } else {
                (sum / count as f64) / overall_mean
            }
        })
        .collect();

    SeasonalFactors::from_factors(Combination::Multiplicative, factors)
}

/// Run additive Holt-Winters over `series` with calendar-anchored slots.
///
/// Needs at least `2 * period_length` observed months. Zero-filled gap
/// months are part of the recursion but do not count towards that minimum.
pub fn fit_holt_winters(
    series: &MonthlySeries,
    period_length: usize,
    params: SmoothingParameters,
) -> Result<HoltWintersFit> {
    let required = period_length.saturating_mul(2);
    if series.observed() < required {
        return Err(ForecastError::InsufficientData(format!(
            "Holt-Winters with period {} needs {} observed months, have {}",
            period_length,
            required,
            series.observed()
        )));
    }

    let model = AdditiveHoltWinters::new(params.alpha, params.beta, params.gamma, period_length)?
        .with_offset(series.start().season_index(period_length));
    Ok(model.fit(series.values())?)
}
