//! Holt-Winters smoothing parameter search
//!
//! A deterministic compass search over the unit cube. Each polling round
//! tries moving every coefficient up and down by the current step; the first
//! strict improvement on an axis is kept. A round without improvement halves
//! the step. The search stops once the step drops below the tolerance or the
//! round budget is spent, so it always terminates after at most
//! `max_iterations` rounds of six objective evaluations.

use crate::data::MonthlySeries;
use crate::error::{ForecastError, Result};
use crate::models::seasonal::fit_holt_winters;
use crate::models::SmoothingParameters;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Search settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Starting point
    pub initial_guess: SmoothingParameters,
    /// Maximum number of polling rounds
    pub max_iterations: usize,
    /// Step size of the first round
    pub initial_step: f64,
    /// Step size below which the search counts as converged
    pub tolerance: f64,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            initial_guess: SmoothingParameters::default(),
            max_iterations: 200,
            initial_step: 0.2,
            tolerance: 1e-4,
        }
    }
}

/// Best coefficients found by the search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizedParameters {
    /// Chosen coefficients
    pub parameters: SmoothingParameters,
    /// In-sample one-step-ahead RMSE at `parameters`
    pub rmse: f64,
    /// Polling rounds used
    pub iterations: usize,
    /// Whether the step fell below the tolerance within the budget
    pub converged: bool,
}

/// Choose alpha, beta and gamma minimising in-sample RMSE on `series`.
///
/// Fails with `InsufficientData` when the series is shorter than two periods
/// and with `OptimizationFailure` when no finite objective value is reachable.
pub fn optimize(
    series: &MonthlySeries,
    period_length: usize,
    settings: &OptimizerSettings,
) -> Result<OptimizedParameters> {
    if settings.max_iterations == 0 {
        return Err(ForecastError::InvalidArgument(
            "Optimizer iteration budget must be positive".to_string(),
        ));
    }
    if !(settings.initial_step > 0.0 && settings.tolerance > 0.0) {
        return Err(ForecastError::InvalidArgument(
            "Optimizer step and tolerance must be positive".to_string(),
        ));
    }

    let start = settings.initial_guess;
    SmoothingParameters::new(start.alpha, start.beta, start.gamma)?;

    let objective = |params: SmoothingParameters| -> Result<f64> {
        Ok(fit_holt_winters(series, period_length, params)?.rmse())
    };

    let mut best = start;
    let mut best_rmse = objective(best)?;
    if !best_rmse.is_finite() {
        return Err(ForecastError::OptimizationFailure(format!(
            "Objective is not finite at the initial guess ({}, {}, {})",
            best.alpha, best.beta, best.gamma
        )));
    }

    let mut step = settings.initial_step;
    let mut iterations = 0;

    while step >= settings.tolerance && iterations < settings.max_iterations {
        iterations += 1;
        let mut improved = false;

        for axis in 0..3 {
            for direction in [1.0, -1.0] {
                let candidate = best.shifted(axis, direction * step);
                if candidate == best {
                    continue;
                }

                let rmse = objective(candidate)?;
                if rmse.is_finite() && rmse < best_rmse {
                    best = candidate;
                    best_rmse = rmse;
                    improved = true;
                    break;
                }
            }
        }

        if !improved {
            step /= 2.0;
        }
    }

    let converged = step < settings.tolerance;
    if !converged {
        warn!(
            iterations,
            step, "Holt-Winters parameter search stopped at its iteration budget"
        );
    }

    debug!(
        alpha = best.alpha,
        beta = best.beta,
        gamma = best.gamma,
        rmse = best_rmse,
        iterations,
        "Holt-Winters parameters selected"
    );

    Ok(OptimizedParameters {
        parameters: best,
        rmse: best_rmse,
        iterations,
        converged,
    })
}
