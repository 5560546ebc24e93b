//! Forecasting entry point
//!
//! Ties the stages together: aggregate, densify, decompose, optionally
//! optimise, project. A failed Holt-Winters parameter search falls back to
//! average seasonality when `fallback_to_average` is set; the returned
//! [`ForecastResult::method`] always names the mode that produced the numbers.

use crate::config::{ForecastConfig, SeasonalMode};
use crate::data::{aggregate, MonthlyPoint, MonthlySeries, Transaction};
use crate::error::Result;
use crate::metrics::fit_accuracy;
use crate::models::seasonal::fit_holt_winters;
use crate::models::{
    fit_trend, Combination, ForecastPoint, ForecastResult, SeasonalFactors, SeasonalModel,
    SmoothingParameters, TrendLine,
};
use crate::optimizer::{optimize, OptimizerSettings};
use crate::projector::{project, ConfidenceBand};
use revenue_math::exponential_smoothing;
use tracing::{debug, info, warn};

/// Projection produced by one seasonal strategy
struct Projection {
    forecast: Vec<ForecastPoint>,
    fit_error: f64,
    method: SeasonalMode,
    parameters: Option<SmoothingParameters>,
}

/// Forecast monthly revenue from transaction records.
///
/// Empty input is `InsufficientData`, as is a Holt-Winters request with fewer
/// than two full periods of months.
pub fn forecast_revenue<T: Transaction>(
    records: &[T],
    config: &ForecastConfig,
) -> Result<ForecastResult> {
    config.validate()?;

    let historic = aggregate(records)?;
    let series = MonthlySeries::from_points(&historic)?;
    debug!(
        observed = historic.len(),
        months = series.len(),
        gaps = series.gap_count(),
        start = %series.start(),
        "aggregated revenue series"
    );

    let projection = match config.seasonal_mode {
        SeasonalMode::Average => average_projection(&series, config)?,
        SeasonalMode::HoltWinters => with_fallback(
            holt_winters_projection(&series, config),
            config,
            || average_projection(&series, config),
        )?,
    };

    info!(
        method = %projection.method,
        months = series.len(),
        horizon = projection.forecast.len(),
        fit_error = projection.fit_error,
        "revenue forecast ready"
    );

    Ok(assemble(historic, projection))
}

/// Replace a recoverable Holt-Winters failure with the fallback projection
fn with_fallback<F>(
    attempt: Result<Projection>,
    config: &ForecastConfig,
    fallback: F,
) -> Result<Projection>
where
    F: FnOnce() -> Result<Projection>,
{
    match attempt {
        Err(err) if err.is_recoverable() && config.fallback_to_average => {
            warn!(error = %err, "falling back to average seasonality");
            fallback()
        }
        other => other,
    }
}

fn assemble(historic: Vec<MonthlyPoint>, projection: Projection) -> ForecastResult {
    ForecastResult {
        historic,
        forecast: projection.forecast,
        fit_error: projection.fit_error,
        method: projection.method,
        parameters: projection.parameters,
    }
}

/// Least-squares trend times month-of-period factors
fn average_projection(series: &MonthlySeries, config: &ForecastConfig) -> Result<Projection> {
    let period_length = config.period()?;

    let model_series = match config.trend_smoothing {
        Some(alpha) => series.with_values(exponential_smoothing(series.values(), alpha)?)?,
        None => series.clone(),
    };

    let trend = fit_trend(model_series.values())?;
    let factors = SeasonalModel::Average.decompose(&model_series, period_length)?;

    let fitted = in_sample(&trend, &factors, series);
    let accuracy = fit_accuracy(series.values(), &fitted)?;
    debug!(
        slope = trend.slope,
        intercept = trend.intercept,
        r_squared = ?trend.r_squared(model_series.values()),
        %accuracy,
        "average model fitted"
    );

    let forecast = project(
        &trend,
        &factors,
        series.last_period(),
        config.horizon_months,
        None,
    )?;

    Ok(Projection {
        forecast,
        fit_error: accuracy.rmse,
        method: SeasonalMode::Average,
        parameters: None,
    })
}

/// Optimised additive Holt-Winters with residual confidence bounds
fn holt_winters_projection(series: &MonthlySeries, config: &ForecastConfig) -> Result<Projection> {
    let period_length = config.period()?;
    let settings = OptimizerSettings {
        initial_guess: config.initial_guess()?,
        max_iterations: config.max_iterations,
        ..OptimizerSettings::default()
    };

    let optimized = optimize(series, period_length, &settings)?;
    let fit = fit_holt_winters(series, period_length, optimized.parameters)?;

    let trend = TrendLine::from_level(fit.level, fit.trend, series.len());
    let band = ConfidenceBand::from_residuals(config.confidence_level, &fit.residuals)?;
    let factors = SeasonalFactors::from_factors(Combination::Additive, fit.seasonal)?;

    let forecast = project(
        &trend,
        &factors,
        series.last_period(),
        config.horizon_months,
        Some(&band),
    )?;

    Ok(Projection {
        forecast,
        fit_error: optimized.rmse,
        method: SeasonalMode::HoltWinters,
        parameters: Some(optimized.parameters),
    })
}

/// Model values at every observed position
fn in_sample(trend: &TrendLine, factors: &SeasonalFactors, series: &MonthlySeries) -> Vec<f64> {
    (0..series.len())
        .map(|i| factors.apply(trend.value_at(i as f64), series.period_at(i)))
        .collect()
}
