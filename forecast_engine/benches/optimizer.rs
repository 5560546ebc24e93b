//! Benchmarks for the Holt-Winters parameter search and the full forecast.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use forecast_engine::optimizer::{optimize, OptimizerSettings};
use forecast_engine::{
    aggregate, forecast_revenue, ForecastConfig, MonthPeriod, MonthlySeries, SeasonalMode,
    TransactionRecord,
};
use rust_decimal::Decimal;

fn create_records(months: usize) -> Vec<TransactionRecord> {
    let first = MonthPeriod::new(2015, 1).unwrap();
    (0..months)
        .map(|i| {
            let trend = 1000 + 12 * i as i64;
            let season = ((i as f64 / 12.0) * std::f64::consts::TAU).sin() * 150.0;
            let period = first.add_months(i as i64);
            TransactionRecord::new(
                period.first_day().unwrap(),
                Decimal::from(trend + season as i64),
            )
        })
        .collect()
}

fn bench_optimizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("HoltWintersSearch");

    for months in [24, 60, 120].iter() {
        let points = aggregate(&create_records(*months)).unwrap();
        let series = MonthlySeries::from_points(&points).unwrap();
        let settings = OptimizerSettings::default();

        group.bench_with_input(BenchmarkId::new("optimize", months), &series, |b, series| {
            b.iter(|| optimize(black_box(series), 12, black_box(&settings)));
        });
    }

    group.finish();
}

fn bench_forecast(c: &mut Criterion) {
    let records = create_records(60);
    let mut group = c.benchmark_group("ForecastRevenue");

    for mode in [SeasonalMode::Average, SeasonalMode::HoltWinters] {
        let config = ForecastConfig::new(12, mode);
        group.bench_function(mode.to_string(), |b| {
            b.iter(|| forecast_revenue(black_box(&records), black_box(&config)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_optimizer, bench_forecast);
criterion_main!(benches);
