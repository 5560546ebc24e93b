use chrono::NaiveDate;
use forecast_engine::{forecast_revenue, ForecastConfig, SeasonalMode, TransactionRecord};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Engine: Basic Revenue Forecast");
    println!("=======================================\n");

    let records = create_sample_invoices()?;
    println!("Sample ledger created: {} invoices\n", records.len());

    // Average seasonality works from a single month of history
    let average = forecast_revenue(&records, &ForecastConfig::new(6, SeasonalMode::Average))?;
    println!("Average seasonality (fit RMSE {:.2}):", average.fit_error);
    for point in &average.forecast {
        println!("  {}: {}", point.period, point.value);
    }

    // Holt-Winters needs two full years and reports confidence bounds
    let config = ForecastConfig::new(6, SeasonalMode::HoltWinters).with_confidence_level(0.9);
    let holt_winters = forecast_revenue(&records, &config)?;
    println!(
        "\nHolt-Winters (method {}, fit RMSE {:.2}):",
        holt_winters.method, holt_winters.fit_error
    );
    if let Some(params) = holt_winters.parameters {
        println!(
            "  alpha {:.3}, beta {:.3}, gamma {:.3}",
            params.alpha, params.beta, params.gamma
        );
    }
    for point in &holt_winters.forecast {
        println!(
            "  {}: {} [{} .. {}]",
            point.period, point.value, point.lower_bound, point.upper_bound
        );
    }

    println!("\nProjected total: {}", holt_winters.forecast_total());

    Ok(())
}

/// Two invoices a month over three years, busier towards December
fn create_sample_invoices() -> Result<Vec<TransactionRecord>, Box<dyn std::error::Error>> {
    let mut records = Vec::new();

    for year in 2022..2025 {
        for month in 1..=12u32 {
            let growth = (year - 2022) as i64 * 120;
            let season = month as i64 * 25;
            for (day, base) in [(5, 800i64), (20, 450i64)] {
                let date = NaiveDate::from_ymd_opt(year, month, day).ok_or("invalid date")?;
                let cents = (base + growth + season) * 100 + 99;
                records.push(TransactionRecord::new(date, Decimal::new(cents, 2)));
            }
        }
    }

    Ok(records)
}
