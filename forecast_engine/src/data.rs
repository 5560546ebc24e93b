//! Transaction records and the monthly aggregator
//!
//! Raw records are summed per calendar month with exact decimal arithmetic.
//! The resulting [`MonthlyPoint`]s are sparse: months without transactions are
//! not reported. [`MonthlySeries`] is the dense `f64` view the models run on.

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Anything that carries a booking date and a non-negative amount
pub trait Transaction {
    /// Date the revenue was booked
    fn occurred_on(&self) -> NaiveDate;

    /// Amount booked, expected to be non-negative
    fn amount(&self) -> Decimal;
}

/// Plain transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Booking date
    pub occurred_on: NaiveDate,
    /// Booked amount
    pub amount: Decimal,
}

impl TransactionRecord {
    /// Create a new transaction record
    pub fn new(occurred_on: NaiveDate, amount: Decimal) -> Self {
        Self {
            occurred_on,
            amount,
        }
    }
}

impl Transaction for TransactionRecord {
    fn occurred_on(&self) -> NaiveDate {
        self.occurred_on
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// Create a period from a year and a 1-based month
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidArgument(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// Period containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Get the year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Get the 1-based month
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Months elapsed since January of year 0
    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Period `months` months later (or earlier when negative)
    pub fn add_months(&self, months: i64) -> Self {
        Self::from_ordinal(self.ordinal() + months)
    }

    /// The following month
    pub fn succ(&self) -> Self {
        self.add_months(1)
    }

    /// Signed number of months from `earlier` to `self`
    pub fn months_since(&self, earlier: MonthPeriod) -> i64 {
        self.ordinal() - earlier.ordinal()
    }

    /// Position of this month within a repeating cycle of `period_length` months.
    ///
    /// Anchored to the calendar: with a 12 month cycle January is 0 and
    /// December is 11, with a 3 month cycle each quarter starts at 0.
    pub fn season_index(&self, period_length: usize) -> usize {
        if period_length == 0 {
            return 0;
        }
        self.ordinal().rem_euclid(period_length as i64) as usize
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Revenue booked in one observed month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Calendar month
    pub period: MonthPeriod,
    /// Exact sum of the month's amounts
    pub total: Decimal,
}

/// Sum transaction amounts per calendar month.
///
/// Returns one point per month that has at least one record, in ascending
/// order. Empty input gives an empty result. A negative amount is rejected.
pub fn aggregate<T: Transaction>(records: &[T]) -> Result<Vec<MonthlyPoint>> {
    let mut monthly: BTreeMap<MonthPeriod, Decimal> = BTreeMap::new();

    for (i, record) in records.iter().enumerate() {
        let amount = record.amount();
        if amount < Decimal::ZERO {
            return Err(ForecastError::InvalidArgument(format!(
                "Record {} dated {} has negative amount {}",
                i,
                record.occurred_on(),
                amount
            )));
        }

        let period = MonthPeriod::from_date(record.occurred_on());
        let total = monthly.entry(period).or_insert(Decimal::ZERO);
        *total = total.checked_add(amount).ok_or_else(|| {
            ForecastError::InvalidArgument(format!("Revenue total for {} overflows", period))
        })?;
    }

    Ok(monthly
        .into_iter()
        .map(|(period, total)| MonthlyPoint { period, total })
        .collect())
}

/// Dense monthly series used as model input
///
/// Covers every month from the first to the last observed one. Months without
/// revenue are present with a value of 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    start: MonthPeriod,
    values: Vec<f64>,
    observed: usize,
}

impl MonthlySeries {
    /// Build the dense series from aggregated points
    pub fn from_points(points: &[MonthlyPoint]) -> Result<Self> {
        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first.period, last.period),
            _ => {
                return Err(ForecastError::InsufficientData(
                    "No observed months to build a series from".to_string(),
                ))
            }
        };

        if points.windows(2).any(|w| w[0].period >= w[1].period) {
            return Err(ForecastError::InvalidArgument(
                "Monthly points must be strictly increasing by period".to_string(),
            ));
        }

        let len = last.months_since(first) as usize + 1;
        let mut values = vec![0.0; len];
        for point in points {
            let value = point.total.to_f64().ok_or_else(|| {
                ForecastError::InvalidArgument(format!(
                    "Total {} for {} is not representable as f64",
                    point.total, point.period
                ))
            })?;
            values[point.period.months_since(first) as usize] = value;
        }

        Ok(Self {
            start: first,
            values,
            observed: points.len(),
        })
    }

    /// Same calendar span with replacement values, e.g. a smoothed copy
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.values.len() {
            return Err(ForecastError::InvalidArgument(format!(
                "Replacement values length ({}) doesn't match series length ({})",
                values.len(),
                self.values.len()
            )));
        }
        Ok(Self {
            start: self.start,
            values,
            observed: self.observed,
        })
    }

    /// First month of the series
    pub fn start(&self) -> MonthPeriod {
        self.start
    }

    /// Last month of the series
    pub fn last_period(&self) -> MonthPeriod {
        self.start.add_months(self.values.len() as i64 - 1)
    }

    /// Month at position `index`
    pub fn period_at(&self, index: usize) -> MonthPeriod {
        self.start.add_months(index as i64)
    }

    /// Get the values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of months covered, gaps included
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series covers no months
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of months that had at least one record
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Number of zero-filled months
    pub fn gap_count(&self) -> usize {
        self.values.len() - self.observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn record(date: &str, amount: &str) -> TransactionRecord {
        TransactionRecord::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            Decimal::from_str(amount).unwrap(),
        )
    }

    #[test]
    fn test_month_arithmetic() {
        let dec = MonthPeriod::new(2023, 12).unwrap();
        assert_eq!(dec.succ(), MonthPeriod::new(2024, 1).unwrap());
        assert_eq!(dec.add_months(-12), MonthPeriod::new(2022, 12).unwrap());
        assert_eq!(dec.add_months(14), MonthPeriod::new(2025, 2).unwrap());
        assert_eq!(
            MonthPeriod::new(2025, 2).unwrap().months_since(dec),
            14
        );
        assert_eq!(dec.to_string(), "2023-12");
        assert!(MonthPeriod::new(2023, 13).is_err());
    }

    #[test]
    fn test_season_index_is_calendar_anchored() {
        let jan = MonthPeriod::new(2024, 1).unwrap();
        let dec = MonthPeriod::new(2024, 12).unwrap();
        assert_eq!(jan.season_index(12), 0);
        assert_eq!(dec.season_index(12), 11);
        assert_eq!(jan.season_index(3), 0);
        assert_eq!(MonthPeriod::new(2024, 5).unwrap().season_index(3), 1);
    }

    #[test]
    fn test_aggregate_sums_exactly() {
        let records = vec![
            record("2024-01-03", "0.10"),
            record("2024-01-17", "0.20"),
            record("2024-01-31", "0.30"),
        ];
        let points = aggregate(&records).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].total, Decimal::from_str("0.60").unwrap());
    }

    #[test]
    fn test_aggregate_sorts_and_keeps_gaps_sparse() {
        let records = vec![
            record("2024-03-01", "30"),
            record("2024-01-15", "10"),
            record("2024-03-20", "5"),
        ];
        let points = aggregate(&records).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].period, MonthPeriod::new(2024, 1).unwrap());
        assert_eq!(points[1].total, Decimal::from(35));
    }

    #[test]
    fn test_aggregate_rejects_negative_amount() {
        let records = vec![record("2024-03-01", "-1")];
        assert!(matches!(
            aggregate(&records),
            Err(ForecastError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_series_zero_fills_gaps() {
        let records = vec![record("2024-01-15", "10"), record("2024-04-15", "40")];
        let series = MonthlySeries::from_points(&aggregate(&records).unwrap()).unwrap();
        assert_eq!(series.values(), &[10.0, 0.0, 0.0, 40.0]);
        assert_eq!(series.gap_count(), 2);
        assert_eq!(series.last_period(), MonthPeriod::new(2024, 4).unwrap());
    }

    #[test]
    fn test_series_from_no_points() {
        assert!(matches!(
            MonthlySeries::from_points(&[]),
            Err(ForecastError::InsufficientData(_))
        ));
    }
}
