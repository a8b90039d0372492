//! Common types used throughout the rsscreen engine.
//!
//! This module defines the validated per-instrument price series and the
//! derived indicator series that the metrics and screening stages consume.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// An instrument identifier, typically an ETF ticker such as "SPY".
pub type Symbol = String;

/// A single `(date, close)` observation as delivered by a market-data source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: Date,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new observation.
    pub const fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

impl From<(Date, f64)> for PricePoint {
    fn from((date, close): (Date, f64)) -> Self {
        Self { date, close }
    }
}

/// A validated closing-price series for one instrument.
///
/// Construction enforces the series invariants:
/// - at least one observation,
/// - dates strictly increasing (no duplicates),
/// - every close finite and strictly positive.
///
/// The value is immutable once built. Gaps in the calendar are kept as gaps;
/// all lookbacks index by observation count, not by calendar time.
#[derive(Debug, Clone)]
pub struct Instrument {
    symbol: Symbol,
    dates: Vec<Date>,
    closes: Array1<f64>,
}

impl Instrument {
    /// Validates `points` and builds an instrument.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] if the symbol or series is empty, if dates are
    /// duplicated or out of order, or if a close is not a positive finite
    /// number.
    pub fn new<S, I, P>(symbol: S, points: I) -> Result<Self, DataError>
    where
        S: Into<Symbol>,
        I: IntoIterator<Item = P>,
        P: Into<PricePoint>,
    {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(DataError::EmptySymbol);
        }

        let points: Vec<PricePoint> = points.into_iter().map(Into::into).collect();
        if points.is_empty() {
            return Err(DataError::EmptySeries(symbol));
        }

        let mut dates: Vec<Date> = Vec::with_capacity(points.len());
        let mut closes: Vec<f64> = Vec::with_capacity(points.len());

        for point in &points {
            if let Some(&previous) = dates.last() {
                if point.date == previous {
                    return Err(DataError::DuplicateDate {
                        symbol,
                        date: point.date,
                    });
                }
                if point.date < previous {
                    return Err(DataError::NonMonotonicDates {
                        symbol,
                        previous,
                        current: point.date,
                    });
                }
            }
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(DataError::InvalidPrice {
                    symbol,
                    date: point.date,
                    price: point.close,
                });
            }
            dates.push(point.date);
            closes.push(point.close);
        }

        Ok(Self {
            symbol,
            dates,
            closes: Array1::from_vec(closes),
        })
    }

    /// Returns the instrument symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false for a validated instrument.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observation dates, oldest first.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Closing prices, oldest first.
    pub const fn closes(&self) -> &Array1<f64> {
        &self.closes
    }

    /// The most recent close.
    pub fn latest_close(&self) -> f64 {
        self.closes[self.closes.len() - 1]
    }

    /// The most recent observation date.
    pub fn latest_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Close `periods` observations before the latest one, if the series is
    /// long enough.
    pub fn close_periods_ago(&self, periods: usize) -> Option<f64> {
        let last = self.len() - 1;
        last.checked_sub(periods).map(|i| self.closes[i])
    }

    /// Iterates over the observations, oldest first.
    pub fn points(&self) -> impl Iterator<Item = PricePoint> + '_ {
        self.dates
            .iter()
            .zip(self.closes.iter())
            .map(|(&date, &close)| PricePoint { date, close })
    }
}

/// A derived per-observation series such as `SMA_200` or `EMA_20`.
///
/// `values[i]` is aligned with the instrument's `i`-th observation. Positions
/// before the indicator has enough history are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendIndicator {
    /// Symbol of the instrument the series was computed from.
    pub symbol: Symbol,
    /// Indicator name, e.g. `SMA_50`.
    pub name: String,
    /// Aligned values with a missing prefix.
    pub values: Vec<Option<f64>>,
}

impl TrendIndicator {
    /// Creates a new indicator series.
    pub fn new(symbol: impl Into<Symbol>, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            values,
        }
    }

    /// Value at the latest observation.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Value at observation `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Index of the first defined value.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    /// Series length (equals the instrument's observation count).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true for a zero-length series.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> Date {
        Date::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_instrument_new() {
        let inst = Instrument::new("SPY", vec![(date(2), 470.0), (date(3), 472.5)]).unwrap();
        assert_eq!(inst.symbol(), "SPY");
        assert_eq!(inst.len(), 2);
        assert_eq!(inst.latest_close(), 472.5);
        assert_eq!(inst.latest_date(), date(3));
    }

    #[test]
    fn test_instrument_empty_series() {
        let result = Instrument::new("SPY", Vec::<PricePoint>::new());
        assert!(matches!(result, Err(DataError::EmptySeries(_))));
    }

    #[test]
    fn test_instrument_empty_symbol() {
        let result = Instrument::new("  ", vec![(date(2), 1.0)]);
        assert!(matches!(result, Err(DataError::EmptySymbol)));
    }

    #[test]
    fn test_instrument_duplicate_date() {
        let result = Instrument::new("SPY", vec![(date(2), 1.0), (date(2), 1.1)]);
        assert!(matches!(result, Err(DataError::DuplicateDate { .. })));
    }

    #[test]
    fn test_instrument_non_monotonic() {
        let result = Instrument::new("SPY", vec![(date(3), 1.0), (date(2), 1.1)]);
        assert!(matches!(result, Err(DataError::NonMonotonicDates { .. })));
    }

    #[test]
    fn test_instrument_invalid_price() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = Instrument::new("SPY", vec![(date(2), 1.0), (date(3), bad)]);
            assert!(matches!(result, Err(DataError::InvalidPrice { .. })));
        }
    }

    #[test]
    fn test_close_periods_ago() {
        let inst = Instrument::new(
            "IWM",
            vec![(date(2), 10.0), (date(3), 11.0), (date(4), 12.0)],
        )
        .unwrap();
        assert_eq!(inst.close_periods_ago(0), Some(12.0));
        assert_eq!(inst.close_periods_ago(2), Some(10.0));
        assert_eq!(inst.close_periods_ago(3), None);
    }

    #[test]
    fn test_trend_indicator_accessors() {
        let ind = TrendIndicator::new("SPY", "SMA_2", vec![None, Some(1.5), Some(2.5)]);
        assert_eq!(ind.latest(), Some(2.5));
        assert_eq!(ind.get(0), None);
        assert_eq!(ind.first_defined(), Some(1));
        assert_eq!(ind.len(), 3);

        let undefined = TrendIndicator::new("SPY", "SMA_5", vec![None, None]);
        assert_eq!(undefined.latest(), None);
        assert_eq!(undefined.first_defined(), None);
    }
}
