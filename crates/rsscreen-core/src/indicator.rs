//! Indicator trait for per-instrument trend series.
//!
//! An indicator maps one instrument's closing prices to an aligned series
//! (moving averages, the raw close). Trend flags compare two indicators at the
//! latest observation.

use crate::types::{Instrument, TrendIndicator};

/// A per-instrument series derived from closing prices.
///
/// Implementations must be thread-safe (`Send + Sync`) so the metrics stage
/// can evaluate instruments on a worker pool.
///
/// # Example
///
/// ```
/// use rsscreen_core::{Indicator, Instrument, TrendIndicator};
///
/// struct LogClose;
///
/// impl Indicator for LogClose {
///     fn name(&self) -> &str {
///         "LOG_CLOSE"
///     }
///
///     fn lookback(&self) -> usize {
///         1
///     }
///
///     fn compute(&self, instrument: &Instrument) -> TrendIndicator {
///         let values = instrument.closes().iter().map(|c| Some(c.ln())).collect();
///         TrendIndicator::new(instrument.symbol(), self.name(), values)
///     }
/// }
/// ```
pub trait Indicator: Send + Sync {
    /// Indicator name, e.g. `SMA_200`. Used as the series name.
    fn name(&self) -> &str;

    /// Observations needed before the first defined value.
    fn lookback(&self) -> usize;

    /// Computes the series, aligned with the instrument's observations.
    ///
    /// Positions without enough history are `None`; this never fails.
    fn compute(&self, instrument: &Instrument) -> TrendIndicator;
}
