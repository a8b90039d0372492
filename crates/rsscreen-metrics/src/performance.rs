//! Windowed price performance.

use chrono::Datelike;
use rsscreen_core::{Instrument, LookbackWindow, Symbol};
use serde::{Deserialize, Serialize};

/// Percent price change of one instrument over one lookback window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Window label, e.g. `3M`.
    pub window: String,
    /// Percent change, or `None` when the series has fewer than
    /// `periods + 1` observations.
    pub value: Option<f64>,
}

/// Percent change between the latest close and the close exactly
/// `window.periods()` observations earlier.
///
/// Lookback counts observations rather than calendar days, so holidays and
/// gaps do not stretch the window.
pub fn performance(instrument: &Instrument, window: &LookbackWindow) -> PerformanceRecord {
    let value = instrument
        .close_periods_ago(window.periods())
        .map(|past| percent_change(past, instrument.latest_close()));

    PerformanceRecord {
        symbol: instrument.symbol().to_string(),
        window: window.label().to_string(),
        value,
    }
}

/// Year-to-date percent change, measured from the last close of the previous
/// calendar year.
///
/// `None` when the series has no observation in the previous calendar year.
pub fn ytd_performance(instrument: &Instrument) -> Option<f64> {
    let year = instrument.latest_date().year();
    let base = instrument
        .points()
        .take_while(|p| p.date.year() < year)
        .last()
        .filter(|p| p.date.year() == year - 1)?;
    Some(percent_change(base.close, instrument.latest_close()))
}

fn percent_change(from: f64, to: f64) -> f64 {
    (to - from) / from * 100.0
}
