//! Simple and exponential moving averages.

use ndarray::Array1;
use rsscreen_core::{Indicator, Instrument, TrendIndicator};

/// Simple moving average over the trailing `length` closes.
///
/// The value at index `i` is defined only when the full window
/// `[i + 1 - length, i]` exists, so the first `length - 1` positions are
/// `None`. Partial windows are never averaged. A zero `length` yields an
/// all-missing series.
pub fn simple_moving_average(instrument: &Instrument, length: usize) -> TrendIndicator {
    TrendIndicator::new(
        instrument.symbol(),
        format!("SMA_{length}"),
        sma_values(instrument.closes(), length),
    )
}

/// Exponential moving average with smoothing factor `2 / (span + 1)`.
///
/// Seeded with the first close (`EMA[0] = close[0]`), so every position is
/// defined. A zero `span` yields an all-missing series.
pub fn exponential_moving_average(instrument: &Instrument, span: usize) -> TrendIndicator {
    TrendIndicator::new(
        instrument.symbol(),
        format!("EMA_{span}"),
        ema_values(instrument.closes(), span),
    )
}

fn sma_values(closes: &Array1<f64>, length: usize) -> Vec<Option<f64>> {
    let n = closes.len();
    if length == 0 || length > n {
        return vec![None; n];
    }

    let mut values = vec![None; length - 1];
    values.extend(closes.windows(length).into_iter().map(|w| w.mean()));
    values
}

fn ema_values(closes: &Array1<f64>, span: usize) -> Vec<Option<f64>> {
    if span == 0 {
        return vec![None; closes.len()];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev: Option<f64> = None;
    closes
        .iter()
        .map(|&close| {
            let ema = match prev {
                None => close,
                Some(p) => alpha * close + (1.0 - alpha) * p,
            };
            prev = Some(ema);
            Some(ema)
        })
        .collect()
}

/// The raw close as an indicator, so flags like "close above SMA_200" compare
/// two series of the same shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct Close;

impl Indicator for Close {
    fn name(&self) -> &str {
        "Close"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, instrument: &Instrument) -> TrendIndicator {
        let values = instrument.closes().iter().map(|&c| Some(c)).collect();
        TrendIndicator::new(instrument.symbol(), self.name(), values)
    }
}

/// Simple moving average indicator.
#[derive(Debug, Clone)]
pub struct Sma {
    length: usize,
    name: String,
}

impl Sma {
    /// Create a new SMA over `length` observations.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length,
            name: format!("SMA_{length}"),
        }
    }

    /// Window length in observations.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.length
    }

    fn compute(&self, instrument: &Instrument) -> TrendIndicator {
        simple_moving_average(instrument, self.length)
    }
}

/// Exponential moving average indicator.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    /// Create a new EMA with the given span.
    #[must_use]
    pub fn new(span: usize) -> Self {
        Self {
            span,
            name: format!("EMA_{span}"),
        }
    }

    /// Smoothing span.
    #[must_use]
    pub const fn span(&self) -> usize {
        self.span
    }

    /// Smoothing factor `2 / (span + 1)`.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        2.0 / (self.span as f64 + 1.0)
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    // Seeded from the first close, so defined from the first observation.
    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, instrument: &Instrument) -> TrendIndicator {
        exponential_moving_average(instrument, self.span)
    }
}
