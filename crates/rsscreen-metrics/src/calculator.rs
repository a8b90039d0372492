//! Per-instrument metrics bundle.
//!
//! [`MetricsCalculator`] derives everything the ranking and screening stages
//! need from a single instrument. It reads only that instrument's series and
//! the shared window catalog, so instruments can be processed in parallel.

use std::collections::HashMap;

use rsscreen_core::{Date, Instrument, Symbol, TrendIndicator, WindowCatalog};
use serde::Serialize;

use crate::performance::{PerformanceRecord, performance, ytd_performance};
use crate::registry::IndicatorSpec;
use crate::trend::{TrendFlagSpec, compare_latest};

/// Value of one named trend flag for one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendFlag {
    /// Flag name.
    pub name: String,
    /// `None` when either side is undefined at the latest observation.
    pub value: Option<bool>,
}

/// Everything derived from one instrument in one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentMetrics {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Number of observations.
    pub observations: usize,
    /// Latest observation date.
    pub latest_date: Date,
    /// Latest close.
    pub latest_close: f64,
    /// Year-to-date percent change.
    pub ytd: Option<f64>,
    /// One record per catalog window, in catalog order.
    pub performance: Vec<PerformanceRecord>,
    /// One flag per configured flag, in configuration order.
    pub flags: Vec<TrendFlag>,
}

impl InstrumentMetrics {
    /// Performance value for a window label.
    pub fn performance_for(&self, window: &str) -> Option<f64> {
        self.performance
            .iter()
            .find(|r| r.window == window)
            .and_then(|r| r.value)
    }

    /// Value of a named flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.iter().find(|f| f.name == name).and_then(|f| f.value)
    }
}

/// Computes [`InstrumentMetrics`] for a fixed window catalog and flag set.
#[derive(Debug, Clone)]
pub struct MetricsCalculator {
    windows: WindowCatalog,
    flags: Vec<TrendFlagSpec>,
}

impl MetricsCalculator {
    /// Create a calculator.
    #[must_use]
    pub const fn new(windows: WindowCatalog, flags: Vec<TrendFlagSpec>) -> Self {
        Self { windows, flags }
    }

    /// The window catalog.
    #[must_use]
    pub const fn windows(&self) -> &WindowCatalog {
        &self.windows
    }

    /// Configured trend flags.
    #[must_use]
    pub fn flags(&self) -> &[TrendFlagSpec] {
        &self.flags
    }

    /// Derives all metrics for one instrument.
    ///
    /// Never fails: windows or indicators the series is too short for come
    /// back as `None`.
    pub fn compute(&self, instrument: &Instrument) -> InstrumentMetrics {
        let performance = self
            .windows
            .iter()
            .map(|window| performance(instrument, window))
            .collect();

        // Flags often share an indicator (e.g. SMA_50 on both sides of two flags).
        let mut cache: HashMap<IndicatorSpec, TrendIndicator> = HashMap::new();
        let flags = self
            .flags
            .iter()
            .map(|spec| {
                cache_indicator(&mut cache, spec.fast, instrument);
                cache_indicator(&mut cache, spec.slow, instrument);
                let value = cache
                    .get(&spec.fast)
                    .zip(cache.get(&spec.slow))
                    .and_then(|(fast, slow)| compare_latest(fast, slow));
                TrendFlag {
                    name: spec.name.clone(),
                    value,
                }
            })
            .collect();

        InstrumentMetrics {
            symbol: instrument.symbol().to_string(),
            observations: instrument.len(),
            latest_date: instrument.latest_date(),
            latest_close: instrument.latest_close(),
            ytd: ytd_performance(instrument),
            performance,
            flags,
        }
    }

    /// Full indicator series for one instrument, for callers that chart or
    /// inspect crossovers rather than just the latest flag.
    pub fn indicator_series(&self, instrument: &Instrument, spec: IndicatorSpec) -> TrendIndicator {
        spec.build().compute(instrument)
    }

    /// Latest-point comparison of two arbitrary indicators.
    pub fn compare(&self, instrument: &Instrument, fast: IndicatorSpec, slow: IndicatorSpec) -> Option<bool> {
        compare_latest(
            &self.indicator_series(instrument, fast),
            &self.indicator_series(instrument, slow),
        )
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new(WindowCatalog::default(), TrendFlagSpec::defaults())
    }
}

fn cache_indicator(cache: &mut HashMap<IndicatorSpec, TrendIndicator>, spec: IndicatorSpec, instrument: &Instrument) {
    cache
        .entry(spec)
        .or_insert_with(|| spec.build().compute(instrument));
}
