//! Metrics for the rsscreen relative-strength screener.
//!
//! This crate derives per-instrument figures from validated price history:
//! - Performance: percent change over each lookback window, plus year-to-date
//! - Moving averages: simple (complete windows only) and exponential
//! - Trend flags: fast indicator above slow indicator at the latest point
//!
//! Insufficient history never errors. It yields `None`, which later stages
//! carry through as a missing rating or a failed filter.
//!
//! # Example
//!
//! ```ignore
//! use rsscreen_metrics::{MetricsCalculator, simple_moving_average};
//!
//! let calculator = MetricsCalculator::default();
//! let metrics = calculator.compute(&instrument);
//! let sma = simple_moving_average(&instrument, 200);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod calculator;
pub mod moving_average;
pub mod performance;
pub mod registry;
pub mod trend;

// Re-export key types
pub use calculator::{InstrumentMetrics, MetricsCalculator, TrendFlag};
pub use moving_average::{Close, Ema, Sma, exponential_moving_average, simple_moving_average};
pub use performance::{PerformanceRecord, performance, ytd_performance};
pub use registry::{IndicatorInfo, IndicatorKind, IndicatorSpec, available_indicators};
pub use trend::{TrendFlagSpec, compare_latest, trend_flag, trend_flag_series};
