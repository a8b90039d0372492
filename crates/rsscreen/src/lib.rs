#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rsscreen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # rsscreen
//!
//! Relative-strength ranking and screening for ETF universes.
//!
//! rsscreen is an umbrella crate that re-exports the rsscreen sub-crates and
//! adds the [`ScreeningEngine`] that wires them together.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rsscreen::prelude::*;
//!
//! # fn main() -> rsscreen::Result<()> {
//! let config = EngineConfig::default()
//!     .with_filter(ScreeningCriterion::new("Above200MA", "==", Operand::Bool(true)))
//!     .with_sort(SortSpec::descending("RS_3M"));
//! let engine = ScreeningEngine::new(config)?;
//!
//! // symbol -> [(date, close)], oldest first
//! let report = engine.run_series(series)?;
//! let table = report.to_dataframe()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Price history, lookback windows, the [`Indicator`] trait and errors
//! - [`metrics`] - Performance, moving averages and trend flags
//! - [`rank`] - Cross-sectional percentile ratings
//! - [`screen`] - Filter and sort pipeline
//!
//! ## Architecture
//!
//! 1. **Ingestion** validates each series (dates strictly increasing, prices positive)
//! 2. **Metrics** are derived per instrument, independently and in parallel
//! 3. **Ranking** turns each window's performance into a 0–99 rating across the universe
//! 4. **Screening** filters with AND semantics, sorts and truncates
//!
//! Missing data never becomes an error or a default value: a window longer
//! than the history yields no performance, no rating and a failed filter.

/// Version information for the rsscreen crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod engine;
mod report;

pub use config::EngineConfig;
pub use engine::ScreeningEngine;
pub use report::ScreeningReport;

// ============================================================================
// Core
// ============================================================================

/// Data model, price history store and error taxonomy.
///
/// # Example
///
/// ```ignore
/// use rsscreen::model::{IngestMode, PriceHistory};
///
/// let history = PriceHistory::ingest(series, IngestMode::Isolate)?;
/// for rejection in history.rejected() {
///     eprintln!("{}: {}", rejection.symbol, rejection.error);
/// }
/// ```
pub mod model {
    pub use rsscreen_core::*;
}

// Re-export core types at top level for convenience
pub use rsscreen_core::{
    ConfigError, DataError, Date, Indicator, IngestMode, Instrument, LookbackWindow, PriceHistory,
    PricePoint, Result, ScreenError, Symbol, WindowCatalog,
};

// ============================================================================
// Metrics
// ============================================================================

/// Per-instrument metrics.
///
/// ## Indicators
///
/// - **Close**: the raw price series
/// - **SMA_n**: simple moving average, defined from the n-th observation on
/// - **EMA_n**: exponential moving average with `alpha = 2 / (n + 1)`
///
/// ## Default Trend Flags
///
/// | Flag | Fast | Slow |
/// |---|---|---|
/// | `Above20EMA` | `Close` | `EMA_20` |
/// | `Above50MA` | `Close` | `SMA_50` |
/// | `Above200MA` | `Close` | `SMA_200` |
/// | `50Above200` | `SMA_50` | `SMA_200` |
pub mod metrics {
    pub use rsscreen_metrics::*;
}

// ============================================================================
// Ranking
// ============================================================================

/// Cross-sectional ranking.
///
/// For each window, instruments with a defined performance are ranked with
/// average ranks for ties:
///
/// ```text
/// RS = round(rank / n × 99, 2)
/// ```
///
/// where `n` counts only instruments with a defined performance.
pub mod rank {
    pub use rsscreen_rank::*;
}

// ============================================================================
// Screening
// ============================================================================

/// Filter and sort pipeline.
pub mod screen {
    pub use rsscreen_screen::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use rsscreen::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{EngineConfig, ScreeningEngine, ScreeningReport};
    pub use crate::{Result, ScreenError};
    pub use rsscreen_core::{IngestMode, PriceHistory, WindowCatalog};
    pub use rsscreen_metrics::{IndicatorSpec, TrendFlagSpec};
    pub use rsscreen_screen::{Operand, RankedRow, ScreeningCriterion, SortSpec};
}
