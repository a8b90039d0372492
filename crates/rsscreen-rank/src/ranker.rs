//! Cross-sectional relative-strength ranking.
//!
//! Ranking needs the whole population for a window, so it runs only after
//! every instrument's performance for that window is available. Windows are
//! independent of each other: a window where most instruments lack history
//! still ranks the ones that have it, and never affects other windows.

use rsscreen_core::{Symbol, WindowCatalog};
use rsscreen_metrics::{InstrumentMetrics, PerformanceRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ranks::percentile_ratings;

/// Relative-strength rating of one instrument in one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsRating {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Window label.
    pub window: String,
    /// Percentile in `[0, 99]`, or `None` when performance is missing.
    pub percentile: Option<f64>,
}

/// Ratings of the whole universe for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRatings {
    /// Window label.
    pub window: String,
    /// Number of instruments with defined performance (`n`).
    pub population: usize,
    /// Ratings aligned with the input order.
    pub ratings: Vec<RsRating>,
}

impl WindowRatings {
    /// Rating of a symbol.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.ratings
            .iter()
            .find(|r| r.symbol == symbol)
            .and_then(|r| r.percentile)
    }
}

/// Converts performance records into percentile ratings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossSectionalRanker;

impl CrossSectionalRanker {
    /// Create a ranker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rates one window's records. All records must belong to the same
    /// window; output order matches input order.
    pub fn rate_window(&self, window: &str, records: &[&PerformanceRecord]) -> WindowRatings {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.value).collect();
        let population = values.iter().flatten().count();
        debug!(window, population, total = records.len(), "ranking window");

        let ratings = records
            .iter()
            .zip(percentile_ratings(&values))
            .map(|(record, percentile)| RsRating {
                symbol: record.symbol.clone(),
                window: window.to_string(),
                percentile,
            })
            .collect();

        WindowRatings {
            window: window.to_string(),
            population,
            ratings,
        }
    }

    /// Rates every window in the catalog across the universe.
    ///
    /// `metrics` is the complete universe. Output holds one entry per catalog
    /// window in catalog order; each entry's ratings follow `metrics` order.
    pub fn rate_universe(&self, catalog: &WindowCatalog, metrics: &[InstrumentMetrics]) -> Vec<WindowRatings> {
        catalog
            .iter()
            .map(|window| self.rate_label(window.label(), metrics))
            .collect()
    }

    /// Rates a single catalog window across the universe.
    pub fn rate_label(&self, label: &str, metrics: &[InstrumentMetrics]) -> WindowRatings {
        let records: Vec<&PerformanceRecord> = metrics
            .iter()
            .filter_map(|m| m.performance.iter().find(|r| r.window == label))
            .collect();
        self.rate_window(label, &records)
    }
}
