//! Engine configuration.

use rsscreen_core::{ConfigError, IngestMode, WindowCatalog};
use rsscreen_metrics::TrendFlagSpec;
use rsscreen_screen::{RowSchema, ScreeningCriterion, ScreeningPipeline, SortSpec};
use serde::{Deserialize, Serialize};

/// Configuration for one screening run.
///
/// Every key is optional when deserialized:
///
/// ```json
/// {
///   "windows": {"12M": 252, "3M": 63, "1M": 21, "1W": 5},
///   "trend_flags": [{"name": "Above200MA", "fast": "Close", "slow": "SMA_200"}],
///   "filters": [{"field": "Above200MA", "comparator": "==", "operand": true}],
///   "sort": {"field": "RS_12M", "descending": true},
///   "limit": 20,
///   "ingest": "strict",
///   "workers": 4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Lookback windows, ordered by period count.
    pub windows: WindowCatalog,
    /// Named trend flags.
    pub trend_flags: Vec<TrendFlagSpec>,
    /// AND-composed filter criteria.
    pub filters: Vec<ScreeningCriterion>,
    /// Sort key; the longest window's RS rating, descending, when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    /// Maximum number of rows in the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Handling of malformed series.
    pub ingest: IngestMode,
    /// Worker threads for metric computation; available parallelism when
    /// absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            windows: WindowCatalog::default(),
            trend_flags: TrendFlagSpec::defaults(),
            filters: Vec::new(),
            sort: None,
            limit: None,
            ingest: IngestMode::default(),
            workers: None,
        }
    }
}

impl EngineConfig {
    /// Adds a filter criterion.
    #[must_use]
    pub fn with_filter(mut self, criterion: ScreeningCriterion) -> Self {
        self.filters.push(criterion);
        self
    }

    /// Sets the sort key.
    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the worker count.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the ingestion mode.
    #[must_use]
    pub const fn with_ingest(mut self, ingest: IngestMode) -> Self {
        self.ingest = ingest;
        self
    }

    /// Field schema implied by the windows and trend flags.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCatalog`] without windows, or
    /// [`ConfigError::DuplicateField`] when a flag name collides.
    pub fn schema(&self) -> Result<RowSchema, ConfigError> {
        if self.windows.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let flags = self.trend_flags.iter().map(|f| f.name.clone()).collect();
        RowSchema::new(&self.windows, flags)
    }

    /// Compiles filters, sort and limit into a pipeline.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn pipeline(&self) -> Result<ScreeningPipeline, ConfigError> {
        ScreeningPipeline::new(self.schema()?, &self.filters, self.sort.as_ref(), self.limit)
    }

    /// Checks the whole configuration before any computation.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::WorkerPool("worker count must be positive".to_string()));
        }
        self.pipeline().map(|_| ())
    }
}
