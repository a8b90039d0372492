//! Screening run orchestration.
//!
//! A run has four stages:
//!
//! 1. Ingestion validates raw series into a [`PriceHistory`]
//! 2. Metrics are computed per instrument on the worker pool
//! 3. Every window is ranked across the whole universe
//! 4. The pipeline filters, sorts and truncates the joined rows
//!
//! Ranking only starts once every instrument's metrics are collected.

use polars::prelude::DataFrame;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rsscreen_core::{ConfigError, DataError, Instrument, PriceHistory, PricePoint, Result, Symbol};
use rsscreen_metrics::{InstrumentMetrics, MetricsCalculator};
use rsscreen_rank::{CrossSectionalRanker, WindowRatings};
use rsscreen_screen::{RankedRow, ScreeningPipeline};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::report::ScreeningReport;

/// Runs screens for one validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use rsscreen::{EngineConfig, ScreeningEngine};
///
/// let engine = ScreeningEngine::new(EngineConfig::default())?;
/// let report = engine.run_series(series)?;
/// for row in &report.rows {
///     println!("{} {:?}", row.symbol, row.rating("12M"));
/// }
/// ```
#[derive(Debug)]
pub struct ScreeningEngine {
    config: EngineConfig,
    calculator: MetricsCalculator,
    ranker: CrossSectionalRanker,
    pipeline: ScreeningPipeline,
    pool: ThreadPool,
}

impl ScreeningEngine {
    /// Validates `config` and starts the worker pool.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for any invalid window, flag, filter or sort
    /// setting, or if the pool cannot be built.
    pub fn new(config: EngineConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let pipeline = config.pipeline()?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers.unwrap_or(0))
            .build()
            .map_err(|e| ConfigError::WorkerPool(e.to_string()))?;

        let calculator = MetricsCalculator::new(config.windows.clone(), config.trend_flags.clone());

        Ok(Self {
            config,
            calculator,
            ranker: CrossSectionalRanker::new(),
            pipeline,
            pool,
        })
    }

    /// The validated configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Validates raw series using the configured ingestion mode.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first malformed series' [`DataError`].
    pub fn ingest<I, S, P>(&self, series: I) -> std::result::Result<PriceHistory, DataError>
    where
        I: IntoIterator<Item = (S, Vec<P>)>,
        S: Into<Symbol>,
        P: Into<PricePoint>,
    {
        PriceHistory::ingest(series, self.config.ingest)
    }

    /// Ingests and screens raw series.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Data`](rsscreen_core::ScreenError::Data) in
    /// strict mode when a series is malformed.
    pub fn run_series<I, S, P>(&self, series: I) -> Result<ScreeningReport>
    where
        I: IntoIterator<Item = (S, Vec<P>)>,
        S: Into<Symbol>,
        P: Into<PricePoint>,
    {
        let history = self.ingest(series)?;
        Ok(self.run(history))
    }

    /// Screens a long-format `symbol`/`date`/`close` DataFrame.
    ///
    /// # Errors
    ///
    /// Returns an error if columns are missing or mistyped, or per the
    /// ingestion mode when a series is malformed.
    pub fn run_dataframe(&self, df: &DataFrame) -> Result<ScreeningReport> {
        let history = PriceHistory::from_dataframe(df, self.config.ingest)?;
        Ok(self.run(history))
    }

    /// Screens an already validated universe.
    pub fn run(&self, history: PriceHistory) -> ScreeningReport {
        let (instruments, rejected) = history.into_parts();
        info!(
            instruments = instruments.len(),
            windows = self.config.windows.len(),
            filters = self.config.filters.len(),
            workers = self.workers(),
            "starting screening run"
        );
        for rejection in &rejected {
            warn!(symbol = %rejection.symbol, error = %rejection.error, "excluded series");
        }

        let metrics = self.compute_metrics(&instruments);
        let ratings = self.rate(&metrics);
        let rows = self.pipeline.run(RankedRow::join_all(&metrics, &ratings));
        info!(universe = metrics.len(), rows = rows.len(), "screening complete");

        let schema = self.pipeline.schema();
        ScreeningReport {
            windows: schema.windows().to_vec(),
            flag_names: schema.flags().to_vec(),
            rows,
            universe_size: metrics.len(),
            rejected,
        }
    }

    /// Per-instrument metrics, computed in parallel. Output order matches
    /// input order.
    pub fn compute_metrics(&self, instruments: &[Instrument]) -> Vec<InstrumentMetrics> {
        let calculator = &self.calculator;
        self.pool.install(|| {
            instruments
                .par_iter()
                .map(|instrument| calculator.compute(instrument))
                .collect()
        })
    }

    /// Ratings for every window, each ranked independently over the full
    /// universe.
    pub fn rate(&self, metrics: &[InstrumentMetrics]) -> Vec<WindowRatings> {
        let ranker = &self.ranker;
        let ratings: Vec<WindowRatings> = self.pool.install(|| {
            self.config
                .windows
                .windows()
                .par_iter()
                .map(|window| ranker.rate_label(window.label(), metrics))
                .collect()
        });
        for window in &ratings {
            debug!(window = %window.window, population = window.population, "window ranked");
        }
        ratings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rsscreen_core::{IngestMode, ScreenError, WindowCatalog};
    use rsscreen_screen::{Operand, ScreeningCriterion};

    fn series(symbol: &str, closes: &[f64]) -> (String, Vec<(NaiveDate, f64)>) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| (start + chrono::Duration::days(i as i64), c))
            .collect();
        (symbol.to_string(), points)
    }

    fn config() -> EngineConfig {
        EngineConfig {
            windows: WindowCatalog::new([("1W", 5)]).unwrap(),
            ..EngineConfig::default()
        }
        .with_workers(2)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = config().with_filter(ScreeningCriterion::new("RS_1M", ">", Operand::Number(1.0)));
        assert!(matches!(ScreeningEngine::new(config), Err(ConfigError::UnknownField(_))));
    }

    #[test]
    fn test_workers() {
        let engine = ScreeningEngine::new(config()).unwrap();
        assert_eq!(engine.workers(), 2);
    }

    #[test]
    fn test_run_series() {
        let engine = ScreeningEngine::new(config()).unwrap();
        let report = engine
            .run_series(vec![
                series("UP", &[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]),
                series("FLAT", &[10.0; 6]),
                series("DOWN", &[15.0, 14.0, 13.0, 12.0, 11.0, 10.0]),
            ])
            .unwrap();

        assert_eq!(report.universe_size, 3);
        assert_eq!(report.symbols(), vec!["UP", "FLAT", "DOWN"]);
        assert_eq!(report.rows[0].rating("1W"), Some(99.0));
        assert_eq!(report.rows[1].rating("1W"), Some(66.0));
        assert_eq!(report.rows[2].rating("1W"), Some(33.0));
    }

    #[test]
    fn test_strict_and_isolated_ingestion() {
        let bad = series("BAD", &[10.0, -1.0]);
        let good = series("GOOD", &[10.0; 6]);

        let strict = ScreeningEngine::new(config()).unwrap();
        let result = strict.run_series(vec![good.clone(), bad.clone()]);
        assert!(matches!(result, Err(ScreenError::Data(DataError::InvalidPrice { .. }))));

        let isolate = ScreeningEngine::new(config().with_ingest(IngestMode::Isolate)).unwrap();
        let report = isolate.run_series(vec![good, bad]).unwrap();
        assert_eq!(report.symbols(), vec!["GOOD"]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].symbol, "BAD");
    }

    #[test]
    fn test_compute_metrics_preserves_order() {
        let engine = ScreeningEngine::new(config()).unwrap();
        let history = engine
            .ingest((0..50).map(|i| series(&format!("S{i:02}"), &[10.0 + f64::from(i); 3])))
            .unwrap();
        let metrics = engine.compute_metrics(history.instruments());
        let symbols: Vec<_> = metrics.iter().map(|m| m.symbol.clone()).collect();
        let expected: Vec<_> = (0..50).map(|i| format!("S{i:02}")).collect();
        assert_eq!(symbols, expected);
    }
}
