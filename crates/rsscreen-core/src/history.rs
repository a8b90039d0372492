//! Price history store.
//!
//! Turns raw per-symbol series from an external market-data source into
//! validated [`Instrument`]s. Short series are kept: insufficient history is
//! resolved downstream as missing values, never by dropping an instrument
//! here.

use std::collections::{HashMap, HashSet};

use polars::prelude::*;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{DataError, Result};
use crate::types::{Date, Instrument, PricePoint, Symbol};

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// How malformed series are handled during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestMode {
    /// The first malformed series aborts the run.
    #[default]
    Strict,
    /// Malformed series are excluded and reported; the rest continue.
    Isolate,
}

/// A series excluded under [`IngestMode::Isolate`].
///
/// Serializes as `{"symbol": ..., "error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    /// Symbol of the rejected series.
    pub symbol: Symbol,
    /// Why it was rejected.
    #[serde(serialize_with = "serialize_message")]
    pub error: DataError,
}

fn serialize_message<S: Serializer>(error: &DataError, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// The validated universe for one screening run.
#[derive(Debug, Clone, Default)]
pub struct PriceHistory {
    instruments: Vec<Instrument>,
    rejected: Vec<Rejection>,
}

impl PriceHistory {
    /// Validates raw series, preserving input order.
    ///
    /// # Errors
    ///
    /// Under [`IngestMode::Strict`] returns the first [`DataError`]. Under
    /// [`IngestMode::Isolate`] never fails; offending series are listed in
    /// [`rejected`](Self::rejected).
    pub fn ingest<I, S, P>(series: I, mode: IngestMode) -> std::result::Result<Self, DataError>
    where
        I: IntoIterator<Item = (S, Vec<P>)>,
        S: Into<Symbol>,
        P: Into<PricePoint>,
    {
        let mut history = Self::default();
        let mut seen = HashSet::new();

        for (symbol, points) in series {
            let symbol: Symbol = symbol.into();
            let result = if seen.insert(symbol.clone()) {
                Instrument::new(symbol.clone(), points)
            } else {
                Err(DataError::DuplicateSymbol(symbol.clone()))
            };

            match result {
                Ok(instrument) => history.instruments.push(instrument),
                Err(error) => match mode {
                    IngestMode::Strict => return Err(error),
                    IngestMode::Isolate => history.rejected.push(Rejection { symbol, error }),
                },
            }
        }

        Ok(history)
    }

    /// Builds the universe from a long-format DataFrame with `symbol`, `date`
    /// and `close` columns.
    ///
    /// Rows are grouped by symbol in order of first appearance. Row order
    /// within a symbol is taken as-is, so unsorted input is reported as a
    /// [`DataError`] rather than silently reordered.
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing or has the wrong type, if a
    /// cell is null, or (per `mode`) if a series is malformed.
    pub fn from_dataframe(df: &DataFrame, mode: IngestMode) -> Result<Self> {
        for col in ["symbol", "date", "close"] {
            if !df.get_column_names().iter().any(|c| c.as_str() == col) {
                return Err(DataError::MissingColumn(col.to_string()).into());
            }
        }

        let symbols = df.column("symbol")?.as_materialized_series().str()?;
        let dates = df.column("date")?.as_materialized_series().date()?;
        let closes = df.column("close")?.as_materialized_series().f64()?;

        let mut order: Vec<Symbol> = Vec::new();
        let mut grouped: HashMap<Symbol, Vec<PricePoint>> = HashMap::new();

        for (row, ((symbol, date), close)) in symbols
            .into_iter()
            .zip(dates.into_iter())
            .zip(closes.into_iter())
            .enumerate()
        {
            let symbol = symbol.ok_or_else(|| null_value("symbol", row))?;
            let days = date.ok_or_else(|| null_value("date", row))?;
            let date = date_from_days(days).ok_or(DataError::DateOutOfRange { row, days })?;
            let close = close.ok_or_else(|| null_value("close", row))?;

            grouped
                .entry(symbol.to_string())
                .or_insert_with(|| {
                    order.push(symbol.to_string());
                    Vec::new()
                })
                .push(PricePoint::new(date, close));
        }

        let series = order.into_iter().map(|symbol| {
            let points = grouped.remove(&symbol).unwrap_or_default();
            (symbol, points)
        });

        Ok(Self::ingest(series, mode)?)
    }

    /// Validated instruments in input order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Series rejected under [`IngestMode::Isolate`].
    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    /// Looks an instrument up by symbol.
    pub fn get(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.symbol() == symbol)
    }

    /// Number of validated instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Returns true when no instrument passed validation.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Consumes the store, returning instruments and rejections.
    pub fn into_parts(self) -> (Vec<Instrument>, Vec<Rejection>) {
        (self.instruments, self.rejected)
    }
}

fn null_value(column: &str, row: usize) -> DataError {
    DataError::NullValue {
        column: column.to_string(),
        row,
    }
}

/// Converts a polars physical date (days since the Unix epoch).
fn date_from_days(days: i32) -> Option<Date> {
    days.checked_add(UNIX_EPOCH_CE_DAYS).and_then(Date::from_num_days_from_ce_opt)
}
