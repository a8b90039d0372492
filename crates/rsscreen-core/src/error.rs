//! Error types for the rsscreen engine.
//!
//! The engine distinguishes exactly two failure kinds:
//!
//! - [`DataError`]: malformed or unusable price history, raised at ingestion.
//! - [`ConfigError`]: invalid window, indicator, filter or sort configuration,
//!   raised before any computation begins.
//!
//! Insufficient history is not an error. It surfaces as a missing (`None`)
//! value on the affected performance, rating or trend flag.

use crate::types::{Date, Symbol};
use thiserror::Error;

/// Malformed input price history.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// A series contained no observations.
    #[error("Empty price series for {0}")]
    EmptySeries(Symbol),

    /// An instrument was supplied with an empty symbol.
    #[error("Empty symbol")]
    EmptySymbol,

    /// The same symbol was supplied more than once.
    #[error("Duplicate symbol: {0}")]
    DuplicateSymbol(Symbol),

    /// Two observations share a date.
    #[error("Duplicate date {date} for {symbol}")]
    DuplicateDate {
        /// Offending instrument.
        symbol: Symbol,
        /// The repeated date.
        date: Date,
    },

    /// Dates go backwards.
    #[error("Dates not increasing for {symbol}: {previous} followed by {current}")]
    NonMonotonicDates {
        /// Offending instrument.
        symbol: Symbol,
        /// Date of the earlier observation.
        previous: Date,
        /// Date of the observation that follows it.
        current: Date,
    },

    /// A close was zero, negative, NaN or infinite.
    #[error("Invalid close {price} on {date} for {symbol}")]
    InvalidPrice {
        /// Offending instrument.
        symbol: Symbol,
        /// Date of the observation.
        date: Date,
        /// The rejected price.
        price: f64,
    },

    /// A required column is absent from tabular input.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A null cell in tabular input.
    #[error("Null value in column '{column}' at row {row}")]
    NullValue {
        /// Column name.
        column: String,
        /// Zero-based row index.
        row: usize,
    },

    /// A date cell that does not map to a calendar date.
    #[error("Date out of range at row {row}: {days} days from the Unix epoch")]
    DateOutOfRange {
        /// Zero-based row index.
        row: usize,
        /// Raw day count of the cell.
        days: i32,
    },
}

impl DataError {
    /// Symbol the error refers to, if any.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::EmptySeries(s) | Self::DuplicateSymbol(s) => Some(s),
            Self::DuplicateDate { symbol, .. }
            | Self::NonMonotonicDates { symbol, .. }
            | Self::InvalidPrice { symbol, .. } => Some(symbol),
            Self::EmptySymbol
            | Self::MissingColumn(_)
            | Self::NullValue { .. }
            | Self::DateOutOfRange { .. } => None,
        }
    }
}

/// Invalid engine configuration. Always fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A lookback window with zero or negative length.
    #[error("Window '{label}' must have a positive period count, got {periods}")]
    NonPositiveWindow {
        /// Window label.
        label: String,
        /// Configured period count.
        periods: i64,
    },

    /// A window label was configured twice.
    #[error("Duplicate window label: {0}")]
    DuplicateWindow(String),

    /// The window catalog has no entries.
    #[error("Window catalog is empty")]
    EmptyCatalog,

    /// An indicator name that does not parse (`Close`, `SMA_<n>`, `EMA_<n>`).
    #[error("Invalid indicator: {0}")]
    InvalidIndicator(String),

    /// A filter or sort key names a field that does not exist.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Two fields in the row schema share a name.
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// A comparator outside `>`, `<`, `==`, `>=`, `<=`.
    #[error("Unsupported comparator: {0}")]
    UnsupportedComparator(String),

    /// A comparator that is not defined for the field's type.
    #[error("Comparator '{comparator}' is not supported for {kind} field '{field}'")]
    ComparatorNotApplicable {
        /// Field name.
        field: String,
        /// Comparator symbol.
        comparator: String,
        /// Field type.
        kind: String,
    },

    /// Operand type differs from the field type.
    #[error("Operand for field '{field}' must be {expected}, got {found}")]
    OperandMismatch {
        /// Field name.
        field: String,
        /// Expected type.
        expected: String,
        /// Supplied type.
        found: String,
    },

    /// The worker pool was configured with zero threads, or could not start.
    #[error("Invalid worker pool: {0}")]
    WorkerPool(String),
}

/// Top-level error for a screening run.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Malformed price history.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// A specialized Result type for screening operations.
pub type Result<T> = std::result::Result<T, ScreenError>;
