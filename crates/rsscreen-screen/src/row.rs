//! Ranked rows and the field schema used to address them.

use std::collections::HashSet;
use std::fmt;

use rsscreen_core::{ConfigError, Symbol, WindowCatalog};
use rsscreen_metrics::{InstrumentMetrics, TrendFlag};
use rsscreen_rank::WindowRatings;
use serde::Serialize;

/// Performance and rating of one row in one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowFigures {
    /// Window label.
    pub window: String,
    /// Percent change over the window.
    pub performance: Option<f64>,
    /// RS rating in the window.
    pub rating: Option<f64>,
}

/// One instrument's line in the screening report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Latest close.
    pub close: f64,
    /// Number of observations.
    pub history: usize,
    /// Year-to-date percent change.
    pub ytd: Option<f64>,
    /// Per-window figures in catalog order.
    pub windows: Vec<WindowFigures>,
    /// Trend flags in configuration order.
    pub flags: Vec<TrendFlag>,
}

impl RankedRow {
    /// Joins one instrument's metrics with its ratings.
    ///
    /// `index` is the instrument's position in the universe the ratings were
    /// computed over.
    pub fn join(metrics: &InstrumentMetrics, ratings: &[WindowRatings], index: usize) -> Self {
        let windows = metrics
            .performance
            .iter()
            .map(|record| WindowFigures {
                window: record.window.clone(),
                performance: record.value,
                rating: ratings
                    .iter()
                    .find(|w| w.window == record.window)
                    .and_then(|w| w.ratings.get(index))
                    .and_then(|r| r.percentile),
            })
            .collect();

        Self {
            symbol: metrics.symbol.clone(),
            close: metrics.latest_close,
            history: metrics.observations,
            ytd: metrics.ytd,
            windows,
            flags: metrics.flags.clone(),
        }
    }

    /// Builds rows for a whole universe, preserving order.
    pub fn join_all(metrics: &[InstrumentMetrics], ratings: &[WindowRatings]) -> Vec<Self> {
        metrics
            .iter()
            .enumerate()
            .map(|(i, m)| Self::join(m, ratings, i))
            .collect()
    }

    /// Reads a resolved field. `None` means missing.
    pub fn value(&self, field: &Field) -> Option<FieldValue> {
        match field {
            Field::Symbol => Some(FieldValue::Text(self.symbol.clone())),
            Field::Close => Some(FieldValue::Number(self.close)),
            Field::History => Some(FieldValue::Number(self.history as f64)),
            Field::Ytd => self.ytd.map(FieldValue::Number),
            Field::Performance(i) => self.windows.get(*i)?.performance.map(FieldValue::Number),
            Field::Rating(i) => self.windows.get(*i)?.rating.map(FieldValue::Number),
            Field::Flag(i) => self.flags.get(*i)?.value.map(FieldValue::Flag),
        }
    }

    /// Rating for a window label.
    pub fn rating(&self, window: &str) -> Option<f64> {
        self.windows.iter().find(|w| w.window == window)?.rating
    }

    /// Performance for a window label.
    pub fn performance(&self, window: &str) -> Option<f64> {
        self.windows.iter().find(|w| w.window == window)?.performance
    }

    /// Value of a named flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.iter().find(|f| f.name == name)?.value
    }
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric field.
    Number(f64),
    /// Boolean trend flag.
    Flag(bool),
    /// Text field.
    Text(String),
}

impl FieldValue {
    /// Type of the value.
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Number(_) => FieldKind::Number,
            Self::Flag(_) => FieldKind::Flag,
            Self::Text(_) => FieldKind::Text,
        }
    }
}

/// Field type, fixed by the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    /// Floating-point number.
    Number,
    /// Boolean.
    Flag,
    /// String.
    Text,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::Flag => write!(f, "boolean"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A field name resolved against a [`RowSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `Symbol`
    Symbol,
    /// `Close`
    Close,
    /// `History`
    History,
    /// `YTD`
    Ytd,
    /// `Perf_<label>`, by window index.
    Performance(usize),
    /// `RS_<label>`, by window index.
    Rating(usize),
    /// A trend flag, by flag index.
    Flag(usize),
}

impl Field {
    /// Type of the field.
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Symbol => FieldKind::Text,
            Self::Flag(_) => FieldKind::Flag,
            Self::Close | Self::History | Self::Ytd | Self::Performance(_) | Self::Rating(_) => {
                FieldKind::Number
            }
        }
    }
}

/// The set of addressable fields for one run.
///
/// Names: `Symbol`, `Close`, `History`, `YTD`, `Perf_<label>` and
/// `RS_<label>` for every window, and each trend flag's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSchema {
    windows: Vec<String>,
    flags: Vec<String>,
}

impl RowSchema {
    /// Builds the schema for a window catalog and flag names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateField`] when a flag name collides with
    /// another field.
    pub fn new(catalog: &WindowCatalog, flags: Vec<String>) -> Result<Self, ConfigError> {
        let schema = Self {
            windows: catalog.iter().map(|w| w.label().to_string()).collect(),
            flags,
        };

        let mut seen = HashSet::new();
        for (name, _) in schema.fields() {
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateField(name));
            }
        }
        Ok(schema)
    }

    /// Window labels in catalog order.
    pub fn windows(&self) -> &[String] {
        &self.windows
    }

    /// Flag names in configuration order.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// All field names with their types, in column order.
    pub fn fields(&self) -> Vec<(String, FieldKind)> {
        let mut fields = vec![
            ("Symbol".to_string(), FieldKind::Text),
            ("Close".to_string(), FieldKind::Number),
            ("History".to_string(), FieldKind::Number),
            ("YTD".to_string(), FieldKind::Number),
        ];
        fields.extend(self.windows.iter().map(|w| (format!("Perf_{w}"), FieldKind::Number)));
        fields.extend(self.windows.iter().map(|w| (format!("RS_{w}"), FieldKind::Number)));
        fields.extend(self.flags.iter().map(|f| (f.clone(), FieldKind::Flag)));
        fields
    }

    /// Resolves a field name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownField`] for names outside the schema.
    pub fn resolve(&self, name: &str) -> Result<Field, ConfigError> {
        let field = match name {
            "Symbol" => Some(Field::Symbol),
            "Close" => Some(Field::Close),
            "History" => Some(Field::History),
            "YTD" => Some(Field::Ytd),
            _ => None,
        };
        if let Some(field) = field {
            return Ok(field);
        }

        if let Some(i) = self.flags.iter().position(|f| f == name) {
            return Ok(Field::Flag(i));
        }
        if let Some(label) = name.strip_prefix("Perf_")
            && let Some(i) = self.windows.iter().position(|w| w == label)
        {
            return Ok(Field::Performance(i));
        }
        if let Some(label) = name.strip_prefix("RS_")
            && let Some(i) = self.windows.iter().position(|w| w == label)
        {
            return Ok(Field::Rating(i));
        }

        Err(ConfigError::UnknownField(name.to_string()))
    }

    /// Default sort field: the rating of the longest window.
    pub fn default_sort_field(&self) -> Field {
        match self.windows.len() {
            0 => Field::Symbol,
            n => Field::Rating(n - 1),
        }
    }
}
