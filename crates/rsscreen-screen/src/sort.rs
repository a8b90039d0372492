//! Report ordering.

use std::cmp::Ordering;

use rsscreen_core::ConfigError;
use serde::{Deserialize, Serialize};

use crate::criterion::compare;
use crate::row::{Field, RankedRow, RowSchema};

/// Sort configuration: one field, descending unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field name.
    pub field: String,
    /// Highest first when true.
    #[serde(default = "default_descending")]
    pub descending: bool,
}

const fn default_descending() -> bool {
    true
}

impl SortSpec {
    /// Descending sort on `field`.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Ascending sort on `field`.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Resolves the field against a schema.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownField`] for names outside the schema.
    pub fn compile(&self, schema: &RowSchema) -> Result<SortKey, ConfigError> {
        Ok(SortKey {
            field: schema.resolve(&self.field)?,
            descending: self.descending,
        })
    }
}

/// A resolved sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    field: Field,
    descending: bool,
}

impl SortKey {
    /// Creates a key for an already resolved field.
    pub const fn new(field: Field, descending: bool) -> Self {
        Self { field, descending }
    }

    /// Sorts rows in place.
    ///
    /// Missing values go last in either direction. Equal keys fall back to
    /// symbol ascending.
    pub fn sort(&self, rows: &mut [RankedRow]) {
        rows.sort_by(|a, b| self.ordering(a, b));
    }

    fn ordering(&self, a: &RankedRow, b: &RankedRow) -> Ordering {
        let primary = match (a.value(&self.field), b.value(&self.field)) {
            (Some(x), Some(y)) => {
                let ord = compare(&x, &y).unwrap_or(Ordering::Equal);
                if self.descending { ord.reverse() } else { ord }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        primary.then_with(|| a.symbol.cmp(&b.symbol))
    }
}
