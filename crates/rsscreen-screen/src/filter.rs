//! AND-composed filter sets.

use rsscreen_core::ConfigError;

use crate::criterion::{CompiledCriterion, ScreeningCriterion};
use crate::row::{RankedRow, RowSchema};

/// An ordered conjunction of compiled criteria.
///
/// A row passes when every criterion holds. The empty set passes every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    criteria: Vec<CompiledCriterion>,
}

impl FilterSet {
    /// Compiles configured criteria against a schema.
    ///
    /// # Errors
    ///
    /// Returns the first criterion's [`ConfigError`].
    pub fn compile(criteria: &[ScreeningCriterion], schema: &RowSchema) -> Result<Self, ConfigError> {
        let criteria = criteria
            .iter()
            .map(|c| c.compile(schema))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { criteria })
    }

    /// Whether a row passes every criterion.
    pub fn matches(&self, row: &RankedRow) -> bool {
        self.criteria.iter().all(|c| c.matches(row))
    }

    /// Keeps passing rows, preserving their order.
    pub fn apply(&self, mut rows: Vec<RankedRow>) -> Vec<RankedRow> {
        rows.retain(|row| self.matches(row));
        rows
    }

    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Returns true for the identity filter.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
