//! The screening pipeline: filter, then sort, then truncate.

use rsscreen_core::ConfigError;
use tracing::debug;

use crate::criterion::ScreeningCriterion;
use crate::filter::FilterSet;
use crate::row::{RankedRow, RowSchema};
use crate::sort::{SortKey, SortSpec};

/// A validated filter and sort configuration for one schema.
///
/// # Example
///
/// ```rust,ignore
/// use rsscreen_screen::{Operand, ScreeningCriterion, ScreeningPipeline, SortSpec};
///
/// let pipeline = ScreeningPipeline::new(
///     schema,
///     &[ScreeningCriterion::new("Above200MA", "==", Operand::Bool(true))],
///     Some(&SortSpec::descending("RS_12M")),
///     Some(20),
/// )?;
/// let report = pipeline.run(rows);
/// ```
#[derive(Debug, Clone)]
pub struct ScreeningPipeline {
    schema: RowSchema,
    filters: FilterSet,
    sort: SortKey,
    limit: Option<usize>,
}

impl ScreeningPipeline {
    /// Validates criteria and sort against `schema`.
    ///
    /// Without a sort spec rows are ordered by the longest window's rating,
    /// descending.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for unknown fields, unsupported comparators
    /// or type mismatches.
    pub fn new(
        schema: RowSchema,
        criteria: &[ScreeningCriterion],
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let filters = FilterSet::compile(criteria, &schema)?;
        let sort = match sort {
            Some(spec) => spec.compile(&schema)?,
            None => SortKey::new(schema.default_sort_field(), true),
        };
        Ok(Self {
            schema,
            filters,
            sort,
            limit,
        })
    }

    /// The schema rows are addressed by.
    pub const fn schema(&self) -> &RowSchema {
        &self.schema
    }

    /// The compiled filters.
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Filters, sorts and truncates.
    pub fn run(&self, rows: Vec<RankedRow>) -> Vec<RankedRow> {
        let total = rows.len();
        let mut rows = self.filters.apply(rows);
        debug!(total, passed = rows.len(), criteria = self.filters.len(), "filtered rows");

        self.sort.sort(&mut rows);
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        rows
    }
}
