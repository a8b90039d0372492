//! Screening pipeline for rsscreen.
//!
//! This crate joins metrics and ratings into [`RankedRow`]s and turns them into
//! the final report:
//! - Criteria compose with AND; an empty set keeps every row
//! - A criterion over a missing value fails, so unknown never passes
//! - Sorting puts missing values last and breaks ties by symbol
//!
//! All field names, comparators and operand types are validated once, when the
//! pipeline is built.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rsscreen_core::WindowCatalog;
//! use rsscreen_screen::{Operand, RowSchema, ScreeningCriterion, ScreeningPipeline, SortSpec};
//!
//! let schema = RowSchema::new(&WindowCatalog::default(), vec!["Above200MA".to_string()]).unwrap();
//! let pipeline = ScreeningPipeline::new(
//!     schema,
//!     &[ScreeningCriterion::new("Above200MA", "==", Operand::Bool(true))],
//!     Some(&SortSpec::descending("RS_3M")),
//!     None,
//! )
//! .unwrap();
//! let report = pipeline.run(Vec::new());
//! ```

mod criterion;
mod filter;
mod pipeline;
mod row;
mod sort;

// Re-export main types
pub use criterion::{Comparator, CompiledCriterion, CompiledOperand, Operand, ScreeningCriterion};
pub use filter::FilterSet;
pub use pipeline::ScreeningPipeline;
pub use row::{Field, FieldKind, FieldValue, RankedRow, RowSchema, WindowFigures};
pub use sort::{SortKey, SortSpec};
