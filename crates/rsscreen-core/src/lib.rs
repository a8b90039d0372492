#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rsscreen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core data model for the rsscreen relative-strength screener.
//!
//! This crate provides the validated price-history store, the window catalog,
//! the indicator abstraction and the two-kind error taxonomy shared by the
//! metrics, ranking and screening stages.

/// The version of the rsscreen-core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod history;
pub mod indicator;
pub mod types;
pub mod window;

// Re-exports
pub use error::{ConfigError, DataError, Result, ScreenError};
pub use history::{IngestMode, PriceHistory, Rejection};
pub use indicator::Indicator;
pub use types::{Date, Instrument, PricePoint, Symbol, TrendIndicator};
pub use window::{LookbackWindow, WindowCatalog};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
