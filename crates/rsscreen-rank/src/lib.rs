//! Cross-sectional relative-strength ranking for rsscreen.
//!
//! This crate turns per-window performance across a universe into percentile
//! RS ratings on the 0–99 scale:
//! - Fractional (average) ranks so equal performance gets equal ratings
//! - Missing performance excluded from the population and the denominator
//! - Ratings rounded to two decimals
//!
//! # Example
//!
//! ```rust
//! use rsscreen_rank::percentile_ratings;
//!
//! let ratings = percentile_ratings(&[Some(0.0), None, Some(10.0)]);
//! assert_eq!(ratings, vec![Some(49.5), None, Some(99.0)]);
//! ```

pub mod ranker;
pub mod ranks;

// Re-export main types
pub use ranker::{CrossSectionalRanker, RsRating, WindowRatings};
pub use ranks::{RATING_DECIMALS, RATING_SCALE, fractional_ranks, percentile_ratings};
