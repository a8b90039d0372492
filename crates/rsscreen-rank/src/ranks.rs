//! Fractional ranks and percentile ratings.
//!
//! Ratings follow the conventional 1–99 relative-strength scale:
//! `rating = rank / n × 99`, rounded to two decimals, where `rank` is the
//! 1-based ascending fractional rank and `n` counts only defined values.

use std::cmp::Ordering;

/// Upper end of the rating scale.
pub const RATING_SCALE: f64 = 99.0;

/// Decimal places ratings are rounded to.
pub const RATING_DECIMALS: i32 = 2;

/// 1-based ascending ranks with ties sharing the mean of their positions.
///
/// Ties are exact `f64` equality. Input must not contain NaN.
///
/// ```
/// use rsscreen_rank::fractional_ranks;
///
/// assert_eq!(fractional_ranks(&[3.0, 1.0, 3.0]), vec![2.5, 1.0, 2.5]);
/// ```
pub fn fractional_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();

    // Sort by value
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut i = 0;

    while i < n {
        let mut j = i;
        // Find ties
        while j < n && indexed[j].1 == indexed[i].1 {
            j += 1;
        }

        // Positions i..j hold 1-based ranks i+1..=j; their mean is (i + 1 + j) / 2.
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &(idx, _) in &indexed[i..j] {
            ranks[idx] = avg_rank;
        }

        i = j;
    }

    ranks
}

/// Percentile ratings for a population that may contain missing values.
///
/// Missing entries get a missing rating and are left out of both the ranking
/// and the denominator. Output is aligned with the input.
pub fn percentile_ratings(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let n = present.len();
    let mut ranks = fractional_ranks(&present).into_iter();

    values
        .iter()
        .map(|v| {
            v.and_then(|_| ranks.next())
                .map(|rank| round_rating(rank / n as f64 * RATING_SCALE))
        })
        .collect()
}

fn round_rating(value: f64) -> f64 {
    let factor = 10f64.powi(RATING_DECIMALS);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fractional_ranks() {
        let values = vec![3.0, 1.0, 2.0, 5.0, 4.0];
        let ranks = fractional_ranks(&values);
        assert_eq!(ranks, vec![3.0, 1.0, 2.0, 5.0, 4.0]);
    }

    #[test]
    fn test_fractional_ranks_with_ties() {
        let values = vec![1.0, 2.0, 2.0, 3.0];
        let ranks = fractional_ranks(&values);
        assert_relative_eq!(ranks[0], 1.0);
        assert_relative_eq!(ranks[1], 2.5);
        assert_relative_eq!(ranks[2], 2.5);
        assert_relative_eq!(ranks[3], 4.0);
    }

    #[test]
    fn test_all_tied() {
        let ranks = fractional_ranks(&[7.0, 7.0, 7.0]);
        assert_eq!(ranks, vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_empty() {
        assert!(fractional_ranks(&[]).is_empty());
        assert!(percentile_ratings(&[]).is_empty());
        assert_eq!(percentile_ratings(&[None, None]), vec![None, None]);
    }

    #[test]
    fn test_two_instruments() {
        let ratings = percentile_ratings(&[Some(0.0), Some(11.2)]);
        assert_eq!(ratings, vec![Some(49.5), Some(99.0)]);
    }

    #[test]
    fn test_missing_excluded_from_population() {
        let ratings = percentile_ratings(&[Some(5.0), None, Some(-2.0), Some(9.0)]);
        assert_eq!(ratings, vec![Some(66.0), None, Some(33.0), Some(99.0)]);
    }

    #[test]
    fn test_rounding() {
        // 1/3 * 99 = 33.0, 2/7 * 99 = 28.285714...
        let ratings = percentile_ratings(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0), Some(7.0)]);
        assert_eq!(ratings[1], Some(28.29));
        assert_eq!(ratings[6], Some(99.0));
    }

    #[test]
    fn test_ties_share_rating() {
        let ratings = percentile_ratings(&[Some(4.0), Some(4.0), Some(1.0)]);
        // ranks 2.5, 2.5, 1 over n = 3
        assert_eq!(ratings[0], ratings[1]);
        assert_eq!(ratings[0], Some(82.5));
        assert_eq!(ratings[2], Some(33.0));
    }

    #[test]
    fn test_single_value_is_top() {
        assert_eq!(percentile_ratings(&[None, Some(-40.0)]), vec![None, Some(99.0)]);
    }
}
