//! Trend flags comparing a fast and a slow indicator.

use rsscreen_core::{Indicator, Instrument, TrendIndicator};
use serde::{Deserialize, Serialize};

use crate::registry::IndicatorSpec;

/// `fast > slow` at the latest observation.
///
/// `None` when either indicator is undefined at the latest point.
pub fn trend_flag(instrument: &Instrument, fast: &dyn Indicator, slow: &dyn Indicator) -> Option<bool> {
    compare_latest(&fast.compute(instrument), &slow.compute(instrument))
}

/// `fast > slow` at the last position of two precomputed series.
pub fn compare_latest(fast: &TrendIndicator, slow: &TrendIndicator) -> Option<bool> {
    Some(fast.latest()? > slow.latest()?)
}

/// Pointwise `fast > slow` over the whole history.
///
/// Position `i` is `None` wherever either series is undefined. The first
/// `Some(true)` after a `Some(false)` marks the crossover observation.
pub fn trend_flag_series(fast: &TrendIndicator, slow: &TrendIndicator) -> Vec<Option<bool>> {
    fast.values
        .iter()
        .zip(slow.values.iter())
        .map(|(f, s)| Some((*f)? > (*s)?))
        .collect()
}

/// A named trend flag, e.g. `Above200MA` = `Close` vs `SMA_200`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendFlagSpec {
    /// Flag name as it appears in the report and in filters.
    pub name: String,
    /// Series that must be above.
    pub fast: IndicatorSpec,
    /// Series it is compared against.
    pub slow: IndicatorSpec,
}

impl TrendFlagSpec {
    /// Creates a flag definition.
    pub fn new(name: impl Into<String>, fast: IndicatorSpec, slow: IndicatorSpec) -> Self {
        Self {
            name: name.into(),
            fast,
            slow,
        }
    }

    /// Evaluates the flag for one instrument.
    pub fn evaluate(&self, instrument: &Instrument) -> Option<bool> {
        trend_flag(instrument, self.fast.build().as_ref(), self.slow.build().as_ref())
    }

    /// The standard flag set: price above the 20 EMA, 50 SMA and 200 SMA, and
    /// the 50 SMA above the 200 SMA.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Above20EMA", IndicatorSpec::Close, IndicatorSpec::Ema(20)),
            Self::new("Above50MA", IndicatorSpec::Close, IndicatorSpec::Sma(50)),
            Self::new("Above200MA", IndicatorSpec::Close, IndicatorSpec::Sma(200)),
            Self::new("50Above200", IndicatorSpec::Sma(50), IndicatorSpec::Sma(200)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moving_average::{Close, Sma};
    use rsscreen_core::Date;

    fn instrument(closes: &[f64]) -> Instrument {
        let start = Date::from_ymd_opt(2022, 6, 1).unwrap();
        let points: Vec<_> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| (start + chrono::Duration::days(i as i64), c))
            .collect();
        Instrument::new("TEST", points).unwrap()
    }

    fn series(values: Vec<Option<f64>>) -> TrendIndicator {
        TrendIndicator::new("TEST", "X", values)
    }

    #[test]
    fn test_trend_flag_latest() {
        let inst = instrument(&[10.0, 10.0, 10.0, 13.0]);
        assert_eq!(trend_flag(&inst, &Close, &Sma::new(3)), Some(true));

        let falling = instrument(&[13.0, 10.0, 10.0, 10.0]);
        assert_eq!(trend_flag(&falling, &Close, &Sma::new(3)), Some(false));
    }

    #[test]
    fn test_trend_flag_missing_when_undefined() {
        let inst = instrument(&[10.0, 11.0]);
        assert_eq!(trend_flag(&inst, &Close, &Sma::new(200)), None);
        assert_eq!(trend_flag(&inst, &Sma::new(50), &Close), None);
    }

    #[test]
    fn test_equal_is_not_above() {
        let inst = instrument(&[10.0; 5]);
        assert_eq!(trend_flag(&inst, &Close, &Sma::new(5)), Some(false));
    }

    #[test]
    fn test_crossover_transition() {
        // A rising series crossing above a flat one.
        let rising = series(vec![None, None, Some(96.0), Some(98.0), Some(100.0), Some(102.0), Some(104.0)]);
        let flat = series(vec![None, Some(100.0), Some(100.0), Some(100.0), Some(100.0), Some(100.0), Some(100.0)]);

        let flags = trend_flag_series(&rising, &flat);
        assert_eq!(
            flags,
            vec![None, None, Some(false), Some(false), Some(false), Some(true), Some(true)]
        );
        let first_true = flags.iter().position(|f| *f == Some(true));
        assert_eq!(first_true, Some(5));
        assert_eq!(compare_latest(&rising, &flat), Some(true));
    }

    #[test]
    fn test_crossover_on_prices() {
        // Flat at 10 then rising by 1 per observation; close crosses above SMA_3
        // on the first rising bar.
        let inst = instrument(&[10.0, 10.0, 10.0, 10.0, 11.0, 12.0]);
        let flags = trend_flag_series(&Close.compute(&inst), &Sma::new(3).compute(&inst));
        assert_eq!(
            flags,
            vec![None, None, Some(false), Some(false), Some(true), Some(true)]
        );
    }

    #[test]
    fn test_flag_spec_evaluate() {
        let spec = TrendFlagSpec::new("AboveSMA2", IndicatorSpec::Close, IndicatorSpec::Sma(2));
        assert_eq!(spec.evaluate(&instrument(&[1.0, 2.0])), Some(true));
        assert_eq!(spec.evaluate(&instrument(&[1.0])), None);
    }

    #[test]
    fn test_default_flags() {
        let names: Vec<_> = TrendFlagSpec::defaults().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Above20EMA", "Above50MA", "Above200MA", "50Above200"]);
    }

    #[test]
    fn test_flag_spec_deserialize() {
        let spec: TrendFlagSpec =
            serde_json::from_str(r#"{"name": "Above200MA", "fast": "Close", "slow": "SMA_200"}"#)
                .unwrap();
        assert_eq!(spec.slow, IndicatorSpec::Sma(200));
    }
}
