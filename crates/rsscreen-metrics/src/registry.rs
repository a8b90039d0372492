//! Indicator registry for parsing and discovering trend indicators.
//!
//! Indicators are named the way they appear as report columns: `Close`,
//! `SMA_<length>` and `EMA_<span>`. Names are case-sensitive and lengths are
//! plain positive decimal integers.

use std::fmt;
use std::str::FromStr;

use rsscreen_core::{ConfigError, Indicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::{Close, Ema, Sma};

/// Indicator kind classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    /// The raw closing price
    Close,
    /// Simple moving average
    Sma,
    /// Exponential moving average
    Ema,
}

impl IndicatorKind {
    /// Get a human-readable description of the kind.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Close => "Latest closing price (identity series)",
            Self::Sma => "Arithmetic mean of the trailing N closes; missing until N observations exist",
            Self::Ema => "Exponential smoothing with alpha = 2 / (N + 1), seeded with the first close",
        }
    }
}

/// A parsed indicator reference such as `SMA_200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IndicatorSpec {
    /// The raw close.
    Close,
    /// Simple moving average over `n` observations.
    Sma(usize),
    /// Exponential moving average with span `n`.
    Ema(usize),
}

impl IndicatorSpec {
    /// Kind of this indicator.
    #[must_use]
    pub const fn kind(&self) -> IndicatorKind {
        match self {
            Self::Close => IndicatorKind::Close,
            Self::Sma(_) => IndicatorKind::Sma,
            Self::Ema(_) => IndicatorKind::Ema,
        }
    }

    /// Instantiates the indicator.
    #[must_use]
    pub fn build(&self) -> Box<dyn Indicator> {
        match *self {
            Self::Close => Box::new(Close),
            Self::Sma(length) => Box::new(Sma::new(length)),
            Self::Ema(span) => Box::new(Ema::new(span)),
        }
    }
}

impl fmt::Display for IndicatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Close => write!(f, "Close"),
            Self::Sma(n) => write!(f, "SMA_{n}"),
            Self::Ema(n) => write!(f, "EMA_{n}"),
        }
    }
}

impl FromStr for IndicatorSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidIndicator(s.to_string());

        if s == "Close" {
            return Ok(Self::Close);
        }

        let (prefix, length) = s.split_once('_').ok_or_else(invalid)?;
        if !length.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let length: usize = length.parse().map_err(|_| invalid())?;
        if length == 0 {
            return Err(invalid());
        }

        match prefix {
            "SMA" => Ok(Self::Sma(length)),
            "EMA" => Ok(Self::Ema(length)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for IndicatorSpec {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<IndicatorSpec> for String {
    fn from(spec: IndicatorSpec) -> Self {
        spec.to_string()
    }
}

/// Metadata about an indicator kind.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorInfo {
    /// Name pattern as written in configuration
    pub pattern: &'static str,

    /// Kind classification
    pub kind: IndicatorKind,

    /// Human-readable description
    pub description: &'static str,

    /// Example reference
    pub example: &'static str,
}

/// Get information about all available indicator kinds.
#[must_use]
pub fn available_indicators() -> Vec<IndicatorInfo> {
    [
        (IndicatorKind::Close, "Close", "Close"),
        (IndicatorKind::Sma, "SMA_<length>", "SMA_200"),
        (IndicatorKind::Ema, "EMA_<span>", "EMA_20"),
    ]
    .into_iter()
    .map(|(kind, pattern, example)| IndicatorInfo {
        pattern,
        kind,
        description: kind.description(),
        example,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indicators() {
        assert_eq!("Close".parse::<IndicatorSpec>().unwrap(), IndicatorSpec::Close);
        assert_eq!("SMA_200".parse::<IndicatorSpec>().unwrap(), IndicatorSpec::Sma(200));
        assert_eq!("EMA_20".parse::<IndicatorSpec>().unwrap(), IndicatorSpec::Ema(20));
    }

    #[test]
    fn test_parse_invalid() {
        for bad in [
            "SMA", "SMA_0", "SMA_x", "WMA_10", "", "EMA_-3", "close", "ema_20", "MA_50", "SMA_+5", " SMA_5",
        ] {
            assert!(
                matches!(bad.parse::<IndicatorSpec>(), Err(ConfigError::InvalidIndicator(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for spec in [IndicatorSpec::Close, IndicatorSpec::Sma(50), IndicatorSpec::Ema(9)] {
            assert_eq!(spec.to_string().parse::<IndicatorSpec>().unwrap(), spec);
        }
    }

    #[test]
    fn test_build_names() {
        assert_eq!(IndicatorSpec::Sma(200).build().name(), "SMA_200");
        assert_eq!(IndicatorSpec::Ema(20).build().lookback(), 1);
        assert_eq!(IndicatorSpec::Close.build().name(), "Close");
    }

    #[test]
    fn test_serde() {
        let spec: IndicatorSpec = serde_json::from_str(r#""SMA_50""#).unwrap();
        assert_eq!(spec, IndicatorSpec::Sma(50));
        assert!(serde_json::from_str::<IndicatorSpec>(r#""SMA_0""#).is_err());
    }

    #[test]
    fn test_available_indicators() {
        let indicators = available_indicators();
        assert_eq!(indicators.len(), 3);
        assert!(indicators.iter().all(|i| !i.description.is_empty()));
    }
}
