//! Lookback windows and the window catalog.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named lookback measured in observations, e.g. `"12M"` → 252.
///
/// Only constructed through [`LookbackWindow::new`] or a [`WindowCatalog`],
/// so `periods` is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LookbackWindow {
    label: String,
    periods: usize,
}

impl LookbackWindow {
    /// Creates a window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveWindow`] when `periods` is zero or
    /// negative.
    pub fn new(label: impl Into<String>, periods: i64) -> Result<Self, ConfigError> {
        let label = label.into();
        match usize::try_from(periods) {
            Ok(p) if p > 0 => Ok(Self { label, periods: p }),
            _ => Err(ConfigError::NonPositiveWindow { label, periods }),
        }
    }

    /// Window label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of observations spanned.
    pub const fn periods(&self) -> usize {
        self.periods
    }
}

/// The immutable set of windows a run measures, ordered by period count.
///
/// Deserializes from a plain label → periods map:
///
/// ```
/// use rsscreen_core::WindowCatalog;
///
/// let catalog: WindowCatalog =
///     serde_json::from_str(r#"{"12M": 252, "1M": 21}"#).unwrap();
/// assert_eq!(catalog.smallest().unwrap().label(), "1M");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct WindowCatalog {
    windows: Vec<LookbackWindow>,
}

impl WindowCatalog {
    /// Builds a catalog from `(label, periods)` pairs.
    ///
    /// # Errors
    ///
    /// Fails if the list is empty, a label repeats, or a period count is not
    /// positive.
    pub fn new<I, S>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut windows = Vec::new();
        for (label, periods) in pairs {
            let window = LookbackWindow::new(label, periods)?;
            if !seen.insert(window.label.clone()) {
                return Err(ConfigError::DuplicateWindow(window.label));
            }
            windows.push(window);
        }
        if windows.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        windows.sort_by(|a, b| a.periods.cmp(&b.periods).then_with(|| a.label.cmp(&b.label)));
        Ok(Self { windows })
    }

    /// Windows in ascending period order.
    pub fn windows(&self) -> &[LookbackWindow] {
        &self.windows
    }

    /// Iterates over the windows in ascending period order.
    pub fn iter(&self) -> std::slice::Iter<'_, LookbackWindow> {
        self.windows.iter()
    }

    /// Looks a window up by label.
    pub fn get(&self, label: &str) -> Option<&LookbackWindow> {
        self.windows.iter().find(|w| w.label == label)
    }

    /// The shortest window.
    pub fn smallest(&self) -> Option<&LookbackWindow> {
        self.windows.first()
    }

    /// The longest window.
    pub fn longest(&self) -> Option<&LookbackWindow> {
        self.windows.last()
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Returns true if the catalog has no windows.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl Default for WindowCatalog {
    /// `1W`=5, `1M`=21, `3M`=63, `12M`=252 trading periods.
    fn default() -> Self {
        Self {
            windows: vec![
                LookbackWindow { label: "1W".to_string(), periods: 5 },
                LookbackWindow { label: "1M".to_string(), periods: 21 },
                LookbackWindow { label: "3M".to_string(), periods: 63 },
                LookbackWindow { label: "12M".to_string(), periods: 252 },
            ],
        }
    }
}

impl TryFrom<BTreeMap<String, i64>> for WindowCatalog {
    type Error = ConfigError;

    fn try_from(map: BTreeMap<String, i64>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<WindowCatalog> for BTreeMap<String, i64> {
    fn from(catalog: WindowCatalog) -> Self {
        catalog
            .windows
            .into_iter()
            .map(|w| (w.label, w.periods as i64))
            .collect()
    }
}

impl<'a> IntoIterator for &'a WindowCatalog {
    type Item = &'a LookbackWindow;
    type IntoIter = std::slice::Iter<'a, LookbackWindow>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = WindowCatalog::default();
        let labels: Vec<_> = catalog.iter().map(LookbackWindow::label).collect();
        assert_eq!(labels, vec!["1W", "1M", "3M", "12M"]);
        assert_eq!(catalog.get("12M").unwrap().periods(), 252);
        assert_eq!(catalog.smallest().unwrap().periods(), 5);
        assert_eq!(catalog.longest().unwrap().label(), "12M");
    }

    #[test]
    fn test_catalog_sorted_by_periods() {
        let catalog = WindowCatalog::new([("12M", 252), ("1W", 5), ("3M", 63)]).unwrap();
        let periods: Vec<_> = catalog.iter().map(LookbackWindow::periods).collect();
        assert_eq!(periods, vec![5, 63, 252]);
    }

    #[test]
    fn test_non_positive_window() {
        assert!(matches!(
            LookbackWindow::new("bad", 0),
            Err(ConfigError::NonPositiveWindow { periods: 0, .. })
        ));
        assert!(matches!(
            WindowCatalog::new([("bad", -5)]),
            Err(ConfigError::NonPositiveWindow { periods: -5, .. })
        ));
    }

    #[test]
    fn test_duplicate_and_empty() {
        assert!(matches!(
            WindowCatalog::new([("1M", 21), ("1M", 20)]),
            Err(ConfigError::DuplicateWindow(_))
        ));
        assert!(matches!(
            WindowCatalog::new(Vec::<(String, i64)>::new()),
            Err(ConfigError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_deserialize() {
        let catalog: WindowCatalog =
            serde_json::from_str(r#"{"12M": 252, "3M": 63, "1M": 21, "1W": 5}"#).unwrap();
        assert_eq!(catalog, WindowCatalog::default());

        let err = serde_json::from_str::<WindowCatalog>(r#"{"1M": 0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_window_serializes_label_and_periods() {
        let window = LookbackWindow::new("3M", 63).unwrap();
        let json = serde_json::to_value(&window).unwrap();
        assert_eq!(json, serde_json::json!({"label": "3M", "periods": 63}));

        let err = serde_json::from_str::<WindowCatalog>(r#"{"1W": 5, "3M": -63}"#).unwrap_err();
        assert!(err.to_string().contains("3M"));
    }
}
