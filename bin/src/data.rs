//! File loading for the rsscreen CLI.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rsscreen::{EngineConfig, PricePoint};

/// Environment variable naming the default configuration file.
pub(crate) const CONFIG_ENV: &str = "RSSCREEN_CONFIG";

/// Series keyed by symbol, in symbol order.
pub(crate) type PriceSeries = Vec<(String, Vec<PricePoint>)>;

/// Load a price file of the form
/// `{"SPY": [{"date": "2024-01-02", "close": 472.65}, ...], ...}`.
///
/// Points are passed through as written; ordering and duplicate checks happen
/// during ingestion.
pub(crate) async fn load_prices(path: &Path) -> Result<PriceSeries> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read price file {}", path.display()))?;
    parse_prices(&text).with_context(|| format!("Invalid price file {}", path.display()))
}

fn parse_prices(text: &str) -> Result<PriceSeries> {
    let series: BTreeMap<String, Vec<PricePoint>> = serde_json::from_str(text)?;
    Ok(series.into_iter().collect())
}

/// Resolve the configuration path: the explicit argument, then
/// `RSSCREEN_CONFIG`.
pub(crate) fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
}

/// Load the engine configuration, falling back to defaults when no file is
/// given.
pub(crate) async fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        tracing::debug!("no configuration file, using defaults");
        return Ok(EngineConfig::default());
    };

    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: EngineConfig =
        serde_json::from_str(&text).with_context(|| format!("Invalid config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
