//! Screen command implementation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rsscreen::{ScreeningEngine, ScreeningReport};
use tracing::info;

use crate::OutputFormat;
use crate::data;

/// Run a screen over a price file and print the report.
pub(crate) async fn run_screen(prices: &Path, config: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let config_path = data::config_path(config);
    let config = data::load_config(config_path.as_deref()).await?;
    let engine = ScreeningEngine::new(config).context("Invalid screening configuration")?;

    let series = data::load_prices(prices).await?;
    info!(path = %prices.display(), series = series.len(), "loaded price file");

    let report = engine.run_series(series)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            print!("{}", render_table(&report));
        }
    }

    Ok(())
}

const SYMBOL_WIDTH: usize = 8;
const NUMBER_WIDTH: usize = 10;

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn flag_cell(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

/// Render the report as a fixed-width table.
pub(crate) fn render_table(report: &ScreeningReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(out, "║                  Relative Strength Screen                    ║");
    let _ = writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n");
    let _ = writeln!(
        out,
        "{} of {} instruments passed ({} rejected)\n",
        report.len(),
        report.universe_size,
        report.rejected.len()
    );

    let mut header = format!(
        "{:<sw$} {:>nw$} {:>nw$} {:>nw$}",
        "Symbol",
        "Close",
        "History",
        "YTD",
        sw = SYMBOL_WIDTH,
        nw = NUMBER_WIDTH
    );
    for label in &report.windows {
        let _ = write!(header, " {:>nw$}", format!("Perf_{label}"), nw = NUMBER_WIDTH);
    }
    for label in &report.windows {
        let _ = write!(header, " {:>nw$}", format!("RS_{label}"), nw = NUMBER_WIDTH);
    }
    for name in &report.flag_names {
        let _ = write!(header, " {:>w$}", name, w = name.len().max(5));
    }
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{}", "─".repeat(header.chars().count()));

    for row in &report.rows {
        let mut line = format!(
            "{:<sw$} {:>nw$.2} {:>nw$} {:>nw$}",
            row.symbol,
            row.close,
            row.history,
            cell(row.ytd),
            sw = SYMBOL_WIDTH,
            nw = NUMBER_WIDTH
        );
        for figures in &row.windows {
            let _ = write!(line, " {:>nw$}", cell(figures.performance), nw = NUMBER_WIDTH);
        }
        for figures in &row.windows {
            let _ = write!(line, " {:>nw$}", cell(figures.rating), nw = NUMBER_WIDTH);
        }
        for (flag, name) in row.flags.iter().zip(&report.flag_names) {
            let _ = write!(line, " {:>w$}", flag_cell(flag.value), w = name.len().max(5));
        }
        let _ = writeln!(out, "{line}");
    }

    if !report.rejected.is_empty() {
        let _ = writeln!(out, "\nRejected series:");
        for rejection in &report.rejected {
            let _ = writeln!(out, "  {:<sw$} {}", rejection.symbol, rejection.error, sw = SYMBOL_WIDTH);
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rsscreen::{EngineConfig, IngestMode, PricePoint, WindowCatalog};

    fn points(closes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + chrono::Duration::days(i as i64),
                close,
            })
            .collect()
    }

    #[test]
    fn test_render_table() {
        let config = EngineConfig {
            windows: WindowCatalog::new([("1W", 5)]).unwrap(),
            ingest: IngestMode::Isolate,
            ..EngineConfig::default()
        };
        let engine = ScreeningEngine::new(config).unwrap();
        let report = engine
            .run_series(vec![
                ("SPY".to_string(), points(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0])),
                ("TLT".to_string(), points(&[90.0, 89.0])),
                ("BAD".to_string(), points(&[1.0, 0.0])),
            ])
            .unwrap();

        let table = render_table(&report);
        assert!(table.contains("2 of 2 instruments passed (1 rejected)"));
        assert!(table.contains("RS_1W"));
        assert!(table.contains("Above200MA"));

        let spy = table.lines().find(|l| l.starts_with("SPY")).unwrap();
        assert!(spy.contains("99.00"));
        let tlt = table.lines().find(|l| l.starts_with("TLT")).unwrap();
        assert!(tlt.contains('-'));
        assert!(table.contains("Rejected series:"));
    }
}
