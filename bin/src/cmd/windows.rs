//! Window listing command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data;

/// List the lookback windows and field names of the effective configuration.
pub(crate) async fn list_windows(config: Option<PathBuf>) -> Result<()> {
    let config_path = data::config_path(config);
    let config = data::load_config(config_path.as_deref()).await?;
    let schema = config.schema().context("Invalid screening configuration")?;

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Lookback Windows                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    match &config_path {
        Some(path) => println!("Config: {}\n", path.display()),
        None => println!("Config: defaults\n"),
    }

    println!("{:<10} {:>10}", "Window", "Periods");
    println!("{}", "─".repeat(21));
    for window in &config.windows {
        println!("{:<10} {:>10}", window.label(), window.periods());
    }
    println!();

    println!("Trend flags:");
    for flag in &config.trend_flags {
        println!("  {:<14} {} > {}", flag.name, flag.fast, flag.slow);
    }
    println!();

    println!("Fields available to filters and sorting:");
    for (name, kind) in schema.fields() {
        println!("  {name:<14} {kind}");
    }
    println!();

    Ok(())
}
