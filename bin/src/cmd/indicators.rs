//! Indicator listing command implementation.

use anyhow::Result;
use rsscreen::metrics::{TrendFlagSpec, available_indicators};

/// List the indicator names accepted in trend flag definitions.
pub(crate) fn list_indicators(verbose: bool) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Available Indicators                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for info in available_indicators() {
        if verbose {
            println!("  {:15} - {} (e.g. {})", info.pattern, info.description, info.example);
        } else {
            println!("  {}", info.pattern);
        }
    }
    println!();

    if !verbose {
        println!("Use --verbose for detailed indicator descriptions.\n");
    }

    println!("Default trend flags:");
    for flag in TrendFlagSpec::defaults() {
        println!("  {:<14} {} > {}", flag.name, flag.fast, flag.slow);
    }
    println!();

    Ok(())
}
