//! Utility to evaluate a financials JSON file from disk and print its flags.

use anyhow::Context;
use credit_flags_api::rules::analyze_document;
use std::env;

/// Main entry point for the evaluation utility.
///
/// Reads the document at the first argument (default `data.json`), evaluates
/// it and prints the flag report as JSON. Logs go to stderr so stdout stays
/// machine-readable.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let path = env::args().nth(1).unwrap_or_else(|| "data.json".to_string());
    let content = std::fs::read(&path).with_context(|| format!("Failed to read {}", path))?;
    tracing::info!("Evaluating {} ({} bytes)", path, content.len());

    let report = analyze_document(&content).with_context(|| format!("Failed to evaluate {}", path))?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
