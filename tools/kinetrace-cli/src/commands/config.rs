//! Print the effective configuration.

use std::path::Path;

use kinetrace_common::config::AppConfig;

pub fn run(config: &AppConfig, source: &Path) -> anyhow::Result<()> {
    let state = if source.exists() { "" } else { " (not found, using defaults)" };
    println!("Config file: {}{state}", source.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
