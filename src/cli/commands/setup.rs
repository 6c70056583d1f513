//! Configuration inspection and initialisation commands.

use std::path::Path;

use crate::config::{self, Config, ConfigError};
use crate::enrichment::fetch::effective_batch_size;

/// Show the resolved configuration without revealing credentials
pub fn cmd_check(config: &Config, config_path: Option<&Path>) -> anyhow::Result<()> {
    println!("Configuration:");
    match config_path {
        Some(path) if path.exists() => println!("✓ Config file: {:?}", path),
        Some(path) => println!("  Config file: {:?} (not found, using defaults)", path),
        None => println!("  Config file: (no config directory, using defaults)"),
    }

    println!();
    println!("Files:");
    if config.files.input.exists() {
        println!("✓ Input:  {:?}", config.files.input);
    } else {
        println!("✗ Input:  {:?} (not found)", config.files.input);
    }
    println!("  Output: {:?} (appended)", config.files.output);

    println!();
    println!("API:");
    println!("  Token endpoint:  {}", config.api.token_url);
    println!("  Tracks endpoint: {}", config.api.tracks_url);
    println!(
        "  Batch size:      {}",
        effective_batch_size(config.api.batch_size)
    );

    println!();
    println!("Credentials:");
    report_credential(
        "CLIENT_ID",
        config.credentials.client_id.as_deref(),
    );
    report_credential(
        "CLIENT_SECRET",
        config.credentials.client_secret.as_deref(),
    );

    Ok(())
}

fn report_credential(env_var: &str, from_file: Option<&str>) {
    if std::env::var(env_var).is_ok_and(|v| !v.is_empty()) {
        println!("✓ {}: set (environment)", env_var);
    } else if from_file.is_some_and(|v| !v.is_empty()) {
        println!("✓ {}: set (config file)", env_var);
    } else {
        println!("✗ {}: not set", env_var);
    }
}

/// Write a default config file
pub fn cmd_init_config(config_path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = config_path.ok_or(ConfigError::NoConfigDir)?;

    if path.exists() && !force {
        println!("Config file already exists: {:?}", path);
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    config::save_to(&Config::default(), path)?;
    println!("✓ Wrote default config to {:?}", path);
    Ok(())
}
