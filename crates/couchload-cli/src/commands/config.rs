//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use couchload_core::{redact_url, Config};

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "database_url": config.database_url.as_deref().map(redact_url),
                    "language": config.language,
                    "timeout_secs": config.timeout_secs
                })
            );
        }
        OutputFormat::Quiet => {
            if let Some(ref url) = config.database_url {
                println!("{}", redact_url(url));
            }
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!(
                "  database_url: {}",
                config
                    .database_url
                    .as_deref()
                    .map(redact_url)
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!(
                "  language:     {}",
                if config.language.is_empty() {
                    "(omitted)"
                } else {
                    config.language.as_str()
                }
            );
            println!("  timeout_secs: {}", config.timeout_secs);
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match key.as_str() {
        "database_url" => {
            config.database_url = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.clone())
            };
        }
        "language" => {
            config.language = if value == "none" {
                String::new()
            } else {
                value.clone()
            };
        }
        "timeout_secs" => {
            config.timeout_secs = value
                .parse()
                .context("Invalid value for timeout_secs. Use a whole number of seconds.")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: database_url, language, timeout_secs",
                key
            );
        }
    }

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    let shown = if key == "database_url" {
        redact_url(&value)
    } else {
        value
    };
    output.success(&format!("Set {} = {}", key, shown));

    Ok(())
}
