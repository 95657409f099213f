//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::{Config, DEFAULT_ENDPOINT};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "ui.variant", "generator.model")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "ui.variant", "generator.model")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Get { key } => get(&key, format),
        ConfigCommands::Set { key, value } => set(&key, &value, quiet),
        ConfigCommands::Path => path(format),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&value)?),
        OutputFormat::Text => println!("{}", value),
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["ui", "theme"] => Ok(config.ui.theme.name().to_lowercase()),
        ["ui", "variant"] => Ok(config.ui.variant.to_string()),
        ["generator", "endpoint"] => Ok(config.generator.endpoint.clone()),
        ["generator", "model"] => Ok(config
            .generator
            .model
            .clone()
            .unwrap_or_else(|| "<per variant>".to_string())),
        ["generator", "api_key_env"] => Ok(config.generator.api_key_env.clone()),
        ["spin", "legacy_double_roll"] => Ok(config.spin.legacy_double_roll.to_string()),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["ui", "theme"] => {
            config.ui.theme = value.parse()?;
        }
        ["ui", "variant"] => {
            config.ui.variant = value.parse()?;
        }
        ["generator", "endpoint"] => {
            let value = value.trim();
            config.generator.endpoint = if value.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                value.to_string()
            };
        }
        ["generator", "model"] => {
            let value = value.trim();
            config.generator.model = (!value.is_empty()).then(|| value.to_string());
        }
        ["generator", "api_key_env"] => {
            if value.trim().is_empty() {
                anyhow::bail!("generator.api_key_env cannot be empty");
            }
            config.generator.api_key_env = value.trim().to_string();
        }
        ["spin", "legacy_double_roll"] => {
            config.spin.legacy_double_roll = value.parse()?;
        }
        _ => anyhow::bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}
