use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use sundry::defaults::{self, Defaults, SundryConfig};

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore sundry.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Set a configuration value at a JSON pointer path
    Set {
        /// JSON pointer path (e.g., /defaults/trim/chars)
        pointer: String,
        /// Value to set (JSON)
        value: String,
    },
    /// Reset configuration to built-in defaults (deletes sundry.json)
    Reset,
    /// Show the path to sundry.json
    Path,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<SundryConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<Defaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pointer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}

impl ConfigOutput {
    fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            config: None,
            defaults: None,
            path: None,
            exists: None,
            pointer: None,
            value: None,
            deleted: None,
        }
    }
}

pub fn run(args: ConfigArgs, _global: &super::GlobalArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin),
        ConfigCommand::Set { pointer, value } => set(&pointer, &value),
        ConfigCommand::Reset => reset(),
        ConfigCommand::Path => path(),
    }
}

fn show(builtin: bool) -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.show");
    if builtin {
        output.defaults = Some(defaults::builtin_defaults());
    } else {
        output.config = Some(defaults::load_config());
    }
    Ok((output, 0))
}

fn set(pointer: &str, value_str: &str) -> CmdResult<ConfigOutput> {
    let value = parse_value(value_str)?;

    let config = defaults::set_value(&defaults::load_config(), pointer, value.clone())?;
    defaults::save_config(&config)?;

    let mut output = ConfigOutput::new("config.set");
    output.config = Some(config);
    output.pointer = Some(pointer.to_string());
    output.value = Some(value);
    Ok((output, 0))
}

fn parse_value(value_str: &str) -> sundry::Result<Value> {
    serde_json::from_str(value_str).map_err(|e| {
        sundry::Error::validation_invalid_json(
            e,
            Some("parse value".to_string()),
            Some(value_str.chars().take(200).collect::<String>()),
        )
    })
}

fn reset() -> CmdResult<ConfigOutput> {
    let deleted = defaults::reset_config()?;
    let mut output = ConfigOutput::new("config.reset");
    output.deleted = Some(deleted);
    output.path = Some(defaults::config_path()?);
    Ok((output, 0))
}

fn path() -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.path");
    output.path = Some(defaults::config_path()?);
    output.exists = Some(defaults::config_exists());
    Ok((output, 0))
}
