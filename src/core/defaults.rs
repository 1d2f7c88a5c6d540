use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::format::Occurrences;
use crate::paths;
use crate::trim::DEFAULT_TRIM_CHARS;

/// Root configuration structure for sundry.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SundryConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via sundry.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Defaults {
    #[serde(default = "default_trim")]
    pub trim: TrimConfig,

    #[serde(default = "default_format")]
    pub format: FormatConfig,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            trim: default_trim(),
            format: default_format(),
        }
    }
}

/// Characters removed by `trim` when no charset is given
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrimConfig {
    #[serde(default = "default_trim_chars")]
    pub chars: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatConfig {
    #[serde(default)]
    pub occurrences: Occurrences,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_trim() -> TrimConfig {
    TrimConfig {
        chars: default_trim_chars(),
    }
}

fn default_trim_chars() -> String {
    DEFAULT_TRIM_CHARS.to_string()
}

fn default_format() -> FormatConfig {
    FormatConfig {
        occurrences: Occurrences::default(),
    }
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If sundry.json is missing or invalid, returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full sundry.json config, falling back to defaults on any error.
pub fn load_config() -> SundryConfig {
    let path = match paths::sundry_json() {
        Ok(path) => path,
        Err(_) => return SundryConfig::default(),
    };

    if !path.exists() {
        return SundryConfig::default();
    }

    match load_config_from(&path) {
        Ok(config) => config,
        Err(err) => {
            crate::log_status!("config", "Ignoring {}: {}", path.display(), err.message);
            SundryConfig::default()
        }
    }
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> crate::Result<SundryConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))
}

/// Save config to sundry.json file (creates if missing).
pub fn save_config(config: &SundryConfig) -> crate::Result<()> {
    save_config_to(&paths::sundry_json()?, config)
}

/// Save config to an explicit path, creating parent directories.
pub fn save_config_to(path: &Path, config: &SundryConfig) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize sundry.json".to_string()))
    })?;

    fs::write(path, content).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("write {}", path.display())))
    })?;

    Ok(())
}

/// Configuration keys addressable by [`set_value`].
pub const KNOWN_POINTERS: [&str; 2] = ["/defaults/trim/chars", "/defaults/format/occurrences"];

/// Replace the value at a JSON pointer path (e.g. `/defaults/trim/chars`).
///
/// The result is re-validated against the config schema before it is returned.
pub fn set_value(
    config: &SundryConfig,
    pointer: &str,
    value: serde_json::Value,
) -> crate::Result<SundryConfig> {
    let mut json = serde_json::to_value(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize sundry.json".to_string()))
    })?;

    let slot = json
        .pointer_mut(pointer)
        .filter(|_| pointer.starts_with('/'))
        .ok_or_else(|| {
            crate::Error::validation_invalid_argument(
                "pointer",
                format!("Unknown configuration key '{}'", pointer),
                Some(pointer.to_string()),
                Some(KNOWN_POINTERS.iter().map(|p| p.to_string()).collect()),
            )
        })?;
    *slot = value;

    serde_json::from_value(json).map_err(|e| {
        crate::Error::validation_invalid_json(e, Some(format!("set {}", pointer)), None)
    })
}

/// Check if sundry.json file exists
pub fn config_exists() -> bool {
    paths::sundry_json().map(|p| p.exists()).unwrap_or(false)
}

/// Delete sundry.json file (reset to defaults)
pub fn reset_config() -> crate::Result<bool> {
    let path = paths::sundry_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to sundry.json (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::sundry_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}
