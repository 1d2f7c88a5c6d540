use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base sundry config directory (~/.config/sundry/ on Unix, %APPDATA%\sundry on Windows)
pub fn sundry() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("sundry"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("sundry"))
    }
}

/// Global sundry.json config file path
pub fn sundry_json() -> Result<PathBuf> {
    Ok(sundry()?.join("sundry.json"))
}
