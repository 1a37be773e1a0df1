//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/wavedit/config.toml`
//! - macOS: `~/Library/Application Support/wavedit/config.toml`
//! - Windows: `%APPDATA%\wavedit\config.toml`

use std::path::PathBuf;

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "wavedit";

/// File name of the editor configuration.
const CONFIG_FILE: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the default location of the editor configuration file.
pub fn user_config_file() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}

/// Ensure the user config directory exists, creating it if necessary.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_in_app_dir() {
        let file = user_config_file();
        assert!(file.ends_with("wavedit/config.toml"));
        assert_eq!(file.parent(), Some(user_config_dir().as_path()));
    }
}
