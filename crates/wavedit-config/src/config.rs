//! Editor configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;

use crate::error::ConfigError;
use crate::paths;
use wavedit_dsp::{TransformMethod, WindowFunction};

/// Default kernel length for filtering without a displayed spectrum.
pub const DEFAULT_KERNEL_LEN: usize = 1024;

/// Editor settings.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// # TOML Format
///
/// ```toml
/// window = "welch"
/// partitions = 0        # 0 = one per hardware thread
/// transform = "direct"  # or "fft"
///
/// [filter]
/// kernel_len = 1024
///
/// [paste]
/// mono_to_stereo = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Window applied during analysis.
    pub window: WindowFunction,

    /// Worker partitions per stage; 0 picks the hardware concurrency.
    pub partitions: usize,

    /// How full-length transforms are evaluated.
    pub transform: TransformMethod,

    /// Filter settings.
    pub filter: FilterConfig,

    /// Paste settings.
    pub paste: PasteConfig,
}

/// `[filter]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// Bins in the low-pass mask (and samples in the resulting kernel).
    pub kernel_len: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kernel_len: DEFAULT_KERNEL_LEN,
        }
    }
}

/// `[paste]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PasteConfig {
    /// Insert a mono clip into both channels of a stereo document; when off,
    /// the right channel gets silence of the same length.
    pub mono_to_stereo: bool,
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self {
            mono_to_stereo: true,
        }
    }
}

impl EditorConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load from `path` if given, else from the user config file.
    ///
    /// A missing user config file yields the defaults; an explicit path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = paths::user_config_file();
        if default_path.exists() {
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        std::fs::write(path, self.to_toml()?).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Save to the user config file.
    pub fn save_user(&self) -> Result<(), ConfigError> {
        paths::ensure_user_config_dir()?;
        self.save(paths::user_config_file())
    }

    /// Reject values the editor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.kernel_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "filter.kernel_len",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Partition count to build the worker pool with.
    pub fn worker_count(&self) -> usize {
        if self.partitions > 0 {
            self.partitions
        } else {
            std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
        }
    }
}
