//! Configuration for the wavedit waveform editor.
//!
//! Settings live in a single TOML file: the analysis window, the worker
//! partition count, the transform method and the filter and paste defaults.
//!
//! # Example
//!
//! ```rust,no_run
//! use wavedit_config::EditorConfig;
//!
//! // Explicit file, or the user config file when None
//! let config = EditorConfig::load_or_default(None).unwrap();
//! println!("{} workers, {} window", config.worker_count(), config.window);
//!
//! let mut tuned = config.clone();
//! tuned.filter.kernel_len = 512;
//! tuned.save("wavedit.toml").unwrap();
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

pub use config::{DEFAULT_KERNEL_LEN, EditorConfig, FilterConfig, PasteConfig};
pub use error::ConfigError;
pub use paths::{ensure_user_config_dir, user_config_dir, user_config_file};
