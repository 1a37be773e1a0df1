//! Error types for editing operations.

use crate::events::ChannelId;
use thiserror::Error;

/// Errors that can occur while editing a document.
///
/// Invalid selections are not errors; those operations are skipped.
#[derive(Debug, Error)]
pub enum EditError {
    /// Header or worker-pool problem from the DSP layer.
    #[error(transparent)]
    Dsp(#[from] wavedit_dsp::Error),

    /// A background unit could not be started.
    #[error("failed to spawn '{name}': {source}")]
    Spawn {
        /// Thread name of the unit.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A background unit panicked before finishing.
    #[error("background unit '{0}' panicked")]
    WorkerPanicked(String),

    /// The document holds no audio yet.
    #[error("document has no audio format yet")]
    NoFormat,

    /// The document has no such channel.
    #[error("document has no {0} channel")]
    MissingChannel(ChannelId),
}

impl EditError {
    /// Create a spawn error.
    pub fn spawn(name: impl Into<String>, source: std::io::Error) -> Self {
        EditError::Spawn {
            name: name.into(),
            source,
        }
    }
}

/// Convenience result type for editing operations.
pub type Result<T> = std::result::Result<T, EditError>;
