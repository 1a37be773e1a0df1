//! Events published to the display side.
//!
//! Background units never touch the display. They publish an [`EditEvent`]
//! on a crossbeam channel and the display drains it on its own thread,
//! reloading sample data from the document's [`ChannelBuffer`](crate::ChannelBuffer).

use std::fmt;
use wavedit_dsp::SpectrumPoint;

/// Left or right channel of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// Left (or only) channel.
    Left,
    /// Right channel of a stereo document.
    Right,
}

impl ChannelId {
    /// Lowercase name used in logs and thread names.
    pub fn name(self) -> &'static str {
        match self {
            ChannelId::Left => "left",
            ChannelId::Right => "right",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Notification for the display collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    /// A spectrum is ready for the frequency view of `channel`.
    Spectrum {
        /// Channel the selection was taken from.
        channel: ChannelId,
        /// One point per bin, spanning `0..sample_rate`.
        points: Vec<SpectrumPoint>,
        /// Cursor snapping interval in Hz.
        cursor_interval: u32,
    },
    /// `channel`'s buffer was mutated and should be reloaded.
    SamplesChanged {
        /// Mutated channel.
        channel: ChannelId,
        /// Buffer length after the edit.
        len: usize,
    },
}
