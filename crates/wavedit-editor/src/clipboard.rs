//! Copied audio together with the format it was copied in.

use crate::error::Result;
use wavedit_dsp::{BitDepth, ChannelPair, RiffHeader};

/// Audio on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardData {
    /// Format of the document the clip was copied from.
    pub header: RiffHeader,
    /// Copied samples.
    pub channels: ChannelPair,
}

impl ClipboardData {
    /// Clip from a header and channels.
    pub fn new(header: RiffHeader, channels: ChannelPair) -> Self {
        Self { header, channels }
    }

    /// Sample rate of the clip.
    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    /// Parsed bit depth of the clip.
    pub fn bit_depth(&self) -> Result<BitDepth> {
        Ok(self.header.bit_depth()?)
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the clip holds no samples.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
