//! RIFF header values and the left/right channel pair.
//!
//! The header is owned by the file layer; the DSP code only reads the rate,
//! channel count and bit depth from it. The bookkeeping fields are kept so
//! a header can travel through an edit and be written back unchanged.

use crate::sample_format::BitDepth;
use crate::{Error, Result};

/// PCM format tag in the `fmt ` chunk.
pub const PCM_FORMAT_TAG: u16 = 1;

/// Size of a PCM `fmt ` chunk body.
pub const PCM_FMT_SIZE: u32 = 16;

/// Format description of an audio stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiffHeader {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// 1 = mono, 2 = stereo.
    pub channels: u16,
    /// 8 or 16.
    pub bits_per_sample: u16,
    /// `fmt ` chunk format tag (1 = PCM).
    pub format_tag: u16,
    /// `fmt ` chunk body size.
    pub fmt_size: u32,
    /// `data` chunk size in bytes.
    pub data_size: u32,
}

impl RiffHeader {
    /// Mono PCM header for a new stream.
    pub fn new(sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample,
            format_tag: PCM_FORMAT_TAG,
            fmt_size: PCM_FMT_SIZE,
            data_size: 0,
        }
    }

    /// Same header with a different channel count.
    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    /// Bytes per sample frame: `channels * bits / 8`.
    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    /// Average bytes per second: `sample_rate * block_align`.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }

    /// RIFF chunk size for the current data size (everything after the
    /// 8-byte RIFF preamble).
    pub fn riff_size(&self) -> u32 {
        4 + 8 + self.fmt_size + 8 + self.data_size
    }

    /// Whether the stream carries a right channel.
    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }

    /// Parsed bit depth.
    pub fn bit_depth(&self) -> Result<BitDepth> {
        BitDepth::try_from(self.bits_per_sample)
    }

    /// Check that the editor can work with this header.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        if !matches!(self.channels, 1 | 2) {
            return Err(Error::UnsupportedChannels(self.channels));
        }
        self.bit_depth().map(|_| ())
    }
}

/// One or two independent sample buffers sharing a header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelPair {
    /// Left (or only) channel.
    pub left: Vec<i16>,
    /// Right channel, if stereo.
    pub right: Option<Vec<i16>>,
}

impl ChannelPair {
    /// Mono pair.
    pub fn mono(left: Vec<i16>) -> Self {
        Self { left, right: None }
    }

    /// Stereo pair.
    pub fn stereo(left: Vec<i16>, right: Vec<i16>) -> Self {
        Self {
            left,
            right: Some(right),
        }
    }

    /// 1 or 2.
    pub fn channel_count(&self) -> u16 {
        if self.right.is_some() { 2 } else { 1 }
    }

    /// Samples in the left channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the left channel is empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Split interleaved `L, R, L, R, ...` samples.
    ///
    /// With `channels == 1` the whole slice becomes the left channel. A
    /// trailing unpaired sample goes to the left channel only.
    pub fn deinterleave(samples: &[i16], channels: u16) -> Self {
        if channels < 2 {
            return Self::mono(samples.to_vec());
        }
        let left = samples.iter().step_by(2).copied().collect();
        let right = samples.iter().skip(1).step_by(2).copied().collect();
        Self::stereo(left, right)
    }

    /// Interleave into `L, R, L, R, ...`.
    ///
    /// When the channels differ in length the longer one's tail is emitted
    /// unpaired.
    pub fn interleave(&self) -> Vec<i16> {
        let Some(right) = &self.right else {
            return self.left.clone();
        };
        let mut out = Vec::with_capacity(self.left.len() + right.len());
        for i in 0..self.left.len().max(right.len()) {
            if let Some(&l) = self.left.get(i) {
                out.push(l);
            }
            if let Some(&r) = right.get(i) {
                out.push(r);
            }
        }
        out
    }
}
