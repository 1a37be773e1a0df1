//! File and byte collaborators for the wavedit editor.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`], [`write_wav`] and [`read_wav_info`] move a
//!   [`RiffHeader`](wavedit_dsp::RiffHeader) and a
//!   [`ChannelPair`](wavedit_dsp::ChannelPair) to and from disk
//! - **Raw PCM codec**: [`decode_pcm`] and [`encode_pcm`] convert between
//!   channel buffers and the interleaved byte layout a playback device consumes
//! - **Device format**: [`DeviceFormat`] describes that byte stream
//!
//! 8-bit samples stay unsigned (0..=255, 128 = silence) in memory; only the
//! WAV layer translates to and from hound's signed representation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wavedit_io::{read_wav, write_wav};
//!
//! let (channels, header) = read_wav("input.wav")?;
//! println!("{} frames at {} Hz", channels.len(), header.sample_rate);
//! write_wav("copy.wav", &channels, &header)?;
//! ```

mod pcm;
mod wav;

pub use pcm::{DeviceFormat, decode_pcm, encode_pcm};
pub use wav::{WavInfo, read_wav, read_wav_info, write_wav};

/// Error types for file and byte I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Header values the editor cannot work with.
    #[error(transparent)]
    Format(#[from] wavedit_dsp::Error),

    /// The file uses an encoding other than integer PCM.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for file and byte I/O.
pub type Result<T> = std::result::Result<T, Error>;
