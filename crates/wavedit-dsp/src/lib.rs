//! wavedit DSP - spectral transforms, filters and resampling for 8/16-bit PCM
//!
//! This crate is the signal processing core of the wavedit waveform editor.
//! Everything operates on fully materialized `i16` sample buffers:
//!
//! - [`sample_format`] - 8-bit unsigned <-> 16-bit signed sample mapping
//! - [`window`] - Window functions applied during analysis
//! - [`complex`] - Frequency-domain bins and display points
//! - [`spectral`] - Forward/inverse DFT, direct or FFT-backed
//! - [`filter`] - Binary low-pass masks for kernel construction
//! - [`convolution`] - FIR convolution with optional unsigned offset
//! - [`resample`] - Rate-accumulator decimation and zero-order hold
//! - [`partition`] - Ordered, disjoint fork-join partitioning over a worker pool
//! - [`header`] - RIFF header values and channel pairs
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wavedit_dsp::{ConvolutionEngine, Partitioner, SpectralEngine, WindowFunction, create_filter};
//!
//! let workers = Arc::new(Partitioner::new(4).unwrap());
//! let spectral = SpectralEngine::new(Arc::clone(&workers));
//!
//! let samples: Vec<i16> = (0..64).map(|i| ((i % 8) * 1000) as i16).collect();
//! let bins = spectral.forward(&samples, WindowFunction::Rectangular);
//! assert_eq!(bins.len(), samples.len());
//!
//! // Low-pass at 1 kHz for an 8 kHz stream
//! let mask = create_filter(bins.len(), 1000.0, 8000);
//! let kernel = spectral.inverse(&mask);
//! let filtered = ConvolutionEngine::new(workers).convolve(&kernel, &samples, false);
//! assert_eq!(filtered.len(), samples.len());
//! ```

pub mod complex;
pub mod convolution;
pub mod fft;
pub mod filter;
pub mod header;
pub mod partition;
pub mod resample;
pub mod sample_format;
pub mod spectral;
pub mod window;

pub use complex::{ComplexBin, SpectrumPoint, cursor_interval, spectrum_points};
pub use convolution::{ConvolutionEngine, UNSIGNED_MIDPOINT, convolve_range};
pub use filter::{cutoff_bin, create_filter};
pub use header::{ChannelPair, RiffHeader};
pub use partition::Partitioner;
pub use resample::{BitMap, downsample, upsample};
pub use sample_format::{BitDepth, bit_mapper, to_8bit, to_16bit};
pub use spectral::{SpectralEngine, TransformMethod, dft, idft};
pub use window::WindowFunction;

/// Error types for DSP setup.
///
/// The transforms themselves never fail; overflow is truncated silently.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The worker pool could not be started.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Bit depth other than 8 or 16.
    #[error("unsupported bit depth: {0} (expected 8 or 16)")]
    UnsupportedBitDepth(u16),

    /// Channel count other than 1 or 2.
    #[error("unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),

    /// A sample rate of zero.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),
}

/// Convenience result type for DSP setup.
pub type Result<T> = std::result::Result<T, Error>;

/// Narrow a double to 16 bits the way a C-style cast chain does: truncate toward
/// zero, then wrap modulo 2^16. No saturation.
#[inline]
pub(crate) fn narrow(value: f64) -> i16 {
    value as i64 as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_truncates_toward_zero() {
        assert_eq!(narrow(1.9), 1);
        assert_eq!(narrow(-1.9), -1);
        assert_eq!(narrow(0.49), 0);
    }

    #[test]
    fn narrow_wraps_instead_of_saturating() {
        assert_eq!(narrow(32768.0), i16::MIN);
        assert_eq!(narrow(65537.0), 1);
        assert_eq!(narrow(-32769.0), i16::MAX);
    }
}
