//! Rate-accumulator resampling with optional bit-depth mapping.
//!
//! Neither direction filters. Decimation simply drops samples and
//! interpolation repeats them (zero-order hold); callers pair both with a
//! low-pass kernel from [`create_filter`](crate::create_filter) and
//! [`ConvolutionEngine`](crate::ConvolutionEngine) at the lower Nyquist.
//!
//! # Example
//!
//! ```rust
//! use wavedit_dsp::{downsample, upsample};
//!
//! // 8 kHz -> 4 kHz keeps every other sample
//! assert_eq!(downsample(&[1, 2, 3, 4], 8000, 4000, None), vec![1, 3]);
//!
//! // 4 kHz -> 8 kHz repeats every sample
//! assert_eq!(upsample(&[1, 3], 8000, 4000, None), vec![1, 1, 3, 3]);
//! ```

/// Per-sample bit-depth mapping applied while resampling.
pub type BitMap = fn(i16) -> i16;

#[inline]
fn mapped(sample: i16, bit_map: Option<BitMap>) -> i16 {
    bit_map.map_or(sample, |map| map(sample))
}

/// Input passed through (bit-mapped) when either rate is zero.
fn passthrough(
    samples: &[i16],
    high_rate: u32,
    low_rate: u32,
    bit_map: Option<BitMap>,
) -> Vec<i16> {
    tracing::warn!(high_rate, low_rate, "resample skipped: zero sample rate");
    samples.iter().map(|&s| mapped(s, bit_map)).collect()
}

/// Decimate `samples` from `high_rate` to `low_rate`.
///
/// The accumulator starts full, so the first sample is always kept; after
/// each input sample it gains `low_rate / high_rate`, and every time it
/// reaches 1 the current sample is emitted and 1 is taken off. Output length
/// is about `samples.len() * low_rate / high_rate`.
///
/// A zero rate has no ratio; the samples come back mapped but not resampled.
pub fn downsample(
    samples: &[i16],
    high_rate: u32,
    low_rate: u32,
    bit_map: Option<BitMap>,
) -> Vec<i16> {
    if high_rate == 0 || low_rate == 0 {
        return passthrough(samples, high_rate, low_rate, bit_map);
    }
    let ratio = f64::from(low_rate) / f64::from(high_rate);
    let mut out = Vec::with_capacity((samples.len() as f64 * ratio).ceil() as usize);
    let mut count = 1.0;

    for &sample in samples {
        if count >= 1.0 {
            out.push(mapped(sample, bit_map));
            count -= 1.0;
        }
        count += ratio;
    }

    tracing::trace!(
        input = samples.len(),
        output = out.len(),
        high_rate,
        low_rate,
        "downsample"
    );
    out
}

/// Interpolate `samples` from `low_rate` up to `high_rate` by repetition.
///
/// The accumulator starts at `high_rate / low_rate`; each input sample is
/// emitted while it is at least 1 (taking 1 off per copy), then the ratio is
/// added again. Output length is about `samples.len() * high_rate / low_rate`.
///
/// A zero rate has no ratio; the samples come back mapped but not resampled.
pub fn upsample(
    samples: &[i16],
    high_rate: u32,
    low_rate: u32,
    bit_map: Option<BitMap>,
) -> Vec<i16> {
    if high_rate == 0 || low_rate == 0 {
        return passthrough(samples, high_rate, low_rate, bit_map);
    }
    let ratio = f64::from(high_rate) / f64::from(low_rate);
    let mut out = Vec::with_capacity((samples.len() as f64 * ratio).ceil() as usize);
    let mut count = ratio;

    for &sample in samples {
        let sample = mapped(sample, bit_map);
        while count >= 1.0 {
            out.push(sample);
            count -= 1.0;
        }
        count += ratio;
    }

    tracing::trace!(
        input = samples.len(),
        output = out.len(),
        high_rate,
        low_rate,
        "upsample"
    );
    out
}
