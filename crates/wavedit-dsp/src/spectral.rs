//! Forward and inverse discrete Fourier transforms.
//!
//! [`dft`] and [`idft`] compute one contiguous slice of the output by direct
//! O(n^2) summation, which is what lets the work be split into independent
//! partitions. [`SpectralEngine`] fans those slices out over a
//! [`Partitioner`] and joins them in order, or hands the whole buffer to the
//! FFT path when configured to.
//!
//! # Definitions
//!
//! With `n = samples.len()`:
//!
//! - forward: `re[f] = (1/n) * sum_t s[t] * cos(2*pi*t*f/n) * w(n, t)`,
//!   `im[f] = -(1/n) * sum_t s[t] * sin(2*pi*t*f/n) * w(n, t)`
//! - inverse: `s[t] = sum_f re[f] * cos(2*pi*t*f/n) - im[f] * sin(2*pi*t*f/n)`,
//!   truncated toward zero and wrapped to 16 bits.

use crate::complex::ComplexBin;
use crate::fft;
use crate::narrow;
use crate::partition::Partitioner;
use crate::window::WindowFunction;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

/// Forward DFT of `samples` for output bins in `bins`.
///
/// Returns `bins.len()` values. Bins beyond `samples.len()` are still
/// well defined (the transform is periodic in `f`).
pub fn dft(samples: &[i16], window: WindowFunction, bins: Range<usize>) -> Vec<ComplexBin> {
    let n = samples.len();
    let nf = n as f64;
    let weights = window.coefficients(n);

    bins.map(|f| {
        let mut re = 0.0;
        let mut im = 0.0;
        for (t, (&s, &w)) in samples.iter().zip(&weights).enumerate() {
            let angle = 2.0 * PI * t as f64 * f as f64 / nf;
            let s = f64::from(s);
            re += s * angle.cos() * w;
            im -= s * angle.sin() * w;
        }
        ComplexBin::new(re / nf, im / nf)
    })
    .collect()
}

/// Inverse DFT of `bins` for output times in `times`.
///
/// Sums are narrowed to `i16` by truncation with wrap-around; overflow is
/// not reported.
pub fn idft(bins: &[ComplexBin], times: Range<usize>) -> Vec<i16> {
    let nf = bins.len() as f64;

    times
        .map(|t| {
            let mut sum = 0.0;
            for (f, bin) in bins.iter().enumerate() {
                let angle = 2.0 * PI * t as f64 * f as f64 / nf;
                sum += bin.re * angle.cos() - bin.im * angle.sin();
            }
            narrow(sum)
        })
        .collect()
}

/// How the engine evaluates full-length transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMethod {
    /// Partitioned direct summation.
    #[default]
    Direct,
    /// Single rustfft pass; matches direct output to numerical tolerance.
    Fft,
}

impl fmt::Display for TransformMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformMethod::Direct => f.write_str("direct"),
            TransformMethod::Fft => f.write_str("fft"),
        }
    }
}

impl FromStr for TransformMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" | "dft" => Ok(TransformMethod::Direct),
            "fft" => Ok(TransformMethod::Fft),
            other => Err(format!("unknown transform '{other}' (expected direct or fft)")),
        }
    }
}

/// Full-length forward/inverse transforms over a shared worker pool.
#[derive(Debug, Clone)]
pub struct SpectralEngine {
    workers: Arc<Partitioner>,
    method: TransformMethod,
}

impl SpectralEngine {
    /// Create an engine using partitioned direct summation.
    pub fn new(workers: Arc<Partitioner>) -> Self {
        Self {
            workers,
            method: TransformMethod::Direct,
        }
    }

    /// Select the transform method.
    pub fn with_method(mut self, method: TransformMethod) -> Self {
        self.method = method;
        self
    }

    /// Configured transform method.
    pub fn method(&self) -> TransformMethod {
        self.method
    }

    /// Forward transform of the whole buffer: `samples.len()` bins spanning
    /// `0..sample_rate`.
    pub fn forward(&self, samples: &[i16], window: WindowFunction) -> Vec<ComplexBin> {
        let started = Instant::now();
        let bins = match self.method {
            TransformMethod::Direct => self
                .workers
                .map_ranges(samples.len(), |range| dft(samples, window, range)),
            TransformMethod::Fft => fft::forward(samples, window),
        };
        tracing::debug!(
            len = samples.len(),
            %window,
            method = %self.method,
            partitions = self.workers.parts(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "forward transform"
        );
        bins
    }

    /// Inverse transform of the whole spectrum: `bins.len()` samples.
    pub fn inverse(&self, bins: &[ComplexBin]) -> Vec<i16> {
        let started = Instant::now();
        let samples = match self.method {
            TransformMethod::Direct => self
                .workers
                .map_ranges(bins.len(), |range| idft(bins, range)),
            TransformMethod::Fft => fft::inverse(bins),
        };
        tracing::debug!(
            len = bins.len(),
            method = %self.method,
            partitions = self.workers.parts(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "inverse transform"
        );
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(parts: usize) -> SpectralEngine {
        SpectralEngine::new(Arc::new(Partitioner::new(parts).unwrap()))
    }

    #[test]
    fn dc_bin_is_mean() {
        let samples = [100, 200, -50, 0, 300, -300, 150, -150];
        let bins = dft(&samples, WindowFunction::Rectangular, 0..1);
        assert!((bins[0].re - 31.25).abs() < 1e-9);
        assert!(bins[0].im.abs() < 1e-9);
        assert!((bins[0].amplitude() - 31.25).abs() < 1e-9);
    }

    #[test]
    fn partial_range_matches_full_range() {
        let samples: Vec<i16> = (0..20).map(|i| (i * 37 % 11) as i16 * 100).collect();
        let full = dft(&samples, WindowFunction::Welch, 0..20);
        let part = dft(&samples, WindowFunction::Welch, 5..9);
        assert_eq!(&full[5..9], &part[..]);
    }

    #[test]
    fn cosine_lands_in_mirrored_bins() {
        let n = 32;
        let samples: Vec<i16> = (0..n)
            .map(|t| (1000.0 * (2.0 * PI * 4.0 * t as f64 / n as f64).cos()).round() as i16)
            .collect();
        let bins = dft(&samples, WindowFunction::Rectangular, 0..n);
        assert!((bins[4].amplitude() - 500.0).abs() < 1.0);
        assert!((bins[n - 4].amplitude() - 500.0).abs() < 1.0);
        assert!(bins[3].amplitude() < 1.0);
    }

    #[test]
    fn idft_inverts_dft_within_one() {
        let samples: Vec<i16> = (0..30).map(|i| ((i * 131) % 700) as i16 - 350).collect();
        let bins = dft(&samples, WindowFunction::Rectangular, 0..30);
        let back = idft(&bins, 0..30);
        for (a, b) in samples.iter().zip(&back) {
            assert!((i32::from(*a) - i32::from(*b)).abs() <= 1, "{a} vs {b}");
        }
    }

    #[test]
    fn idft_overflow_wraps() {
        // A flat spectrum of 1.0 sums to n at t = 0
        let bins = vec![ComplexBin::new(1.0, 0.0); 40000];
        let head = idft(&bins, 0..1);
        assert_eq!(head[0], (40000_i64 as i16));
    }

    #[test]
    fn engine_partitions_match_single_pass() {
        let samples: Vec<i16> = (0..37).map(|i| ((i * 53) % 97) as i16 * 10).collect();
        let single = dft(&samples, WindowFunction::Sine, 0..37);
        for parts in [1, 2, 4, 7] {
            assert_eq!(engine(parts).forward(&samples, WindowFunction::Sine), single);
        }
        let inverse = idft(&single, 0..37);
        assert_eq!(engine(4).inverse(&single), inverse);
    }

    #[test]
    fn fft_method_matches_direct() {
        let samples: Vec<i16> = (0..50).map(|i| ((i * 71) % 300) as i16 - 150).collect();
        let direct = engine(4).forward(&samples, WindowFunction::Bartlett);
        let fast = engine(4)
            .with_method(TransformMethod::Fft)
            .forward(&samples, WindowFunction::Bartlett);
        for (a, b) in direct.iter().zip(&fast) {
            assert!((a.re - b.re).abs() < 1e-6 && (a.im - b.im).abs() < 1e-6);
        }
    }

    #[test]
    fn empty_buffers() {
        assert!(engine(4).forward(&[], WindowFunction::Rectangular).is_empty());
        assert!(engine(4).inverse(&[]).is_empty());
    }

    #[test]
    fn parse_method() {
        assert_eq!("FFT".parse::<TransformMethod>().unwrap(), TransformMethod::Fft);
        assert_eq!("direct".parse::<TransformMethod>().unwrap(), TransformMethod::Direct);
        assert!("wavelet".parse::<TransformMethod>().is_err());
    }
}
