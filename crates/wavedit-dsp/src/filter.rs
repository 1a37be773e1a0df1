//! Binary low-pass masks in the frequency domain.
//!
//! A mask of `n` bins keeps `[0, f]` and the mirrored `[n - f, n)` and
//! rejects everything else, where `f` is the bin nearest the cutoff. Run
//! through [`SpectralEngine::inverse`](crate::SpectralEngine::inverse) it
//! becomes a convolution kernel approximating an ideal low-pass at the cutoff.

use crate::complex::ComplexBin;

/// Bin index nearest `cutoff_hz` in an `n`-bin spectrum of a `sample_rate` stream.
///
/// Halfway cases round to even.
pub fn cutoff_bin(n: usize, cutoff_hz: f64, sample_rate: u32) -> i64 {
    (cutoff_hz * n as f64 / f64::from(sample_rate)).round_ties_even() as i64
}

/// Build an `n`-bin low-pass mask at `cutoff_hz`.
///
/// Every bin has a zero imaginary part; passed bins have real part 1.
/// A cutoff at or above Nyquist passes everything; a cutoff of 0 keeps only
/// the DC bin. Negative cutoffs are treated as 0.
///
/// ```rust
/// use wavedit_dsp::create_filter;
///
/// let mask = create_filter(8, 1000.0, 8000);
/// let kept: Vec<f64> = mask.iter().map(|b| b.re).collect();
/// assert_eq!(kept, vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
/// ```
pub fn create_filter(n: usize, cutoff_hz: f64, sample_rate: u32) -> Vec<ComplexBin> {
    let mut mask = vec![ComplexBin::default(); n];
    if n == 0 {
        return mask;
    }

    let f = usize::try_from(cutoff_bin(n, cutoff_hz, sample_rate).max(0)).unwrap_or(usize::MAX);
    let pass = ComplexBin::new(1.0, 0.0);

    for bin in &mut mask[..=f.min(n - 1)] {
        *bin = pass;
    }
    for bin in &mut mask[n.saturating_sub(f)..] {
        *bin = pass;
    }

    tracing::trace!(n, cutoff_hz, sample_rate, cutoff_bin = f, "low-pass mask");
    mask
}
