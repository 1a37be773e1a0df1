//! FFT-backed forward and inverse transforms.
//!
//! Produces the same bins as the direct summation in [`crate::spectral`]
//! (same window weights, same `1/n` scaling on the forward side, same
//! truncating narrow on the inverse side) in O(n log n). Any length works;
//! rustfft handles non-power-of-two sizes.

use crate::complex::ComplexBin;
use crate::narrow;
use crate::window::WindowFunction;
use rustfft::FftPlanner;
use rustfft::num_complex::Complex;

/// Forward transform of a full buffer.
pub fn forward(samples: &[i16], window: WindowFunction) -> Vec<ComplexBin> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .enumerate()
        .map(|(t, &s)| Complex::new(f64::from(s) * window.weight(n, t), 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let scale = 1.0 / n as f64;
    buffer.into_iter().map(|c| ComplexBin::from(c * scale)).collect()
}

/// Inverse transform of a full spectrum, narrowed to 16 bits.
pub fn inverse(bins: &[ComplexBin]) -> Vec<i16> {
    let n = bins.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer: Vec<Complex<f64>> = bins.iter().copied().map(Complex::from).collect();

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_inverse(n).process(&mut buffer);

    buffer.iter().map(|c| narrow(c.re)).collect()
}
