//! Frequency-domain bins and the points handed to the spectrum display.

use rustfft::num_complex::Complex;

/// One frequency bin: real and imaginary parts in double precision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComplexBin {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl ComplexBin {
    /// Create a bin from its parts.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// `sqrt(re^2 + im^2)`
    pub fn amplitude(&self) -> f64 {
        self.re.hypot(self.im)
    }
}

impl From<Complex<f64>> for ComplexBin {
    fn from(c: Complex<f64>) -> Self {
        Self { re: c.re, im: c.im }
    }
}

impl From<ComplexBin> for Complex<f64> {
    fn from(bin: ComplexBin) -> Self {
        Complex::new(bin.re, bin.im)
    }
}

/// A (frequency, amplitude) pair for the spectrum view.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SpectrumPoint {
    /// Bin center frequency in Hz.
    pub frequency: f64,
    /// Bin amplitude.
    pub amplitude: f64,
}

/// Convert bins spanning `0..sample_rate` into display points.
///
/// Bin `i` of `n` sits at `i * sample_rate / n` Hz.
pub fn spectrum_points(bins: &[ComplexBin], sample_rate: u32) -> Vec<SpectrumPoint> {
    let n = bins.len() as f64;
    bins.iter()
        .enumerate()
        .map(|(i, bin)| SpectrumPoint {
            frequency: i as f64 * f64::from(sample_rate) / n,
            amplitude: bin.amplitude(),
        })
        .collect()
}

/// Cursor snapping interval of the spectrum view, in whole Hz.
///
/// Returns 0 for an empty spectrum.
pub fn cursor_interval(bin_count: usize, sample_rate: u32) -> u32 {
    if bin_count == 0 {
        return 0;
    }
    u32::try_from(sample_rate as usize / bin_count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amplitude_is_euclidean_norm() {
        assert_eq!(ComplexBin::new(3.0, 4.0).amplitude(), 5.0);
        assert_eq!(ComplexBin::new(-2.0, 0.0).amplitude(), 2.0);
        assert_eq!(ComplexBin::default().amplitude(), 0.0);
    }

    #[test]
    fn points_span_zero_to_sample_rate() {
        let bins = vec![ComplexBin::new(1.0, 0.0); 8];
        let points = spectrum_points(&bins, 8000);
        assert_eq!(points.len(), 8);
        assert_eq!(points[0].frequency, 0.0);
        assert_eq!(points[1].frequency, 1000.0);
        assert_eq!(points[7].frequency, 7000.0);
        assert!(points.iter().all(|p| p.amplitude == 1.0));
    }

    #[test]
    fn cursor_interval_truncates() {
        assert_eq!(cursor_interval(3, 8000), 2666);
        assert_eq!(cursor_interval(0, 8000), 0);
    }

    #[test]
    fn converts_to_and_from_num_complex() {
        let c: Complex<f64> = ComplexBin::new(1.5, -2.5).into();
        assert_eq!(c, Complex::new(1.5, -2.5));
        assert_eq!(ComplexBin::from(c), ComplexBin::new(1.5, -2.5));
    }
}
