//! Property-based tests for wavedit-dsp.
//!
//! Covers transform invertibility, bit-depth monotonicity, mask shape and
//! resampling of constant signals using proptest for randomized inputs.

use proptest::prelude::*;
use std::sync::Arc;
use wavedit_dsp::{
    ConvolutionEngine, Partitioner, SpectralEngine, WindowFunction, create_filter, dft, downsample,
    idft, to_8bit, upsample,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A rectangular-window DFT followed by the IDFT reproduces the input
    /// within one unit per sample.
    #[test]
    fn dft_idft_round_trip(samples in prop::collection::vec(-20000i16..=20000, 1..48)) {
        let n = samples.len();
        let bins = dft(&samples, WindowFunction::Rectangular, 0..n);
        let back = idft(&bins, 0..n);
        for (a, b) in samples.iter().zip(&back) {
            prop_assert!(
                (i32::from(*a) - i32::from(*b)).abs() <= 1,
                "{} came back as {}", a, b
            );
        }
    }

    /// Partitioned transforms match a single pass regardless of partition count.
    #[test]
    fn partitioned_forward_matches_single_pass(
        samples in prop::collection::vec(any::<i16>(), 0..40),
        parts in 1usize..6,
    ) {
        let engine = SpectralEngine::new(Arc::new(Partitioner::new(parts).unwrap()));
        let n = samples.len();
        prop_assert_eq!(
            engine.forward(&samples, WindowFunction::Welch),
            dft(&samples, WindowFunction::Welch, 0..n)
        );
    }

    /// to_8bit never decreases as its input increases and stays in 0..=255.
    #[test]
    fn to_8bit_monotonic(a in any::<i16>(), b in any::<i16>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(to_8bit(lo) <= to_8bit(hi));
        prop_assert!((0..=255).contains(&to_8bit(a)));
    }

    /// A Nyquist cutoff yields an all-pass mask; a zero cutoff keeps only DC.
    #[test]
    fn mask_extremes(n in 1usize..200, rate in 1000u32..96000) {
        let all_pass = create_filter(n, f64::from(rate) / 2.0, rate);
        prop_assert!(all_pass.iter().all(|b| b.re == 1.0 && b.im == 0.0));

        let dc_only = create_filter(n, 0.0, rate);
        prop_assert_eq!(dc_only[0].re, 1.0);
        prop_assert!(dc_only[1..].iter().all(|b| b.re == 0.0));
    }

    /// Constant signals survive downsample followed by upsample.
    #[test]
    fn dc_survives_resample_round_trip(
        value in any::<i16>(),
        len in 1usize..500,
        factor in 1u32..6,
    ) {
        let input = vec![value; len];
        let low = 48000 / factor;
        let down = downsample(&input, 48000, low, None);
        let back = upsample(&down, 48000, low, None);
        prop_assert!(back.iter().all(|&s| s == value));
    }

    /// A single-tap kernel of 1 leaves any buffer unchanged.
    #[test]
    fn unit_kernel_identity(input in prop::collection::vec(any::<i16>(), 0..200)) {
        let engine = ConvolutionEngine::new(Arc::new(Partitioner::new(4).unwrap()));
        prop_assert_eq!(engine.convolve(&[1], &input, false), input);
    }
}
