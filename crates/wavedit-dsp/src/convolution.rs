//! FIR convolution of a sample buffer against a kernel.
//!
//! Output sample `i` is `sum_j kernel[j] * x[i + j] / kernel.len()`, where
//! `x` reads as 0 past the end of the input. The kernel is not centered, so
//! the output leads the input by the kernel's group delay.
//!
//! 8-bit PCM is stored unsigned around [`UNSIGNED_MIDPOINT`]; with the offset
//! flag set, in-range samples are shifted to zero-centered before the
//! multiply and the midpoint is added back to the result.

use crate::narrow;
use crate::partition::Partitioner;
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

/// Silence level of 8-bit unsigned PCM.
pub const UNSIGNED_MIDPOINT: i16 = 128;

/// Convolve output indices `range` of `input` against `kernel`.
///
/// `output` covers exactly `range` (`output[k]` is index `range.start + k`).
/// Results are truncated toward zero and wrapped to 16 bits. An empty kernel
/// copies the input through unchanged.
pub fn convolve_range(
    kernel: &[i16],
    input: &[i16],
    output: &mut [i16],
    range: Range<usize>,
    unsigned_offset: bool,
) {
    debug_assert_eq!(output.len(), range.len());

    if kernel.is_empty() {
        output.copy_from_slice(&input[range]);
        return;
    }

    let n = kernel.len() as f64;
    let offset = if unsigned_offset { UNSIGNED_MIDPOINT } else { 0 };

    for (slot, i) in output.iter_mut().zip(range) {
        let mut sum = 0.0;
        for (j, &k) in kernel.iter().enumerate() {
            let sample = match input.get(i + j) {
                Some(&s) => i32::from(s) - i32::from(offset),
                None => 0,
            };
            sum += f64::from(sample) * f64::from(k);
        }
        *slot = narrow(sum / n).wrapping_add(offset);
    }
}

/// Partitioned convolution over a shared worker pool.
#[derive(Debug, Clone)]
pub struct ConvolutionEngine {
    workers: Arc<Partitioner>,
}

impl ConvolutionEngine {
    /// Create an engine on `workers`.
    pub fn new(workers: Arc<Partitioner>) -> Self {
        Self { workers }
    }

    /// Convolve the whole of `input` into a new buffer of the same length.
    pub fn convolve(&self, kernel: &[i16], input: &[i16], unsigned_offset: bool) -> Vec<i16> {
        let mut output = vec![0; input.len()];
        self.convolve_into(kernel, input, &mut output, unsigned_offset);
        output
    }

    /// Convolve `input` into `output`, which must have the same length.
    ///
    /// `output` is written in disjoint partitions; it must not alias `input`.
    pub fn convolve_into(
        &self,
        kernel: &[i16],
        input: &[i16],
        output: &mut [i16],
        unsigned_offset: bool,
    ) {
        assert_eq!(
            input.len(),
            output.len(),
            "convolution output must match input length"
        );
        let started = Instant::now();
        self.workers.fill_ranges(output, |range, chunk| {
            convolve_range(kernel, input, chunk, range, unsigned_offset);
        });
        tracing::debug!(
            len = input.len(),
            kernel_len = kernel.len(),
            unsigned_offset,
            partitions = self.workers.parts(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "convolution"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ConvolutionEngine {
        ConvolutionEngine::new(Arc::new(Partitioner::new(4).unwrap()))
    }

    #[test]
    fn unit_impulse_is_identity() {
        let input = vec![100, -200, 300, 32767, -32768, 0, 5];
        assert_eq!(engine().convolve(&[1], &input, false), input);
    }

    #[test]
    fn scaled_impulse_still_divides_by_length() {
        // [n, 0, 0, ...] of length n is an identity as well
        let input = vec![10, 20, 30, 40, 50];
        assert_eq!(engine().convolve(&[3, 0, 0], &input, false), input);
    }

    #[test]
    fn box_kernel_averages_forward() {
        let input = vec![3, 6, 9, 12];
        // (3+6)/2, (6+9)/2, (9+12)/2, (12+0)/2
        assert_eq!(engine().convolve(&[1, 1], &input, false), vec![4, 7, 10, 6]);
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(engine().convolve(&[1, 1], &[-3, 0], false), vec![-1, 0]);
    }

    #[test]
    fn unsigned_offset_keeps_silence_at_midpoint() {
        let input = vec![128; 16];
        let out = engine().convolve(&[1, 1, 1, 1], &input, true);
        assert!(out.iter().all(|&s| s == 128), "{out:?}");
    }

    #[test]
    fn unsigned_offset_scales_around_midpoint() {
        // Past the end reads as zero-centered silence
        let out = engine().convolve(&[1, 1], &[138, 138, 138], true);
        assert_eq!(out, vec![138, 138, 133]);
    }

    #[test]
    fn partial_range_writes_only_its_slice() {
        let input = vec![1, 2, 3, 4, 5, 6];
        let mut out = vec![0; 2];
        convolve_range(&[1, 1], &input, &mut out, 2..4, false);
        assert_eq!(out, vec![3, 4]);
    }

    #[test]
    fn overflow_wraps() {
        let input = vec![30000, 30000];
        // (30000 * 3 + 30000 * 3) / 2 = 90000
        let out = engine().convolve(&[3, 3], &input, false);
        assert_eq!(out[0], 90000_i64 as i16);
    }

    #[test]
    fn empty_kernel_copies_input() {
        let input = vec![7, 8, 9];
        assert_eq!(engine().convolve(&[], &input, false), input);
    }

    #[test]
    fn partition_count_does_not_change_result() {
        let input: Vec<i16> = (0..101).map(|i| ((i * 313) % 2000) as i16 - 1000).collect();
        let kernel: Vec<i16> = (0..9).map(|i| 5 - i as i16).collect();
        let expected = ConvolutionEngine::new(Arc::new(Partitioner::new(1).unwrap()))
            .convolve(&kernel, &input, false);
        for parts in [2, 3, 4, 8] {
            let got = ConvolutionEngine::new(Arc::new(Partitioner::new(parts).unwrap()))
                .convolve(&kernel, &input, false);
            assert_eq!(got, expected, "parts={parts}");
        }
    }
}
