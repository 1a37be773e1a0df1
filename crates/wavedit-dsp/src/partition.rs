//! Fork-join partitioning of an output index range over a worker pool.
//!
//! Every parallel stage in the editor has the same shape: split `[0, len)`
//! into contiguous, disjoint, ordered ranges, compute each range on its own
//! worker, wait for all of them, then consume the combined result in range
//! order. [`Partitioner`] owns the pool and enforces that shape.
//!
//! Range boundaries are `i * len / parts`; with four parts this is the
//! `n/4, n/4, n/4, n - 3*(n/4)` split up to where the remainder lands.

use crate::Result;
use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Split `[0, len)` into `parts` contiguous ranges with boundaries `i * len / parts`.
///
/// The ranges are ordered, disjoint and cover `[0, len)`. Some may be empty
/// when `len < parts`. `parts == 0` is treated as 1.
pub fn partition_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    (0..parts)
        .map(|i| (i * len / parts)..((i + 1) * len / parts))
        .collect()
}

/// Worker pool plus the partition count used for every stage.
#[derive(Debug)]
pub struct Partitioner {
    pool: rayon::ThreadPool,
    parts: usize,
}

impl Partitioner {
    /// Create a pool of `parts` workers that splits work into `parts` ranges.
    pub fn new(parts: usize) -> Result<Self> {
        let parts = parts.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(parts)
            .thread_name(|i| format!("wavedit-dsp-{i}"))
            .build()?;
        Ok(Self { pool, parts })
    }

    /// Create a pool sized to the hardware concurrency.
    pub fn available() -> Result<Self> {
        Self::new(std::thread::available_parallelism().map_or(1, NonZeroUsize::get))
    }

    /// Number of partitions per stage.
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// Partition ranges for an output of `len` items.
    pub fn ranges(&self, len: usize) -> Vec<Range<usize>> {
        partition_ranges(len, self.parts)
    }

    /// Run `produce` once per range in parallel and concatenate the results
    /// in range order.
    ///
    /// Returns after every worker has finished.
    pub fn map_ranges<T, F>(&self, len: usize, produce: F) -> Vec<T>
    where
        T: Send,
        F: Fn(Range<usize>) -> Vec<T> + Sync,
    {
        let ranges = self.ranges(len);
        let pieces: Vec<Vec<T>> = self
            .pool
            .install(|| ranges.into_par_iter().map(&produce).collect());
        pieces.into_iter().flatten().collect()
    }

    /// Split `output` into one disjoint chunk per range and run `write` on
    /// each chunk in parallel.
    ///
    /// `write` receives the absolute range and the chunk covering it
    /// (`chunk.len() == range.len()`). Returns after every worker has finished.
    pub fn fill_ranges<T, F>(&self, output: &mut [T], write: F)
    where
        T: Send,
        F: Fn(Range<usize>, &mut [T]) + Sync,
    {
        let ranges = self.ranges(output.len());
        let mut chunks = Vec::with_capacity(ranges.len());
        let mut rest = output;
        for range in &ranges {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            chunks.push(head);
            rest = tail;
        }

        self.pool.install(|| {
            chunks
                .into_par_iter()
                .zip(ranges)
                .for_each(|(chunk, range)| write(range, chunk));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_way_split_matches_quarter_boundaries() {
        let ranges = partition_ranges(10, 4);
        assert_eq!(ranges, vec![0..2, 2..5, 5..7, 7..10]);

        let ranges = partition_ranges(8, 4);
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn ranges_cover_without_gaps() {
        for len in 0..50 {
            for parts in 1..9 {
                let ranges = partition_ranges(len, parts);
                assert_eq!(ranges.len(), parts);
                assert_eq!(ranges[0].start, 0);
                assert_eq!(ranges[parts - 1].end, len);
                for pair in ranges.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                }
            }
        }
    }

    #[test]
    fn tiny_inputs_produce_empty_ranges() {
        let ranges = partition_ranges(2, 4);
        assert_eq!(ranges.iter().filter(|r| r.is_empty()).count(), 2);
    }

    #[test]
    fn zero_parts_means_one() {
        assert_eq!(partition_ranges(5, 0), vec![0..5]);
        assert_eq!(Partitioner::new(0).unwrap().parts(), 1);
    }

    #[test]
    fn map_ranges_preserves_order() {
        let workers = Partitioner::new(4).unwrap();
        let out = workers.map_ranges(103, |r| r.collect::<Vec<_>>());
        assert_eq!(out, (0..103).collect::<Vec<_>>());
    }

    #[test]
    fn fill_ranges_writes_disjoint_chunks() {
        let workers = Partitioner::new(3).unwrap();
        let mut out = vec![0usize; 50];
        workers.fill_ranges(&mut out, |range, chunk| {
            assert_eq!(range.len(), chunk.len());
            for (slot, i) in chunk.iter_mut().zip(range) {
                *slot = i * 2;
            }
        });
        assert_eq!(out, (0..50).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn available_has_at_least_one_part() {
        assert!(Partitioner::available().unwrap().parts() >= 1);
    }
}
