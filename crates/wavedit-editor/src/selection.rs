//! Sample ranges and the mapping from plotted points to sample indices.

use std::ops::Range;

/// A half-open sample range `[start, end)` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    start: usize,
    end: usize,
}

impl Selection {
    /// Selection between two bounds given in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// First selected sample.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last selected sample.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of selected samples.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// As a range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the selection is non-empty and lies inside a buffer of `len` samples.
    pub fn fits(&self, len: usize) -> bool {
        !self.is_empty() && self.end <= len
    }
}

/// Sample index of each point plotted by the waveform view.
///
/// A view that plots every sample is the identity; one that thins a long
/// buffer plots every `step`-th sample.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleIndexMap {
    points: Vec<usize>,
}

impl SampleIndexMap {
    /// One point per sample.
    pub fn identity(len: usize) -> Self {
        Self {
            points: (0..len).collect(),
        }
    }

    /// One point every `step` samples (a `step` of 0 is treated as 1).
    pub fn decimated(len: usize, step: usize) -> Self {
        Self {
            points: (0..len).step_by(step.max(1)).collect(),
        }
    }

    /// Explicit point positions.
    pub fn from_points(points: Vec<usize>) -> Self {
        Self { points }
    }

    /// Number of plotted points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether nothing is plotted.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sample index under point `pos`; positions past the end map to the last point.
    pub fn sample_at(&self, pos: usize) -> Option<usize> {
        self.points
            .get(pos)
            .or_else(|| self.points.last())
            .copied()
    }

    /// Map a point-space selection (bounds in either order) to samples.
    ///
    /// Returns `None` for equal bounds, an empty plot, or a selection that
    /// collapses to nothing after mapping.
    pub fn map_selection(&self, a: usize, b: usize) -> Option<Selection> {
        let (start_pos, end_pos) = (a.min(b), a.max(b));
        if start_pos == end_pos {
            return None;
        }
        let selection = Selection::new(self.sample_at(start_pos)?, self.sample_at(end_pos)?);
        (!selection.is_empty()).then_some(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_bounds_normalize() {
        let sel = Selection::new(9, 3);
        assert_eq!(sel.range(), 3..9);
        assert_eq!(sel.len(), 6);
        assert!(sel.fits(9));
        assert!(!sel.fits(8));
    }

    #[test]
    fn empty_selection_never_fits() {
        assert!(!Selection::new(4, 4).fits(100));
    }

    #[test]
    fn identity_map() {
        let map = SampleIndexMap::identity(10);
        assert_eq!(map.sample_at(3), Some(3));
        assert_eq!(map.map_selection(7, 2), Some(Selection::new(2, 7)));
    }

    #[test]
    fn end_past_last_point_uses_last_point() {
        let map = SampleIndexMap::identity(10);
        assert_eq!(map.sample_at(50), Some(9));
        assert_eq!(map.map_selection(0, 50), Some(Selection::new(0, 9)));
    }

    #[test]
    fn decimated_points_scale_positions() {
        let map = SampleIndexMap::decimated(100, 10);
        assert_eq!(map.len(), 10);
        assert_eq!(map.map_selection(1, 4), Some(Selection::new(10, 40)));
    }

    #[test]
    fn equal_bounds_or_empty_plot_is_none() {
        assert_eq!(SampleIndexMap::identity(10).map_selection(5, 5), None);
        assert_eq!(SampleIndexMap::default().map_selection(0, 5), None);
        assert_eq!(SampleIndexMap::default().sample_at(0), None);
    }

    #[test]
    fn collapsed_mapping_is_none() {
        // Both bounds land past the end
        let map = SampleIndexMap::identity(4);
        assert_eq!(map.map_selection(6, 9), None);
    }
}
