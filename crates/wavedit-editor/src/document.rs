//! The open document: a header plus one or two locked channel buffers.
//!
//! Each channel sits behind its own mutex. Every mutation (delete, paste
//! splice, filter write-back) takes that lock, so a background unit and a
//! user edit on the same channel are serialized instead of racing.

use crate::clipboard::ClipboardData;
use crate::error::{EditError, Result};
use crate::events::ChannelId;
use crate::selection::{SampleIndexMap, Selection};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use wavedit_dsp::{ChannelPair, RiffHeader};

/// Shared handle to one channel's samples.
#[derive(Debug, Clone, Default)]
pub struct ChannelBuffer(Arc<Mutex<Vec<i16>>>);

impl ChannelBuffer {
    /// Wrap `samples`.
    pub fn new(samples: Vec<i16>) -> Self {
        Self(Arc::new(Mutex::new(samples)))
    }

    /// Exclusive access to the samples.
    ///
    /// A lock poisoned by a panicking unit is recovered; the buffer holds
    /// whatever that unit last completed.
    pub fn lock(&self) -> MutexGuard<'_, Vec<i16>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current samples.
    pub fn snapshot(&self) -> Vec<i16> {
        self.lock().clone()
    }

    /// Current length.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Insert `samples` before index `at` (clamped to the current length).
    ///
    /// Returns the new length.
    pub fn insert(&self, at: usize, samples: &[i16]) -> usize {
        let mut buf = self.lock();
        let at = at.min(buf.len());
        buf.splice(at..at, samples.iter().copied());
        buf.len()
    }

    /// Whether two handles share the same buffer.
    pub fn same_buffer(&self, other: &ChannelBuffer) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// An editing session's audio.
///
/// A document without a header has never held audio; pasting into it adopts
/// the clip's format.
#[derive(Debug, Clone, Default)]
pub struct Document {
    header: Option<RiffHeader>,
    left: ChannelBuffer,
    right: Option<ChannelBuffer>,
}

impl Document {
    /// Document with no audio and no format.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Empty document with a fixed format; stereo headers get an empty right channel.
    pub fn with_format(header: RiffHeader) -> Result<Self> {
        header.validate()?;
        Ok(Self {
            header: Some(header),
            left: ChannelBuffer::default(),
            right: header.is_stereo().then(ChannelBuffer::default),
        })
    }

    /// Document over existing channels.
    ///
    /// The channel count follows `channels`, not `header.channels`.
    pub fn from_channels(header: RiffHeader, channels: ChannelPair) -> Result<Self> {
        let header = header.with_channels(channels.channel_count());
        header.validate()?;
        Ok(Self {
            header: Some(header),
            left: ChannelBuffer::new(channels.left),
            right: channels.right.map(ChannelBuffer::new),
        })
    }

    /// Current format, if any audio was ever loaded.
    pub fn header(&self) -> Option<RiffHeader> {
        self.header
    }

    /// Current format, or [`EditError::NoFormat`].
    pub fn require_header(&self) -> Result<RiffHeader> {
        self.header.ok_or(EditError::NoFormat)
    }

    /// Handle to one channel.
    pub fn channel(&self, id: ChannelId) -> Option<&ChannelBuffer> {
        match id {
            ChannelId::Left => Some(&self.left),
            ChannelId::Right => self.right.as_ref(),
        }
    }

    /// Handle to one channel, or [`EditError::MissingChannel`].
    pub fn require_channel(&self, id: ChannelId) -> Result<&ChannelBuffer> {
        self.channel(id).ok_or(EditError::MissingChannel(id))
    }

    /// Whether a right channel exists.
    pub fn is_stereo(&self) -> bool {
        self.right.is_some()
    }

    /// Samples in the left channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the left channel is empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Index map of a view plotting every sample of the left channel.
    pub fn index_map(&self) -> SampleIndexMap {
        SampleIndexMap::identity(self.len())
    }

    /// Copy of every channel, for writing out.
    pub fn to_channels(&self) -> ChannelPair {
        ChannelPair {
            left: self.left.snapshot(),
            right: self.right.as_ref().map(ChannelBuffer::snapshot),
        }
    }

    /// Header describing the current contents, for writing out.
    pub fn current_header(&self) -> Result<RiffHeader> {
        let mut header = self.require_header()?;
        header.channels = if self.is_stereo() { 2 } else { 1 };
        header.data_size =
            (self.len() * usize::from(header.block_align())).try_into().unwrap_or(u32::MAX);
        Ok(header)
    }

    /// Remove `selection` from every channel.
    ///
    /// If one sample or fewer is left afterwards the channel is cleared.
    /// Returns `false` (and changes nothing) for an empty or out-of-range
    /// selection.
    pub fn delete(&self, selection: Selection) -> bool {
        if !selection.fits(self.len()) {
            tracing::warn!(?selection, len = self.len(), "delete skipped: invalid selection");
            return false;
        }
        for buffer in self.buffers() {
            let mut buf = buffer.lock();
            let end = selection.end().min(buf.len());
            let start = selection.start().min(end);
            buf.drain(start..end);
            if buf.len() <= 1 {
                buf.clear();
            }
        }
        tracing::info!(start = selection.start(), end = selection.end(), "deleted");
        true
    }

    /// Copy `selection` to a clip carrying this document's header.
    pub fn copy(&self, selection: Selection) -> Option<ClipboardData> {
        let header = self.header?;
        if !selection.fits(self.len()) {
            tracing::warn!(?selection, len = self.len(), "copy skipped: invalid selection");
            return None;
        }
        let slice = |buffer: &ChannelBuffer| {
            let buf = buffer.lock();
            buf[selection.start().min(buf.len())..selection.end().min(buf.len())].to_vec()
        };
        let channels = ChannelPair {
            left: slice(&self.left),
            right: self.right.as_ref().map(slice),
        };
        Some(ClipboardData::new(header, channels))
    }

    /// Copy then delete.
    pub fn cut(&self, selection: Selection) -> Option<ClipboardData> {
        let clip = self.copy(selection)?;
        self.delete(selection);
        Some(clip)
    }

    /// Replace this format-less document's contents with `clip`.
    pub(crate) fn adopt(&mut self, clip: &ClipboardData) {
        self.header = Some(clip.header.with_channels(clip.channels.channel_count()));
        self.left = ChannelBuffer::new(clip.channels.left.clone());
        self.right = clip.channels.right.clone().map(ChannelBuffer::new);
    }

    fn buffers(&self) -> impl Iterator<Item = &ChannelBuffer> {
        std::iter::once(&self.left).chain(self.right.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo(len: i16) -> Document {
        let left: Vec<i16> = (0..len).collect();
        let right: Vec<i16> = (0..len).map(|s| -s).collect();
        Document::from_channels(RiffHeader::new(8000, 16), ChannelPair::stereo(left, right))
            .unwrap()
    }

    #[test]
    fn from_channels_follows_pair() {
        let doc = stereo(4);
        assert!(doc.is_stereo());
        assert_eq!(doc.header().unwrap().channels, 2);
        assert_eq!(doc.current_header().unwrap().data_size, 16);
    }

    #[test]
    fn with_format_creates_empty_channels() {
        let doc = Document::with_format(RiffHeader::new(22050, 8).with_channels(2)).unwrap();
        assert!(doc.is_empty());
        assert!(doc.is_stereo());
        assert!(Document::with_format(RiffHeader::new(0, 8)).is_err());
    }

    #[test]
    fn delete_removes_range_in_both_channels() {
        let doc = stereo(10);
        assert!(doc.delete(Selection::new(2, 5)));
        let pair = doc.to_channels();
        assert_eq!(pair.left, vec![0, 1, 5, 6, 7, 8, 9]);
        assert_eq!(pair.right, Some(vec![0, -1, -5, -6, -7, -8, -9]));
    }

    #[test]
    fn delete_leaving_one_sample_clears() {
        let doc = stereo(10);
        let sel = doc.index_map().map_selection(0, 100).unwrap();
        assert!(doc.delete(sel));
        assert!(doc.is_empty());
        assert!(doc.channel(ChannelId::Right).unwrap().is_empty());
    }

    #[test]
    fn invalid_selection_is_noop() {
        let doc = stereo(10);
        assert!(!doc.delete(Selection::new(3, 3)));
        assert!(!doc.delete(Selection::new(5, 11)));
        assert!(doc.copy(Selection::new(5, 11)).is_none());
        assert_eq!(doc.len(), 10);
    }

    #[test]
    fn copy_and_cut() {
        let doc = stereo(6);
        let clip = doc.copy(Selection::new(1, 3)).unwrap();
        assert_eq!(clip.channels.left, vec![1, 2]);
        assert_eq!(clip.channels.right, Some(vec![-1, -2]));
        assert_eq!(clip.header.sample_rate, 8000);
        assert_eq!(doc.len(), 6);

        let cut = doc.cut(Selection::new(4, 1)).unwrap();
        assert_eq!(cut.channels.left, vec![1, 2, 3]);
        assert_eq!(doc.to_channels().left, vec![0, 4, 5]);
    }

    #[test]
    fn empty_document_copies_nothing() {
        assert!(Document::empty().copy(Selection::new(0, 1)).is_none());
        assert!(matches!(Document::empty().require_header(), Err(EditError::NoFormat)));
    }

    #[test]
    fn insert_clamps_position() {
        let buffer = ChannelBuffer::new(vec![1, 2]);
        assert_eq!(buffer.insert(10, &[3, 4]), 4);
        assert_eq!(buffer.insert(0, &[0]), 5);
        assert_eq!(buffer.snapshot(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn clones_share_storage() {
        let doc = stereo(3);
        let handle = doc.channel(ChannelId::Left).unwrap().clone();
        handle.insert(0, &[9]);
        assert_eq!(doc.len(), 4);
        assert!(handle.same_buffer(doc.channel(ChannelId::Left).unwrap()));
    }
}
