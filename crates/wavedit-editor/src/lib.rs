//! Editing session for the wavedit waveform editor.
//!
//! A [`Document`] holds a header and one or two [`ChannelBuffer`]s, each
//! behind its own lock. Synchronous edits (delete, copy, cut) live on the
//! document; operations that run the DSP engines go through
//! [`PipelineOrchestrator`], which executes them on background units and
//! reports to the display over a crossbeam channel of [`EditEvent`]s.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use crossbeam::channel::unbounded;
//! use wavedit_dsp::{ChannelPair, Partitioner, RiffHeader, WindowFunction};
//! use wavedit_editor::{ChannelId, Document, PipelineOrchestrator, Selection};
//!
//! let (tx, rx) = unbounded();
//! let pipeline = PipelineOrchestrator::new(Arc::new(Partitioner::new(4).unwrap()), tx);
//!
//! let doc = Document::from_channels(
//!     RiffHeader::new(8000, 16),
//!     ChannelPair::mono(vec![100, 200, -50, 0, 300, -300, 150, -150]),
//! )
//! .unwrap();
//!
//! let handle = pipeline
//!     .analyze(&doc, ChannelId::Left, Selection::new(0, 8), WindowFunction::Rectangular)
//!     .unwrap()
//!     .expect("selection is valid");
//! let points = handle.wait().unwrap();
//! assert!((points[0].amplitude - 31.25).abs() < 1e-9);
//! assert!(rx.recv().is_ok());
//! ```

mod clipboard;
mod document;
mod error;
mod events;
mod pipeline;
mod selection;

pub use clipboard::ClipboardData;
pub use document::{ChannelBuffer, Document};
pub use error::{EditError, Result};
pub use events::{ChannelId, EditEvent};
pub use pipeline::{EditHandle, PasteJob, PasteKind, PipelineOrchestrator};
pub use selection::{SampleIndexMap, Selection};
