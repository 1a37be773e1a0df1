//! Background editing operations built from the DSP engines.
//!
//! [`PipelineOrchestrator`] runs each operation on a named background unit
//! and hands back an [`EditHandle`] to join it. Inside a unit every stage is
//! a fork-join over the shared [`Partitioner`]: the transform completes
//! before convolution starts, and convolution completes before resampling
//! and the splice into the target buffer. Finished units publish an
//! [`EditEvent`] for the display.
//!
//! Resampled pastes run one unit per target channel. Both share a kernel
//! computed once by the coordinating unit, and each takes its target
//! channel's lock only for the final splice.

use crate::clipboard::ClipboardData;
use crate::document::{ChannelBuffer, Document};
use crate::error::{EditError, Result};
use crate::events::{ChannelId, EditEvent};
use crate::selection::Selection;
use crossbeam::channel::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use wavedit_config::EditorConfig;
use wavedit_dsp::{
    BitDepth, ConvolutionEngine, Partitioner, RiffHeader, SpectralEngine, SpectrumPoint,
    TransformMethod, UNSIGNED_MIDPOINT, WindowFunction, bit_mapper, create_filter,
    cursor_interval, downsample, spectrum_points, upsample,
};

/// Joinable handle to one background unit.
#[derive(Debug)]
pub struct EditHandle<T> {
    name: String,
    handle: JoinHandle<Result<T>>,
}

impl<T> EditHandle<T> {
    /// Thread name of the unit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the unit has finished running.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the unit finishes and return its result.
    pub fn wait(self) -> Result<T> {
        self.handle
            .join()
            .map_err(|_| EditError::WorkerPanicked(self.name))?
    }
}

/// How a paste was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteKind {
    /// The document had no format and took the clip's.
    Adopted,
    /// Same rate; bit-mapped and inserted.
    Direct,
    /// Clip rate above the document's: filter, then decimate.
    Downsample,
    /// Clip rate below the document's: repeat, then filter.
    Upsample,
}

/// Result of [`PipelineOrchestrator::paste`].
#[derive(Debug)]
pub struct PasteJob {
    /// Path the paste took.
    pub kind: PasteKind,
    /// Background unit for resampled pastes; `None` when already applied.
    pub pending: Option<EditHandle<()>>,
}

impl PasteJob {
    /// Block until the paste is fully applied.
    pub fn wait(self) -> Result<PasteKind> {
        if let Some(handle) = self.pending {
            handle.wait()?;
        }
        Ok(self.kind)
    }
}

fn spawn_unit<T, F>(name: String, work: F) -> Result<EditHandle<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let handle = thread::Builder::new()
        .name(name.clone())
        .spawn(work)
        .map_err(|e| EditError::spawn(&name, e))?;
    Ok(EditHandle { name, handle })
}

/// Composes the DSP engines into the editor's operations.
#[derive(Debug, Clone)]
pub struct PipelineOrchestrator {
    spectral: SpectralEngine,
    convolver: ConvolutionEngine,
    events: Sender<EditEvent>,
    mono_to_stereo: bool,
}

impl PipelineOrchestrator {
    /// Orchestrator over `workers`, publishing to `events`.
    pub fn new(workers: Arc<Partitioner>, events: Sender<EditEvent>) -> Self {
        Self {
            spectral: SpectralEngine::new(Arc::clone(&workers)),
            convolver: ConvolutionEngine::new(workers),
            events,
            mono_to_stereo: true,
        }
    }

    /// Orchestrator configured from an [`EditorConfig`].
    pub fn from_config(config: &EditorConfig, events: Sender<EditEvent>) -> Result<Self> {
        let workers = Arc::new(Partitioner::new(config.worker_count())?);
        Ok(Self::new(workers, events)
            .with_method(config.transform)
            .with_mono_to_stereo(config.paste.mono_to_stereo))
    }

    /// Select the transform method.
    pub fn with_method(mut self, method: TransformMethod) -> Self {
        self.spectral = self.spectral.with_method(method);
        self
    }

    /// Whether a mono clip is inserted into both channels of a stereo document.
    ///
    /// When disabled the right channel receives silence of the same length.
    pub fn with_mono_to_stereo(mut self, enabled: bool) -> Self {
        self.mono_to_stereo = enabled;
        self
    }

    /// Spectral engine in use.
    pub fn spectral(&self) -> &SpectralEngine {
        &self.spectral
    }

    fn publish(&self, event: EditEvent) {
        // A closed display is not an error
        let _ = self.events.send(event);
    }

    /// Forward-transform `selection` of `channel` on a background unit.
    ///
    /// The unit publishes [`EditEvent::Spectrum`] and returns the points.
    /// An empty or out-of-range selection is skipped with `Ok(None)`.
    pub fn analyze(
        &self,
        doc: &Document,
        channel: ChannelId,
        selection: Selection,
        window: WindowFunction,
    ) -> Result<Option<EditHandle<Vec<SpectrumPoint>>>> {
        let header = doc.require_header()?;
        let buffer = doc.require_channel(channel)?;
        let samples = {
            let buf = buffer.lock();
            if !selection.fits(buf.len()) {
                tracing::warn!(
                    %channel,
                    ?selection,
                    len = buf.len(),
                    "analyze skipped: invalid selection"
                );
                return Ok(None);
            }
            buf[selection.range()].to_vec()
        };

        let this = self.clone();
        spawn_unit(format!("wavedit-analyze-{channel}"), move || {
            let started = Instant::now();
            let bins = this.spectral.forward(&samples, window);
            let points = spectrum_points(&bins, header.sample_rate);
            this.publish(EditEvent::Spectrum {
                channel,
                points: points.clone(),
                cursor_interval: cursor_interval(bins.len(), header.sample_rate),
            });
            tracing::info!(
                %channel,
                bins = bins.len(),
                %window,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "analyzed"
            );
            Ok(points)
        })
        .map(Some)
    }

    /// Low-pass `channel` at `cutoff_hz` on a background unit.
    ///
    /// `bins` is the length of the spectrum the cutoff was read from and sets
    /// the kernel length. The kernel is convolved over the whole channel and
    /// written back in place; the unit publishes [`EditEvent::SamplesChanged`]
    /// and returns the new length. `bins == 0` is skipped with `Ok(None)`.
    pub fn apply_filter(
        &self,
        doc: &Document,
        channel: ChannelId,
        cutoff_hz: f64,
        bins: usize,
    ) -> Result<Option<EditHandle<usize>>> {
        let header = doc.require_header()?;
        let buffer = doc.require_channel(channel)?.clone();
        if bins == 0 {
            tracing::warn!(%channel, "filter skipped: no spectrum");
            return Ok(None);
        }

        let this = self.clone();
        spawn_unit(format!("wavedit-filter-{channel}"), move || {
            let started = Instant::now();
            let mask = create_filter(bins, cutoff_hz, header.sample_rate);
            let kernel = this.spectral.inverse(&mask);

            let len = {
                let mut buf = buffer.lock();
                let filtered = this.convolver.convolve(&kernel, &buf, false);
                *buf = filtered;
                buf.len()
            };

            this.publish(EditEvent::SamplesChanged { channel, len });
            tracing::info!(
                %channel,
                cutoff_hz,
                kernel_len = kernel.len(),
                len,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "filter applied"
            );
            Ok(len)
        })
        .map(Some)
    }

    /// Paste `clip` before sample `position`.
    ///
    /// - Format-less document: adopts the clip's header and samples.
    /// - Same sample rate: bit-mapped and inserted immediately.
    /// - Higher clip rate: downsample-paste on background units.
    /// - Lower clip rate: upsample-paste on background units.
    ///
    /// A mono clip goes into both channels of a stereo document (or into the
    /// left one with silence on the right, when disabled); the right channel
    /// of a stereo clip is dropped for a mono document. An empty clip is
    /// skipped.
    pub fn paste(
        &self,
        doc: &mut Document,
        clip: &ClipboardData,
        position: usize,
    ) -> Result<PasteJob> {
        clip.header.validate()?;
        let Some(header) = doc.header() else {
            doc.adopt(clip);
            for id in [ChannelId::Left, ChannelId::Right] {
                if let Some(buffer) = doc.channel(id) {
                    self.publish(EditEvent::SamplesChanged {
                        channel: id,
                        len: buffer.len(),
                    });
                }
            }
            tracing::info!(
                sample_rate = clip.sample_rate(),
                bits = clip.header.bits_per_sample,
                channels = clip.channels.channel_count(),
                "pasted into empty document"
            );
            return Ok(PasteJob {
                kind: PasteKind::Adopted,
                pending: None,
            });
        };

        if clip.is_empty() {
            tracing::warn!("paste skipped: empty clip");
            return Ok(PasteJob {
                kind: PasteKind::Direct,
                pending: None,
            });
        }

        let plan = PastePlan::new(self, doc, clip, header, position)?;
        if clip.sample_rate() == header.sample_rate {
            plan.direct(self);
            return Ok(PasteJob {
                kind: PasteKind::Direct,
                pending: None,
            });
        }

        let kind = if header.sample_rate < clip.sample_rate() {
            PasteKind::Downsample
        } else {
            PasteKind::Upsample
        };
        let this = self.clone();
        let handle = spawn_unit("wavedit-paste".to_string(), move || {
            this.resampled_paste(plan, kind)
        })?;
        Ok(PasteJob {
            kind,
            pending: Some(handle),
        })
    }

    /// Coordinating unit of a resampled paste.
    fn resampled_paste(&self, plan: PastePlan, kind: PasteKind) -> Result<()> {
        let started = Instant::now();
        let clip_rate = plan.clip_header.sample_rate;
        let doc_rate = plan.doc_header.sample_rate;

        // Kernel spans the clip; the cutoff is the lower of the two Nyquists
        let (cutoff, mask_rate) = match kind {
            PasteKind::Downsample => (f64::from(doc_rate) / 2.0, clip_rate),
            _ => (f64::from(clip_rate) / 2.0, doc_rate),
        };
        let mask = create_filter(plan.kernel_len, cutoff, mask_rate);
        let kernel = Arc::new(self.spectral.inverse(&mask));
        tracing::debug!(kernel_len = kernel.len(), cutoff, ?kind, "paste kernel ready");

        let units = plan
            .routes
            .into_iter()
            .map(|route| {
                let this = self.clone();
                let kernel = Arc::clone(&kernel);
                let name = format!("wavedit-paste-{}", route.source);
                let (clip_header, doc_header, position, silence) =
                    (plan.clip_header, plan.doc_header, plan.position, plan.silence);
                spawn_unit(name, move || {
                    let samples = match kind {
                        PasteKind::Downsample => this.filter_then_downsample(
                            &kernel,
                            &route.samples,
                            clip_header,
                            doc_header,
                        )?,
                        _ => this.upsample_then_filter(
                            &kernel,
                            &route.samples,
                            clip_header,
                            doc_header,
                        )?,
                    };
                    route.splice(&this, position, &samples, silence);
                    Ok(samples.len())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut inserted = 0;
        for unit in units {
            inserted = unit.wait()?;
        }

        tracing::info!(
            ?kind,
            clip_rate,
            doc_rate,
            inserted,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "resampled paste"
        );
        Ok(())
    }

    fn filter_then_downsample(
        &self,
        kernel: &[i16],
        samples: &[i16],
        clip: RiffHeader,
        doc: RiffHeader,
    ) -> Result<Vec<i16>> {
        let unsigned = clip.bit_depth()? == BitDepth::Eight;
        let filtered = self.convolver.convolve(kernel, samples, unsigned);
        let map = bit_mapper(clip.bit_depth()?, doc.bit_depth()?);
        Ok(downsample(&filtered, clip.sample_rate, doc.sample_rate, map))
    }

    fn upsample_then_filter(
        &self,
        kernel: &[i16],
        samples: &[i16],
        clip: RiffHeader,
        doc: RiffHeader,
    ) -> Result<Vec<i16>> {
        let map = bit_mapper(clip.bit_depth()?, doc.bit_depth()?);
        let repeated = upsample(samples, doc.sample_rate, clip.sample_rate, map);
        let unsigned = doc.bit_depth()? == BitDepth::Eight;
        Ok(self.convolver.convolve(kernel, &repeated, unsigned))
    }
}

/// One clip channel and the document channels it is inserted into.
///
/// `silent` channels get silence of the same length at the same position,
/// so a stereo document keeps equal channel lengths.
#[derive(Debug)]
struct Route {
    source: ChannelId,
    samples: Vec<i16>,
    targets: Vec<(ChannelId, ChannelBuffer)>,
    silent: Vec<(ChannelId, ChannelBuffer)>,
}

impl Route {
    fn splice(
        &self,
        orchestrator: &PipelineOrchestrator,
        position: usize,
        samples: &[i16],
        silence: i16,
    ) {
        for (id, target) in &self.targets {
            let len = target.insert(position, samples);
            orchestrator.publish(EditEvent::SamplesChanged { channel: *id, len });
        }
        if self.silent.is_empty() {
            return;
        }
        let gap = vec![silence; samples.len()];
        for (id, target) in &self.silent {
            let len = target.insert(position, &gap);
            orchestrator.publish(EditEvent::SamplesChanged { channel: *id, len });
        }
    }
}

/// Everything a paste needs, detached from the document borrow.
#[derive(Debug)]
struct PastePlan {
    clip_header: RiffHeader,
    doc_header: RiffHeader,
    position: usize,
    kernel_len: usize,
    silence: i16,
    routes: Vec<Route>,
}

impl PastePlan {
    fn new(
        orchestrator: &PipelineOrchestrator,
        doc: &Document,
        clip: &ClipboardData,
        doc_header: RiffHeader,
        position: usize,
    ) -> Result<Self> {
        let left = doc.require_channel(ChannelId::Left)?.clone();
        let right = doc.channel(ChannelId::Right).cloned();

        let mut left_targets = vec![(ChannelId::Left, left)];
        let mut left_silent = Vec::new();
        let mut routes = Vec::with_capacity(2);
        match (&clip.channels.right, right) {
            (Some(clip_right), Some(doc_right)) => routes.push(Route {
                source: ChannelId::Right,
                samples: clip_right.clone(),
                targets: vec![(ChannelId::Right, doc_right)],
                silent: Vec::new(),
            }),
            (None, Some(doc_right)) if orchestrator.mono_to_stereo => {
                left_targets.push((ChannelId::Right, doc_right));
            }
            (None, Some(doc_right)) => left_silent.push((ChannelId::Right, doc_right)),
            (_, None) => {}
        }
        routes.insert(
            0,
            Route {
                source: ChannelId::Left,
                samples: clip.channels.left.clone(),
                targets: left_targets,
                silent: left_silent,
            },
        );

        let silence = match doc_header.bit_depth()? {
            BitDepth::Eight => UNSIGNED_MIDPOINT,
            BitDepth::Sixteen => 0,
        };
        Ok(Self {
            clip_header: clip.header,
            doc_header,
            position,
            kernel_len: clip.len(),
            silence,
            routes,
        })
    }

    /// Same-rate paste, applied on the calling thread.
    fn direct(self, orchestrator: &PipelineOrchestrator) {
        let map = self
            .clip_header
            .bit_depth()
            .ok()
            .zip(self.doc_header.bit_depth().ok())
            .and_then(|(from, to)| bit_mapper(from, to));
        for route in self.routes {
            let samples: Vec<i16> = match map {
                Some(map) => route.samples.iter().map(|&s| map(s)).collect(),
                None => route.samples.clone(),
            };
            route.splice(orchestrator, self.position, &samples, self.silence);
        }
        tracing::info!(position = self.position, "pasted");
    }
}
