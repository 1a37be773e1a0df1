//! Shared CLI helpers used across multiple commands.

use clap::ValueEnum;
use crossbeam::channel::{Receiver, unbounded};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use wavedit_config::EditorConfig;
use wavedit_editor::{
    ChannelId, ClipboardData, Document, EditEvent, PasteKind, PipelineOrchestrator,
};
use wavedit_io::{read_wav, write_wav};

/// Channel selector for commands that act on one channel.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ChannelArg {
    /// Left (or only) channel
    #[default]
    Left,
    /// Right channel of a stereo file
    Right,
}

impl From<ChannelArg> for ChannelId {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Left => ChannelId::Left,
            ChannelArg::Right => ChannelId::Right,
        }
    }
}

/// Parse an `A..B` sample range for clap's `value_parser`.
///
/// Bounds may be given in either order; selections normalize them.
pub fn parse_range(s: &str) -> Result<(usize, usize), String> {
    let Some((a, b)) = s.split_once("..") else {
        return Err(format!("Invalid range: '{}' (expected START..END)", s));
    };
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("Invalid range bound '{}': {}", v, e))
    };
    Ok((parse(a)?, parse(b)?))
}

/// Parse a bit depth for clap's `value_parser`.
pub fn parse_bits(s: &str) -> Result<u16, String> {
    match s {
        "8" => Ok(8),
        "16" => Ok(16),
        _ => Err(format!("Unsupported bit depth: '{}' (expected 8 or 16)", s)),
    }
}

/// Build the orchestrator from `config` together with its event receiver.
pub fn pipeline(
    config: &EditorConfig,
) -> anyhow::Result<(PipelineOrchestrator, Receiver<EditEvent>)> {
    let (tx, rx) = unbounded();
    Ok((PipelineOrchestrator::from_config(config, tx)?, rx))
}

/// Log and discard pending display events.
pub fn drain_events(events: &Receiver<EditEvent>) {
    for event in events.try_iter() {
        match event {
            EditEvent::Spectrum {
                channel,
                points,
                cursor_interval,
            } => {
                tracing::debug!(%channel, bins = points.len(), cursor_interval, "spectrum ready");
            }
            EditEvent::SamplesChanged { channel, len } => {
                tracing::debug!(%channel, len, "samples changed");
            }
        }
    }
}

/// Spinner text for a paste in progress.
pub fn paste_message(kind: PasteKind) -> &'static str {
    match kind {
        PasteKind::Adopted | PasteKind::Direct => "Pasting",
        PasteKind::Downsample => "Filtering and downsampling",
        PasteKind::Upsample => "Upsampling and filtering",
    }
}

/// Run `work` (usually a join on a background unit) behind a spinner.
pub fn with_spinner<T>(
    message: impl Into<String>,
    work: impl FnOnce() -> wavedit_editor::Result<T>,
) -> anyhow::Result<T> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed_precise}]")?,
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = work();
    pb.finish_and_clear();
    Ok(result?)
}

/// Open a WAV file as a document.
pub fn load_document(path: &Path) -> anyhow::Result<Document> {
    let (channels, header) = read_wav(path)?;
    Ok(Document::from_channels(header, channels)?)
}

/// Open a WAV file as a clip.
pub fn load_clip(path: &Path) -> anyhow::Result<ClipboardData> {
    let (channels, header) = read_wav(path)?;
    Ok(ClipboardData::new(header, channels))
}

/// Write a document's current contents to a WAV file.
pub fn save_document(doc: &Document, path: &Path) -> anyhow::Result<()> {
    let header = doc.current_header()?;
    write_wav(path, &doc.to_channels(), &header)?;
    println!(
        "Wrote {} ({} samples, {} Hz, {}-bit, {})",
        path.display(),
        doc.len(),
        header.sample_rate,
        header.bits_per_sample,
        if doc.is_stereo() { "stereo" } else { "mono" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_parse_either_order() {
        assert_eq!(parse_range("10..20"), Ok((10, 20)));
        assert_eq!(parse_range("20..10"), Ok((20, 10)));
        assert_eq!(parse_range(" 3 .. 4"), Ok((3, 4)));
        assert!(parse_range("10-20").is_err());
        assert!(parse_range("a..2").is_err());
    }

    #[test]
    fn only_eight_and_sixteen_bits() {
        assert_eq!(parse_bits("8"), Ok(8));
        assert_eq!(parse_bits("16"), Ok(16));
        assert!(parse_bits("24").is_err());
    }
}
