//! Sample rate and bit depth conversion.
//!
//! The input is pasted into an empty document of the target format, so the
//! conversion runs through the same anti-aliased paths as an interactive paste.

use super::common::{
    drain_events, load_clip, parse_bits, paste_message, pipeline, save_document, with_spinner,
};
use clap::Args;
use std::path::PathBuf;
use wavedit_config::EditorConfig;
use wavedit_dsp::RiffHeader;
use wavedit_editor::Document;

#[derive(Args)]
pub struct ResampleArgs {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file
    output: PathBuf,

    /// Target sample rate in Hz
    #[arg(long)]
    rate: u32,

    /// Target bit depth (8 or 16; defaults to the input's)
    #[arg(long, value_parser = parse_bits)]
    bits: Option<u16>,
}

/// Run the resample command.
pub fn run(args: ResampleArgs, config: &EditorConfig) -> anyhow::Result<()> {
    let clip = load_clip(&args.input)?;
    let bits = args.bits.unwrap_or(clip.header.bits_per_sample);
    let target = RiffHeader::new(args.rate, bits).with_channels(clip.channels.channel_count());
    let mut doc = Document::with_format(target)?;

    println!("Resampling: {}", args.input.display());
    println!(
        "  {} Hz {}-bit -> {} Hz {}-bit ({} samples)",
        clip.sample_rate(),
        clip.header.bits_per_sample,
        target.sample_rate,
        target.bits_per_sample,
        clip.len()
    );

    let (pipeline, events) = pipeline(config)?;
    let job = pipeline.paste(&mut doc, &clip, 0)?;
    let kind = with_spinner(paste_message(job.kind), || job.wait())?;
    tracing::debug!(?kind, "resample finished");
    drain_events(&events);

    save_document(&doc, &args.output)
}
