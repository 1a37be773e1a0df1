//! Paste one file into another.

use super::common::{
    drain_events, load_clip, load_document, paste_message, pipeline, save_document, with_spinner,
};
use clap::Args;
use std::path::PathBuf;
use wavedit_config::EditorConfig;

#[derive(Args)]
pub struct PasteArgs {
    /// WAV file to paste into
    #[arg(value_name = "TARGET")]
    target: PathBuf,

    /// WAV file to paste
    #[arg(value_name = "CLIP")]
    clip: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUT")]
    output: PathBuf,

    /// Sample position in the target to paste before (clamped to its length)
    #[arg(long, value_name = "SAMPLE", default_value = "0")]
    at: usize,
}

/// Run the paste command.
pub fn run(args: PasteArgs, config: &EditorConfig) -> anyhow::Result<()> {
    let mut doc = load_document(&args.target)?;
    let clip = load_clip(&args.clip)?;
    let header = doc.require_header()?;

    println!("Pasting: {}", args.clip.display());
    println!(
        "  Clip:   {} Hz {}-bit, {} samples",
        clip.sample_rate(),
        clip.header.bits_per_sample,
        clip.len()
    );
    println!(
        "  Target: {} Hz {}-bit, {} samples (at {})",
        header.sample_rate,
        header.bits_per_sample,
        doc.len(),
        args.at.min(doc.len())
    );

    let (pipeline, events) = pipeline(config)?;
    let job = pipeline.paste(&mut doc, &clip, args.at)?;
    let kind = with_spinner(paste_message(job.kind), || job.wait())?;
    println!("  Mode:   {:?}", kind);
    drain_events(&events);

    save_document(&doc, &args.output)
}
