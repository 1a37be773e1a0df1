//! Low-pass filtering through the spectral kernel.

use super::common::{
    ChannelArg, drain_events, load_document, pipeline, save_document, with_spinner,
};
use clap::Args;
use std::path::PathBuf;
use wavedit_config::EditorConfig;
use wavedit_editor::ChannelId;

#[derive(Args)]
pub struct FilterArgs {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file
    output: PathBuf,

    /// Cutoff frequency in Hz
    #[arg(long)]
    cutoff: f64,

    /// Kernel length in bins (defaults to the configured length)
    #[arg(long)]
    kernel: Option<usize>,

    /// Filter only this channel (all channels by default)
    #[arg(long, value_enum)]
    channel: Option<ChannelArg>,
}

/// Run the filter command.
pub fn run(args: FilterArgs, config: &EditorConfig) -> anyhow::Result<()> {
    let doc = load_document(&args.input)?;
    let header = doc.require_header()?;
    let bins = args.kernel.unwrap_or(config.filter.kernel_len);
    if bins == 0 {
        anyhow::bail!("Kernel length must be at least 1");
    }

    let channels: Vec<ChannelId> = match args.channel {
        Some(channel) => vec![channel.into()],
        None if doc.is_stereo() => vec![ChannelId::Left, ChannelId::Right],
        None => vec![ChannelId::Left],
    };

    println!("Filtering: {}", args.input.display());
    println!(
        "  Cutoff: {:.1} Hz (Nyquist {} Hz)",
        args.cutoff,
        header.sample_rate / 2
    );
    println!("  Kernel: {} bins", bins);

    let (pipeline, events) = pipeline(config)?;
    let mut handles = Vec::with_capacity(channels.len());
    for channel in channels {
        if let Some(handle) = pipeline.apply_filter(&doc, channel, args.cutoff, bins)? {
            handles.push((channel, handle));
        }
    }

    for (channel, handle) in handles {
        let len = with_spinner(format!("Convolving {} channel", channel), || handle.wait())?;
        println!("  {} channel: {} samples", channel, len);
    }
    drain_events(&events);

    save_document(&doc, &args.output)
}
