//! Spectrum of a selection.

use super::common::{ChannelArg, drain_events, load_document, pipeline, with_spinner};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use wavedit_config::EditorConfig;
use wavedit_dsp::{SpectrumPoint, WindowFunction, cursor_interval};
use wavedit_editor::{ChannelId, EditEvent, Selection};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// First sample of the selection
    #[arg(long, default_value = "0")]
    start: usize,

    /// End of the selection (exclusive, defaults to the end of the file)
    #[arg(long)]
    end: Option<usize>,

    /// Channel to analyze
    #[arg(long, value_enum, default_value_t = ChannelArg::Left)]
    channel: ChannelArg,

    /// Window function (rectangular, bartlett, welch, sine); defaults to the configured one
    #[arg(long)]
    window: Option<WindowFunction>,

    /// Write every spectrum point to a CSV file
    #[arg(long, value_name = "OUT")]
    csv: Option<PathBuf>,

    /// Show top N peaks up to Nyquist
    #[arg(long, default_value = "10")]
    peaks: usize,

    /// Print the full spectrum as JSON instead of the peak table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SpectrumReport<'a> {
    file: String,
    channel: &'static str,
    window: WindowFunction,
    start: usize,
    end: usize,
    sample_rate: u32,
    cursor_interval: u32,
    points: &'a [SpectrumPoint],
}

/// Run the analyze command.
pub fn run(args: AnalyzeArgs, config: &EditorConfig) -> anyhow::Result<()> {
    let doc = load_document(&args.input)?;
    let header = doc.require_header()?;
    let channel = ChannelId::from(args.channel);
    let window = args.window.unwrap_or(config.window);

    let end = args.end.unwrap_or(doc.len());
    let selection = Selection::new(args.start, end);
    if selection.is_empty() {
        anyhow::bail!("Empty selection {}..{}", args.start, end);
    }

    let (pipeline, events) = pipeline(config)?;
    let Some(handle) = pipeline.analyze(&doc, channel, selection, window)? else {
        anyhow::bail!(
            "Selection {}..{} is outside the {} channel ({} samples)",
            selection.start(),
            selection.end(),
            channel,
            doc.require_channel(channel)?.len()
        );
    };
    let points = with_spinner(
        format!("Transforming {} samples", selection.len()),
        || handle.wait(),
    )?;

    // The spectrum event carries the view's cursor interval
    let interval = events
        .try_iter()
        .find_map(|event| match event {
            EditEvent::Spectrum {
                cursor_interval, ..
            } => Some(cursor_interval),
            EditEvent::SamplesChanged { .. } => None,
        })
        .unwrap_or_else(|| cursor_interval(points.len(), header.sample_rate));
    drain_events(&events);

    if args.json {
        let report = SpectrumReport {
            file: args.input.display().to_string(),
            channel: channel.name(),
            window,
            start: selection.start(),
            end: selection.end(),
            sample_rate: header.sample_rate,
            cursor_interval: interval,
            points: &points,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Analyzing: {}", args.input.display());
        println!(
            "  Selection: {}..{} ({} channel, {} samples)",
            selection.start(),
            selection.end(),
            channel,
            selection.len()
        );
        println!("  Window: {}", window);
        println!("  Bins: {}", points.len());
        println!("  Cursor interval: {} Hz", interval);

        let mut indexed: Vec<&SpectrumPoint> = points[..=points.len() / 2].iter().collect();
        indexed.sort_by(|a, b| b.amplitude.total_cmp(&a.amplitude));

        println!("\nTop {} frequency peaks:", args.peaks);
        println!("  {:>10}  {:>10}", "Freq (Hz)", "Amplitude");
        println!("  {:>10}  {:>10}", "---------", "---------");
        for point in indexed.iter().take(args.peaks) {
            println!("  {:>10.1}  {:>10.2}", point.frequency, point.amplitude);
        }
    }

    if let Some(output_path) = args.csv {
        let mut csv = String::new();
        csv.push_str("frequency_hz,amplitude\n");
        for point in &points {
            csv.push_str(&format!("{:.2},{:.4}\n", point.frequency, point.amplitude));
        }
        std::fs::write(&output_path, csv)?;
        if !args.json {
            println!("\nWrote spectrum to {}", output_path.display());
        }
    }

    Ok(())
}
