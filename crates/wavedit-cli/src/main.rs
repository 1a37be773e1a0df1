//! wavedit CLI - command-line front end for the wavedit waveform editor.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wavedit_config::EditorConfig;

#[derive(Parser)]
#[command(name = "wavedit")]
#[command(author, version, about = "wavedit waveform editor CLI", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Editor configuration file (defaults to the user config file)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show WAV header and duration
    Info(commands::info::InfoArgs),

    /// Compute the spectrum of a selection
    Analyze(commands::analyze::AnalyzeArgs),

    /// Low-pass filter a file through the spectral kernel
    Filter(commands::filter::FilterArgs),

    /// Convert a file to another sample rate and bit depth
    Resample(commands::resample::ResampleArgs),

    /// Paste one file into another, resampling as needed
    Paste(commands::paste::PasteArgs),

    /// Delete, cut or copy a range of samples
    Edit(commands::edit::EditArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let config = EditorConfig::load_or_default(cli.config.as_deref())?;
    tracing::debug!(
        window = %config.window,
        partitions = config.worker_count(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Analyze(args) => commands::analyze::run(args, &config),
        Commands::Filter(args) => commands::filter::run(args, &config),
        Commands::Resample(args) => commands::resample::run(args, &config),
        Commands::Paste(args) => commands::paste::run(args, &config),
        Commands::Edit(args) => commands::edit::run(args, &config),
    }
}
