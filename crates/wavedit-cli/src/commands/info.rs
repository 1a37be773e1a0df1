//! Display WAV file metadata.

use clap::Args;
use wavedit_io::{DeviceFormat, read_wav_info};

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;
    let header = info.header;
    let device = DeviceFormat::from_header(&header);

    println!("File:        {}", args.file.display());
    println!("Format:      PCM {}-bit", header.bits_per_sample);
    println!(
        "Channels:    {} ({})",
        header.channels,
        if header.is_stereo() { "stereo" } else { "mono" }
    );
    println!("Sample Rate: {} Hz", header.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );
    println!("Block Align: {} bytes", device.block_align);
    println!("Byte Rate:   {} bytes/s", device.avg_bytes_per_sec);
    println!(
        "Data:        {} ({} ms playback)",
        format_bytes(u64::from(header.data_size)),
        device.duration_ms(header.data_size as usize)
    );

    let file_size = std::fs::metadata(&args.file)?.len();
    println!("File Size:   {}", format_bytes(file_size));

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
