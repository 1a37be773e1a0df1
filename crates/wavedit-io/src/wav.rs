//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use wavedit_dsp::{BitDepth, ChannelPair, RiffHeader};

/// Offset between hound's signed 8-bit samples and unsigned PCM bytes.
const EIGHT_BIT_BIAS: i16 = 128;

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Format header as the editor sees it.
    pub header: RiffHeader,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

fn header_from_spec(spec: hound::WavSpec, total_samples: u32) -> Result<RiffHeader> {
    if spec.sample_format != SampleFormat::Int {
        return Err(Error::UnsupportedFormat(
            "IEEE float (expected integer PCM)".into(),
        ));
    }
    let mut header =
        RiffHeader::new(spec.sample_rate, spec.bits_per_sample).with_channels(spec.channels);
    header.validate()?;
    header.data_size = total_samples * u32::from(spec.bits_per_sample / 8);
    Ok(header)
}

fn spec_from_header(header: &RiffHeader) -> hound::WavSpec {
    hound::WavSpec {
        channels: header.channels,
        sample_rate: header.sample_rate,
        bits_per_sample: header.bits_per_sample,
        sample_format: SampleFormat::Int,
    }
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let header = header_from_spec(reader.spec(), reader.len())?;
    let num_frames = u64::from(reader.len()) / u64::from(header.channels);
    let duration_secs = num_frames as f64 / f64::from(header.sample_rate);

    Ok(WavInfo {
        header,
        num_frames,
        duration_secs,
    })
}

/// Read an 8- or 16-bit PCM WAV file into channel buffers.
///
/// 8-bit samples come back in the unsigned 0..=255 range.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(ChannelPair, RiffHeader)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let header = header_from_spec(reader.spec(), reader.len())?;
    let bias = match header.bit_depth()? {
        BitDepth::Eight => EIGHT_BIT_BIAS,
        BitDepth::Sixteen => 0,
    };

    let samples = reader
        .into_samples::<i16>()
        .map(|s| s.map(|v| v + bias))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::debug!(
        path = %path.display(),
        channels = header.channels,
        sample_rate = header.sample_rate,
        bits = header.bits_per_sample,
        samples = samples.len(),
        "read wav"
    );
    Ok((ChannelPair::deinterleave(&samples, header.channels), header))
}

/// Write channel buffers to a PCM WAV file described by `header`.
///
/// The channel count written follows `channels`, not `header.channels`.
/// 8-bit samples outside 0..=255 keep their low byte.
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    channels: &ChannelPair,
    header: &RiffHeader,
) -> Result<()> {
    let header = header.with_channels(channels.channel_count());
    header.validate()?;
    let eight_bit = header.bit_depth()? == BitDepth::Eight;

    let mut writer = WavWriter::create(path.as_ref(), spec_from_header(&header))?;
    for sample in channels.interleave() {
        if eight_bit {
            writer.write_sample(i16::from(sample as u8) - EIGHT_BIT_BIAS)?;
        } else {
            writer.write_sample(sample)?;
        }
    }
    writer.finalize()?;

    tracing::debug!(
        path = %path.as_ref().display(),
        channels = header.channels,
        frames = channels.len(),
        "wrote wav"
    );
    Ok(())
}
