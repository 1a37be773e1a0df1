//! Raw PCM byte layout and the playback format descriptor.
//!
//! 8-bit samples are one unsigned byte each; 16-bit samples are two bytes,
//! little-endian, signed. Stereo frames interleave `L, R`.

use crate::Result;
use wavedit_dsp::{BitDepth, ChannelPair, RiffHeader};

/// Decode an interleaved PCM byte buffer into channel buffers.
///
/// Bytes that do not make up a whole frame at the end are ignored.
pub fn decode_pcm(bytes: &[u8], header: &RiffHeader) -> Result<ChannelPair> {
    header.validate()?;
    let frame = usize::from(header.block_align());
    let whole = bytes.len() - bytes.len() % frame;
    let bytes = &bytes[..whole];

    let samples: Vec<i16> = match header.bit_depth()? {
        BitDepth::Eight => bytes.iter().map(|&b| i16::from(b)).collect(),
        BitDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
    };

    Ok(ChannelPair::deinterleave(&samples, header.channels))
}

/// Encode channel buffers as interleaved PCM bytes for `header`'s bit depth.
///
/// 8-bit samples keep their low byte, matching a narrowing byte cast.
pub fn encode_pcm(channels: &ChannelPair, header: &RiffHeader) -> Result<Vec<u8>> {
    let depth = header.bit_depth()?;
    let samples = channels.interleave();
    let mut out = Vec::with_capacity(samples.len() * depth.bytes());

    match depth {
        BitDepth::Eight => out.extend(samples.iter().map(|&s| s as u8)),
        BitDepth::Sixteen => {
            for s in samples {
                out.extend_from_slice(&s.to_le_bytes());
            }
        }
    }

    Ok(out)
}

/// Format descriptor handed to a playback or recording device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceFormat {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Bytes per frame.
    pub block_align: u16,
    /// Bytes per second.
    pub avg_bytes_per_sec: u32,
}

impl DeviceFormat {
    /// Describe the byte stream produced by [`encode_pcm`] for `header`.
    pub fn from_header(header: &RiffHeader) -> Self {
        Self {
            channels: header.channels,
            sample_rate: header.sample_rate,
            bits_per_sample: header.bits_per_sample,
            block_align: header.block_align(),
            avg_bytes_per_sec: header.byte_rate(),
        }
    }

    /// Playback time of `byte_len` bytes, in milliseconds.
    pub fn duration_ms(&self, byte_len: usize) -> u64 {
        if self.avg_bytes_per_sec == 0 {
            return 0;
        }
        byte_len as u64 * 1000 / u64::from(self.avg_bytes_per_sec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_8bit_stereo() {
        let header = RiffHeader::new(8000, 8).with_channels(2);
        let pair = decode_pcm(&[0, 255, 128, 1], &header).unwrap();
        assert_eq!(pair.left, vec![0, 128]);
        assert_eq!(pair.right, Some(vec![255, 1]));
    }

    #[test]
    fn decode_16bit_little_endian() {
        let header = RiffHeader::new(8000, 16);
        let pair = decode_pcm(&[0x34, 0x12, 0xff, 0xff], &header).unwrap();
        assert_eq!(pair.left, vec![0x1234, -1]);
        assert!(pair.right.is_none());
    }

    #[test]
    fn decode_drops_partial_frame() {
        let header = RiffHeader::new(8000, 16).with_channels(2);
        let pair = decode_pcm(&[1, 0, 2, 0, 3, 0, 4], &header).unwrap();
        assert_eq!(pair.left, vec![1]);
        assert_eq!(pair.right, Some(vec![2]));
    }

    #[test]
    fn encode_matches_decode_layout() {
        let header = RiffHeader::new(22050, 16).with_channels(2);
        let pair = ChannelPair::stereo(vec![-2, 300], vec![7, i16::MIN]);
        let bytes = encode_pcm(&pair, &header).unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(decode_pcm(&bytes, &header).unwrap(), pair);
    }

    #[test]
    fn encode_8bit_keeps_low_byte() {
        let header = RiffHeader::new(8000, 8);
        let bytes = encode_pcm(&ChannelPair::mono(vec![0, 128, 255, 256]), &header).unwrap();
        assert_eq!(bytes, vec![0, 128, 255, 0]);
    }

    #[test]
    fn rejects_unsupported_depth() {
        let header = RiffHeader::new(8000, 24);
        assert!(decode_pcm(&[0; 6], &header).is_err());
        assert!(encode_pcm(&ChannelPair::mono(vec![0]), &header).is_err());
    }

    #[test]
    fn device_format_fields() {
        let format = DeviceFormat::from_header(&RiffHeader::new(44100, 16).with_channels(2));
        assert_eq!(format.block_align, 4);
        assert_eq!(format.avg_bytes_per_sec, 176400);
        assert_eq!(format.duration_ms(176400), 1000);
        assert_eq!(format.duration_ms(88200), 500);
    }
}
