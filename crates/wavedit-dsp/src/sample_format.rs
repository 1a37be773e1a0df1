//! Bit-depth mapping between 8-bit unsigned and 16-bit signed samples.
//!
//! Both encodings live in `i16` containers. 8-bit samples use the unsigned
//! range 0..=255 (128 is silence), 16-bit samples the full signed range.
//! Conversions truncate toward zero, so a round trip may be off by one step.

use crate::{Error, Result};

/// Map a 16-bit signed sample to the 8-bit unsigned range.
///
/// `((sample / 32767 + 1) / 2) * 255`, truncated.
///
/// ```rust
/// use wavedit_dsp::to_8bit;
///
/// assert_eq!(to_8bit(i16::MAX), 255);
/// assert_eq!(to_8bit(i16::MIN), 0);
/// assert_eq!(to_8bit(0), 127);
/// ```
#[inline]
pub fn to_8bit(sample: i16) -> i16 {
    (((f64::from(sample) / f64::from(i16::MAX) + 1.0) / 2.0) * f64::from(u8::MAX)) as i16
}

/// Map an 8-bit unsigned sample to the 16-bit signed range.
///
/// The upper half of the 8-bit range (`sample / 255 >= 0.5`) maps to
/// `(normalized - 0.5) * 32767`; the lower half to `-(1 - 2 * normalized) * 32767`.
/// The two halves are scaled differently, so positive values come back at
/// half amplitude.
#[inline]
pub fn to_16bit(sample: i16) -> i16 {
    let normalized = f64::from(sample) / f64::from(u8::MAX);
    let max = f64::from(i16::MAX);
    if normalized >= 0.5 {
        ((normalized - 0.5) * max) as i16
    } else {
        (-((1.0 - normalized * 2.0) * max)) as i16
    }
}

/// PCM sample width supported by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BitDepth {
    /// 8-bit unsigned samples, one byte each.
    Eight,
    /// 16-bit signed little-endian samples.
    Sixteen,
}

impl BitDepth {
    /// Bits per sample.
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
        }
    }

    /// Bytes per sample.
    pub fn bytes(self) -> usize {
        usize::from(self.bits() / 8)
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = Error;

    fn try_from(bits: u16) -> Result<Self> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            other => Err(Error::UnsupportedBitDepth(other)),
        }
    }
}

/// Pick the mapping applied when moving samples from `from` to `to`.
///
/// Returns `None` when the depths match.
pub fn bit_mapper(from: BitDepth, to: BitDepth) -> Option<fn(i16) -> i16> {
    match (from, to) {
        (BitDepth::Sixteen, BitDepth::Eight) => Some(to_8bit),
        (BitDepth::Eight, BitDepth::Sixteen) => Some(to_16bit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_8bit_endpoints() {
        assert_eq!(to_8bit(32767), 255);
        assert_eq!(to_8bit(-32768), 0);
        let mid = to_8bit(0);
        assert!(mid == 127 || mid == 128, "midpoint was {mid}");
    }

    #[test]
    fn to_16bit_endpoints() {
        assert_eq!(to_16bit(0), -32767);
        assert_eq!(to_16bit(255), 16383);
        // 128 / 255 is just above one half
        assert_eq!(to_16bit(128), 64);
        assert_eq!(to_16bit(127), -128);
    }

    #[test]
    fn to_8bit_is_monotonic() {
        let mut prev = to_8bit(i16::MIN);
        for x in (i16::MIN..=i16::MAX).step_by(7) {
            let y = to_8bit(x);
            assert!(y >= prev, "to_8bit({x}) = {y} < {prev}");
            prev = y;
        }
    }

    #[test]
    fn negative_half_round_trips_within_one_step() {
        // 65535 / 255 = 257 16-bit steps per 8-bit step
        for x in (i16::MIN..0).step_by(13) {
            let back = to_16bit(to_8bit(x));
            assert!(
                (i32::from(back) - i32::from(x)).abs() <= 257,
                "{x} -> {back}"
            );
        }
    }

    #[test]
    fn bit_depth_from_bits() {
        assert_eq!(BitDepth::try_from(8).unwrap(), BitDepth::Eight);
        assert_eq!(BitDepth::try_from(16).unwrap(), BitDepth::Sixteen);
        assert!(matches!(
            BitDepth::try_from(24),
            Err(Error::UnsupportedBitDepth(24))
        ));
    }

    #[test]
    fn mapper_selection() {
        assert!(bit_mapper(BitDepth::Eight, BitDepth::Eight).is_none());
        let down = bit_mapper(BitDepth::Sixteen, BitDepth::Eight).unwrap();
        assert_eq!(down(i16::MAX), 255);
        let up = bit_mapper(BitDepth::Eight, BitDepth::Sixteen).unwrap();
        assert_eq!(up(0), -32767);
    }
}
