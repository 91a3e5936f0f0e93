//! Quality modes and the payload/bitrate table
//!
//! Each quality mode fixes the payload size of every frame. The same table
//! sizes the output buffer an encode call needs and yields the reported
//! bitrate, so the two can never disagree.

use serde::{Deserialize, Serialize};

use super::error::{LdacError, LdacResult};
use super::types::{SamplingFrequency, BLOCK_SAMPLES, FRAME_HEADER_SIZE};

/// Encoder quality mode (eqmid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum QualityMode {
    /// 330 bytes per block, ~990 kbps at 96 kHz
    High = 0,
    /// 220 bytes per block
    Standard = 1,
    /// 110 bytes per block, for congested links
    Mobile = 2,
}

impl QualityMode {
    pub const ALL: [QualityMode; 3] = [QualityMode::High, QualityMode::Standard, QualityMode::Mobile];

    /// Payload bytes carried by every frame in this mode
    pub fn payload_bytes(self) -> usize {
        match self {
            QualityMode::High => 330,
            QualityMode::Standard => 220,
            QualityMode::Mobile => 110,
        }
    }

    /// Full frame size including sync, header and length bytes
    pub fn frame_bytes(self) -> usize {
        FRAME_HEADER_SIZE + self.payload_bytes()
    }

    /// Bitrate in bits per second at the given sampling frequency
    pub fn bitrate(self, fs: SamplingFrequency) -> u32 {
        bitrate(self.payload_bytes(), fs.hz())
    }

    /// Value of the length byte on the wire (low 8 bits of the payload size)
    pub fn length_byte(self) -> u8 {
        (self.payload_bytes() & 0xFF) as u8
    }

    /// Recover the mode from a frame's length byte
    pub fn from_length_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.length_byte() == byte)
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityMode::High => "high",
            QualityMode::Standard => "standard",
            QualityMode::Mobile => "mobile",
        }
    }
}

impl TryFrom<i32> for QualityMode {
    type Error = LdacError;

    fn try_from(v: i32) -> LdacResult<Self> {
        match v {
            0 => Ok(QualityMode::High),
            1 => Ok(QualityMode::Standard),
            2 => Ok(QualityMode::Mobile),
            _ => Err(LdacError::InvalidQualityMode(v)),
        }
    }
}

impl std::str::FromStr for QualityMode {
    type Err = LdacError;

    fn from_str(s: &str) -> LdacResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "high" | "hq" => Ok(QualityMode::High),
            "standard" | "sq" => Ok(QualityMode::Standard),
            "mobile" | "mq" => Ok(QualityMode::Mobile),
            _ => Err(LdacError::InvalidQualityMode(-1)),
        }
    }
}

/// payload bits per block divided by block duration
///
/// bitrate = payload_bytes * 8 * fs / 128
pub fn bitrate(payload_bytes: usize, sampling_frequency: u32) -> u32 {
    let bits = payload_bytes as u64 * 8 * sampling_frequency as u64;
    (bits / BLOCK_SAMPLES as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_table() {
        assert_eq!(QualityMode::High.payload_bytes(), 330);
        assert_eq!(QualityMode::Standard.payload_bytes(), 220);
        assert_eq!(QualityMode::Mobile.payload_bytes(), 110);
        assert_eq!(QualityMode::High.frame_bytes(), 333);
    }

    #[test]
    fn test_bitrate_values() {
        assert_eq!(QualityMode::High.bitrate(SamplingFrequency::Hz44100), 909_562);
        assert_eq!(QualityMode::High.bitrate(SamplingFrequency::Hz96000), 1_980_000);
        assert_eq!(QualityMode::Standard.bitrate(SamplingFrequency::Hz48000), 660_000);
        assert_eq!(QualityMode::Mobile.bitrate(SamplingFrequency::Hz48000), 330_000);
    }

    #[test]
    fn test_length_byte_is_unambiguous() {
        // 330 does not fit a byte; its low 8 bits still differ from 110 and 220
        assert_eq!(QualityMode::High.length_byte(), 0x4A);
        for q in QualityMode::ALL {
            assert_eq!(QualityMode::from_length_byte(q.length_byte()), Some(q));
        }
        assert_eq!(QualityMode::from_length_byte(0), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("HQ".parse::<QualityMode>(), Ok(QualityMode::High));
        assert_eq!("standard".parse::<QualityMode>(), Ok(QualityMode::Standard));
        assert_eq!("mq".parse::<QualityMode>(), Ok(QualityMode::Mobile));
        assert!("ultra".parse::<QualityMode>().is_err());
        assert!(QualityMode::try_from(3).is_err());
    }
}
