//! common types for the block encoder

use serde::{Deserialize, Serialize};

use super::error::{LdacError, LdacResult};

// constants

/// leading byte of every frame
pub const SYNC_BYTE: u8 = 0xAA;

/// sync + header + length
pub const FRAME_HEADER_SIZE: usize = 3;

/// samples per channel consumed by one encode call
pub const BLOCK_SAMPLES: usize = 128;

/// analysis window length (previous tail + new block)
pub const WINDOW_SAMPLES: usize = 2 * BLOCK_SAMPLES;

/// frequency coefficients produced per channel per block
pub const NUM_COEFFICIENTS: usize = BLOCK_SAMPLES;

/// channel pair at most
pub const MAX_CHANNELS: usize = 2;

/// header byte layout: sfIdx in bits 5-7, reserved 3-4, channel mode 0-2
pub const SF_INDEX_SHIFT: u8 = 5;
pub const CHANNEL_MODE_MASK: u8 = 0x07;
pub const HEADER_RESERVED_MASK: u8 = 0x18;

/// typical A2DP transport MTU
pub const DEFAULT_MTU: u32 = 679;

// types

/// channel mode
///
/// | Value | Mode        | Active channels |
/// |-------|-------------|-----------------|
/// | 0     | Stereo      | 2               |
/// | 1     | DualChannel | 2               |
/// | 2     | Mono        | 1               |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ChannelMode {
    Stereo = 0x00,
    DualChannel = 0x01,
    Mono = 0x02,
}

impl ChannelMode {
    pub const ALL: [ChannelMode; 3] = [
        ChannelMode::Stereo,
        ChannelMode::DualChannel,
        ChannelMode::Mono,
    ];

    /// number of interleaved channels in a pcm block
    pub fn channels(self) -> usize {
        match self {
            ChannelMode::Stereo | ChannelMode::DualChannel => 2,
            ChannelMode::Mono => 1,
        }
    }

    /// 3-bit field written into the header byte
    pub fn bits(self) -> u8 {
        self as u8 & CHANNEL_MODE_MASK
    }

    pub fn name(self) -> &'static str {
        match self {
            ChannelMode::Stereo => "stereo",
            ChannelMode::DualChannel => "dual",
            ChannelMode::Mono => "mono",
        }
    }
}

impl std::str::FromStr for ChannelMode {
    type Err = LdacError;

    fn from_str(s: &str) -> LdacResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stereo" => Ok(ChannelMode::Stereo),
            "dual" | "dual_channel" => Ok(ChannelMode::DualChannel),
            "mono" => Ok(ChannelMode::Mono),
            _ => Err(LdacError::InvalidChannelMode(-1)),
        }
    }
}

impl TryFrom<i32> for ChannelMode {
    type Error = LdacError;

    fn try_from(v: i32) -> LdacResult<Self> {
        match v {
            0 => Ok(ChannelMode::Stereo),
            1 => Ok(ChannelMode::DualChannel),
            2 => Ok(ChannelMode::Mono),
            _ => Err(LdacError::InvalidChannelMode(v)),
        }
    }
}

/// pcm sample layout of the input block (always little-endian, interleaved)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SampleFormat {
    S16 = 0x1,
    S24 = 0x2,
    S32 = 0x3,
    F32 = 0x4,
}

impl SampleFormat {
    pub const ALL: [SampleFormat; 4] = [
        SampleFormat::S16,
        SampleFormat::S24,
        SampleFormat::S32,
        SampleFormat::F32,
    ];

    /// bytes per single-channel sample
    pub fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::S16 => 2,
            SampleFormat::S24 => 3,
            SampleFormat::S32 | SampleFormat::F32 => 4,
        }
    }
}

impl TryFrom<i32> for SampleFormat {
    type Error = LdacError;

    fn try_from(v: i32) -> LdacResult<Self> {
        match v {
            1 => Ok(SampleFormat::S16),
            2 => Ok(SampleFormat::S24),
            3 => Ok(SampleFormat::S32),
            4 => Ok(SampleFormat::F32),
            _ => Err(LdacError::InvalidSampleFormat(v)),
        }
    }
}

/// supported sampling frequencies, in sfIdx order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum SamplingFrequency {
    Hz44100,
    Hz48000,
    Hz88200,
    Hz96000,
}

impl SamplingFrequency {
    pub const ALL: [SamplingFrequency; 4] = [
        SamplingFrequency::Hz44100,
        SamplingFrequency::Hz48000,
        SamplingFrequency::Hz88200,
        SamplingFrequency::Hz96000,
    ];

    pub fn hz(self) -> u32 {
        match self {
            SamplingFrequency::Hz44100 => 44100,
            SamplingFrequency::Hz48000 => 48000,
            SamplingFrequency::Hz88200 => 88200,
            SamplingFrequency::Hz96000 => 96000,
        }
    }

    /// 2-bit sfIdx written into the header byte
    pub fn index(self) -> u8 {
        match self {
            SamplingFrequency::Hz44100 => 0,
            SamplingFrequency::Hz48000 => 1,
            SamplingFrequency::Hz88200 => 2,
            SamplingFrequency::Hz96000 => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn from_hz(hz: u32) -> LdacResult<Self> {
        Self::ALL
            .into_iter()
            .find(|fs| fs.hz() == hz)
            .ok_or(LdacError::UnsupportedSamplingFrequency(hz as i64))
    }

    /// duration of one block in microseconds
    pub fn block_duration_us(self) -> u64 {
        BLOCK_SAMPLES as u64 * 1_000_000 / self.hz() as u64
    }
}

impl TryFrom<u32> for SamplingFrequency {
    type Error = LdacError;

    fn try_from(hz: u32) -> LdacResult<Self> {
        Self::from_hz(hz)
    }
}

impl From<SamplingFrequency> for u32 {
    fn from(fs: SamplingFrequency) -> u32 {
        fs.hz()
    }
}
