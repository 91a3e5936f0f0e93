//! Frame header and the owned frame value
//!
//! | Byte | Content                                                     |
//! |------|-------------------------------------------------------------|
//! | 0    | sync `0xAA`                                                 |
//! | 1    | `(sfIdx << 5) \| (channelMode & 0x7)`, bits 3-4 reserved (0) |
//! | 2    | payload length, low 8 bits (110 / 220 / 330 → 0x6E/0xDC/0x4A) |
//! | 3..  | payload                                                     |

use serde::Serialize;

use crate::core::{
    ChannelMode, LdacError, LdacResult, QualityMode, SamplingFrequency, CHANNEL_MODE_MASK,
    FRAME_HEADER_SIZE, HEADER_RESERVED_MASK, SF_INDEX_SHIFT, SYNC_BYTE,
};

/// Decoded three-byte frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameHeader {
    pub channel_mode: ChannelMode,
    pub sampling_frequency: SamplingFrequency,
    pub quality: QualityMode,
}

impl FrameHeader {
    pub fn new(
        channel_mode: ChannelMode,
        sampling_frequency: SamplingFrequency,
        quality: QualityMode,
    ) -> Self {
        Self {
            channel_mode,
            sampling_frequency,
            quality,
        }
    }

    /// byte 1: sampling frequency index and channel mode
    pub fn config_byte(&self) -> u8 {
        (self.sampling_frequency.index() << SF_INDEX_SHIFT) | self.channel_mode.bits()
    }

    /// inverse of [`FrameHeader::config_byte`]
    pub fn decode_config_byte(byte: u8) -> LdacResult<(SamplingFrequency, ChannelMode)> {
        if byte & HEADER_RESERVED_MASK != 0 {
            return Err(LdacError::InvalidFrame(format!(
                "reserved header bits set in 0x{:02X}",
                byte
            )));
        }

        let sf_idx = byte >> SF_INDEX_SHIFT;
        let fs = SamplingFrequency::from_index(sf_idx).ok_or_else(|| {
            LdacError::InvalidFrame(format!("sampling frequency index {} out of range", sf_idx))
        })?;
        let mode = ChannelMode::try_from((byte & CHANNEL_MODE_MASK) as i32)
            .map_err(|e| LdacError::InvalidFrame(e.to_string()))?;

        Ok((fs, mode))
    }

    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_SIZE] {
        [SYNC_BYTE, self.config_byte(), self.quality.length_byte()]
    }

    /// Parse the first three bytes of a frame
    pub fn parse(bytes: &[u8]) -> LdacResult<Self> {
        if bytes.len() < FRAME_HEADER_SIZE {
            return Err(LdacError::InvalidFrame(format!(
                "need {} header bytes, got {}",
                FRAME_HEADER_SIZE,
                bytes.len()
            )));
        }
        if bytes[0] != SYNC_BYTE {
            return Err(LdacError::InvalidFrame(format!(
                "bad sync byte 0x{:02X}",
                bytes[0]
            )));
        }

        let (sampling_frequency, channel_mode) = Self::decode_config_byte(bytes[1])?;
        let quality = QualityMode::from_length_byte(bytes[2]).ok_or_else(|| {
            LdacError::InvalidFrame(format!("unknown payload length byte 0x{:02X}", bytes[2]))
        })?;

        Ok(Self {
            channel_mode,
            sampling_frequency,
            quality,
        })
    }

    pub fn payload_len(&self) -> usize {
        self.quality.payload_bytes()
    }

    pub fn frame_len(&self) -> usize {
        self.quality.frame_bytes()
    }
}

/// One encoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: FrameHeader,
    bytes: Vec<u8>,
}

impl Frame {
    /// Wrap encoded bytes, checking header and length
    pub fn from_bytes(bytes: Vec<u8>) -> LdacResult<Self> {
        let header = FrameHeader::parse(&bytes)?;
        if bytes.len() != header.frame_len() {
            return Err(LdacError::InvalidFrame(format!(
                "frame is {} bytes, header says {}",
                bytes.len(),
                header.frame_len()
            )));
        }
        Ok(Self { header, bytes })
    }

    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[FRAME_HEADER_SIZE..]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// frames always carry a header; kept for the `len` convention
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
