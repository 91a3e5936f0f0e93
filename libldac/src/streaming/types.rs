//! Streaming types

use serde::Serialize;

use crate::frame::Frame;

/// An encoded frame ready for transmission
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    /// Frame index in the stream
    pub index: u64,
    /// Start of the block in microseconds
    pub timestamp_us: u64,
    pub frame: Frame,
    /// Last block of the stream, padded with silence
    pub padded: bool,
}

/// Running totals for a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    pub frames: u64,
    pub samples_per_channel: u64,
    /// silence appended by `flush`
    pub padded_bytes: usize,
    pub bitrate: u32,
    pub sampling_frequency: u32,
}

impl StreamStats {
    /// Duration of the encoded audio in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sampling_frequency == 0 {
            return 0.0;
        }
        self.samples_per_channel as f64 / self.sampling_frequency as f64
    }
}
