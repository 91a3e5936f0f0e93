use std::collections::VecDeque;

use tracing::debug;

use super::types::{EncodedFrame, StreamStats};
use crate::core::{EncoderConfig, LdacResult, SamplingFrequency, BLOCK_SAMPLES};
use crate::frame::Frame;
use crate::session::EncoderSession;

/// Buffers arbitrary-length PCM into blocks and encodes them as they fill
pub struct StreamEncoder {
    session: EncoderSession,
    config: EncoderConfig,
    sampling_frequency: SamplingFrequency,
    pcm_buffer: Vec<u8>,
    block_bytes: usize,
    pending_frames: VecDeque<EncodedFrame>,
    frame_index: u64,
    padded_bytes: usize,
}

impl StreamEncoder {
    /// Create and configure a streaming encoder
    pub fn new(config: EncoderConfig) -> LdacResult<Self> {
        let mut session = EncoderSession::new();
        session.configure(config)?;
        let sampling_frequency = config.validate()?;
        let block_bytes = config.block_bytes();

        Ok(Self {
            session,
            config,
            sampling_frequency,
            pcm_buffer: Vec::with_capacity(block_bytes * 2),
            block_bytes,
            pending_frames: VecDeque::new(),
            frame_index: 0,
            padded_bytes: 0,
        })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn session(&self) -> &EncoderSession {
        &self.session
    }

    /// Bytes waiting for a full block
    pub fn pending_bytes(&self) -> usize {
        self.pcm_buffer.len()
    }

    /// Number of encoded frames ready
    pub fn pending_frames(&self) -> usize {
        self.pending_frames.len()
    }

    /// Push interleaved PCM bytes in the configured sample format.
    ///
    /// Returns how many frames became ready.
    pub fn push_pcm(&mut self, pcm: &[u8]) -> LdacResult<usize> {
        self.pcm_buffer.extend_from_slice(pcm);

        let mut produced = 0;
        while self.pcm_buffer.len() >= self.block_bytes {
            let block: Vec<u8> = self.pcm_buffer.drain(..self.block_bytes).collect();
            self.encode_block(&block, false)?;
            produced += 1;
        }

        Ok(produced)
    }

    /// Get next encoded frame if available
    pub fn next_frame(&mut self) -> Option<EncodedFrame> {
        self.pending_frames.pop_front()
    }

    /// Encode the trailing partial block, padded with silence
    pub fn flush(&mut self) -> LdacResult<Option<EncodedFrame>> {
        if self.pcm_buffer.is_empty() {
            return Ok(None);
        }

        let mut block = std::mem::take(&mut self.pcm_buffer);
        let padding = self.block_bytes - block.len();
        block.resize(self.block_bytes, 0);
        self.padded_bytes += padding;

        debug!(padding, "flushing partial block");
        self.encode_block(&block, true)?;
        Ok(self.pending_frames.pop_back())
    }

    /// Group pending frames into packets of whole frames that fit the MTU
    pub fn drain_packets(&mut self) -> Vec<Vec<u8>> {
        let per_packet = self.config.frames_per_packet();
        let mut packets = Vec::new();

        while !self.pending_frames.is_empty() {
            let take = per_packet.min(self.pending_frames.len());
            let mut packet = Vec::with_capacity(take * self.config.frame_bytes());
            for frame in self.pending_frames.drain(..take) {
                packet.extend_from_slice(frame.frame.as_bytes());
            }
            packets.push(packet);
        }

        packets
    }

    pub fn stats(&self) -> StreamStats {
        StreamStats {
            frames: self.frame_index,
            samples_per_channel: self.frame_index * BLOCK_SAMPLES as u64,
            padded_bytes: self.padded_bytes,
            bitrate: self.session.bitrate(),
            sampling_frequency: self.sampling_frequency.hz(),
        }
    }

    fn encode_block(&mut self, block: &[u8], padded: bool) -> LdacResult<()> {
        let frame: Frame = self.session.encode_frame(block)?;
        let timestamp_us = self.frame_index * BLOCK_SAMPLES as u64 * 1_000_000
            / self.sampling_frequency.hz() as u64;

        self.pending_frames.push_back(EncodedFrame {
            index: self.frame_index,
            timestamp_us,
            frame,
            padded,
        });
        self.frame_index += 1;
        Ok(())
    }
}
