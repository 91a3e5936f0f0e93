use crate::core::{ChannelBlock, BLOCK_SAMPLES, MAX_CHANNELS, WINDOW_SAMPLES};

/// Trailing half of the previous analysis window, per channel
///
/// Always holds exactly 128 samples per channel. Starts silent; after every
/// successful encode it holds the newest 128 samples of that block.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapState {
    tails: [[f32; BLOCK_SAMPLES]; MAX_CHANNELS],
    channels: usize,
}

impl OverlapState {
    pub fn new(channels: usize) -> Self {
        Self {
            tails: [[0.0; BLOCK_SAMPLES]; MAX_CHANNELS],
            channels: channels.clamp(1, MAX_CHANNELS),
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn tail(&self, channel: usize) -> &[f32; BLOCK_SAMPLES] {
        &self.tails[channel]
    }

    /// Analysis window for one channel: retained tail then the new block.
    /// Does not modify the state.
    pub fn window(&self, channel: usize, block: &ChannelBlock) -> [f32; WINDOW_SAMPLES] {
        let mut window = [0.0f32; WINDOW_SAMPLES];
        window[..BLOCK_SAMPLES].copy_from_slice(&self.tails[channel]);
        window[BLOCK_SAMPLES..].copy_from_slice(block);
        window
    }

    /// Retain the newest block as the next tail
    pub fn commit(&mut self, blocks: &[ChannelBlock; MAX_CHANNELS]) {
        for ch in 0..self.channels {
            self.tails[ch] = blocks[ch];
        }
    }

    /// Back to cold-start silence
    pub fn reset(&mut self) {
        for tail in &mut self.tails {
            tail.fill(0.0);
        }
    }
}
