use serde::Serialize;
use tracing::{debug, trace, warn};

use super::overlap::OverlapState;
use crate::core::{
    deinterleave_block, EncoderConfig, ErrorCode, LdacError, LdacResult, SamplingFrequency,
};
use crate::frame::{Frame, FrameHeader};
use crate::transform::{self, ScaledBlock};
use crate::writer::pack_frame;

/// Session lifecycle
///
/// `Uninitialized → Ready → Encoding → Encoding …`. A failed configure
/// returns to `Uninitialized`; a failed encode leaves the state as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Uninitialized,
    Ready,
    Encoding,
}

/// Outcome of one successful encode call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOutput {
    /// PCM bytes consumed, always one block
    pub pcm_used: usize,
    /// Bytes written to the output buffer
    pub stream_size: usize,
    /// Frames written, always 1
    pub frame_count: usize,
}

#[derive(Debug, Clone, Copy)]
struct Active {
    config: EncoderConfig,
    sampling_frequency: SamplingFrequency,
}

/// Stateful block encoder
///
/// Owns its configuration, the per-channel overlap tail and the block counter.
/// Calls take `&mut self`, so one session is never encoded from two places at
/// once; separate sessions share nothing but the read-only transform tables.
#[derive(Debug)]
pub struct EncoderSession {
    state: SessionState,
    active: Option<Active>,
    overlap: OverlapState,
    block_count: u64,
    last_error: ErrorCode,
}

impl EncoderSession {
    /// Create an unconfigured session
    pub fn new() -> Self {
        transform::init_tables();

        Self {
            state: SessionState::Uninitialized,
            active: None,
            overlap: OverlapState::new(2),
            block_count: 0,
            last_error: ErrorCode::None,
        }
    }

    /// Validate and apply a configuration.
    ///
    /// Resets the overlap tail and block counter. On failure the session is
    /// left `Uninitialized`, discarding any earlier configuration.
    pub fn configure(&mut self, config: EncoderConfig) -> LdacResult<()> {
        let sampling_frequency = match config.validate() {
            Ok(fs) => fs,
            Err(e) => {
                self.unconfigure();
                return self.fail(e);
            }
        };

        self.active = Some(Active {
            config,
            sampling_frequency,
        });
        self.overlap = OverlapState::new(config.channels());
        self.block_count = 0;
        self.state = SessionState::Ready;
        self.last_error = ErrorCode::None;

        debug!(
            quality = config.quality.name(),
            channel_mode = ?config.channel_mode,
            sample_format = ?config.sample_format,
            sampling_frequency = config.sampling_frequency,
            mtu = config.mtu,
            bitrate = config.quality.bitrate(sampling_frequency),
            "encoder configured"
        );
        Ok(())
    }

    /// Configure from the raw integers of the embedding API
    pub fn configure_raw(
        &mut self,
        mtu: i32,
        eqmid: i32,
        channel_mode: i32,
        fmt: i32,
        sampling_freq: i32,
    ) -> LdacResult<()> {
        match EncoderConfig::from_raw(mtu, eqmid, channel_mode, fmt, sampling_freq) {
            Ok(config) => self.configure(config),
            Err(e) => {
                self.unconfigure();
                self.fail(e)
            }
        }
    }

    /// Encode exactly one PCM block into `output`.
    ///
    /// Every check runs before any state changes, so a failed call leaves the
    /// overlap tail, block counter and lifecycle state untouched.
    pub fn encode(&mut self, pcm: &[u8], output: &mut [u8]) -> LdacResult<EncodeOutput> {
        match self.encode_block(pcm, output) {
            Ok(out) => {
                self.last_error = ErrorCode::None;
                Ok(out)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Encode one block into a freshly allocated [`Frame`]
    pub fn encode_frame(&mut self, pcm: &[u8]) -> LdacResult<Frame> {
        let frame_len = match self.active {
            Some(active) => active.config.frame_bytes(),
            None => return self.fail(LdacError::NotConfigured),
        };

        let mut out = vec![0u8; frame_len];
        let written = self.encode(pcm, &mut out)?.stream_size;
        out.truncate(written);
        Frame::from_bytes(out)
    }

    fn encode_block(&mut self, pcm: &[u8], output: &mut [u8]) -> LdacResult<EncodeOutput> {
        let active = self.active.ok_or(LdacError::NotConfigured)?;
        let config = active.config;
        let channels = config.channels();

        let blocks = deinterleave_block(pcm, config.sample_format, channels)?;

        let frame_len = config.frame_bytes();
        if output.len() < frame_len {
            return Err(LdacError::OutputTooSmall {
                required: frame_len,
                capacity: output.len(),
            });
        }

        // Transform each channel against the retained tail
        let scaled: Vec<ScaledBlock> = (0..channels)
            .map(|ch| {
                let window = self.overlap.window(ch, &blocks[ch]);
                transform::quantize(&transform::forward(&window))
            })
            .collect();

        let header = FrameHeader::new(config.channel_mode, active.sampling_frequency, config.quality);
        let written = pack_frame(output, &header, &scaled)?;

        // Nothing can fail past this point
        self.overlap.commit(&blocks);
        self.block_count += 1;
        self.state = SessionState::Encoding;

        trace!(
            block = self.block_count,
            bytes = written,
            shifts = ?scaled.iter().map(|b| b.shift).collect::<Vec<_>>(),
            "encoded block"
        );

        Ok(EncodeOutput {
            pcm_used: pcm.len(),
            stream_size: written,
            frame_count: 1,
        })
    }

    fn unconfigure(&mut self) {
        self.active = None;
        self.state = SessionState::Uninitialized;
        self.overlap.reset();
        self.block_count = 0;
    }

    fn fail<T>(&mut self, err: LdacError) -> LdacResult<T> {
        warn!(code = ?err.code(), state = ?self.state, "{}", err);
        self.last_error = err.code();
        Err(err)
    }

    /// Bits per second for the configured quality and rate, 0 if unconfigured
    pub fn bitrate(&self) -> u32 {
        self.active
            .map(|a| a.config.quality.bitrate(a.sampling_frequency))
            .unwrap_or(0)
    }

    /// Configured sampling frequency in Hz, 0 if unconfigured
    pub fn sampling_frequency(&self) -> u32 {
        self.active.map(|a| a.sampling_frequency.hz()).unwrap_or(0)
    }

    /// Code of the most recent failure, `None` after a successful call
    pub fn last_error(&self) -> ErrorCode {
        self.last_error
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> Option<&EncoderConfig> {
        self.active.as_ref().map(|a| &a.config)
    }

    /// Successful encodes since the last configure
    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    /// PCM bytes one encode call expects
    pub fn block_bytes(&self) -> Option<usize> {
        self.active.map(|a| a.config.block_bytes())
    }

    /// Bytes of one output frame
    pub fn frame_bytes(&self) -> Option<usize> {
        self.active.map(|a| a.config.frame_bytes())
    }

    pub fn overlap(&self) -> &OverlapState {
        &self.overlap
    }

    /// End the session. Consumes it, so no call can follow.
    pub fn destroy(self) {
        debug!(blocks = self.block_count, "encoder session destroyed");
    }
}

impl Default for EncoderSession {
    fn default() -> Self {
        Self::new()
    }
}
