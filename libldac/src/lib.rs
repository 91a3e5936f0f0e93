#![allow(clippy::needless_range_loop)]

//! Stateful block encoder producing LDAC-style frames
//!
//! Each call to [`EncoderSession::encode`] takes one block of 128 interleaved
//! PCM frames, runs a windowed MDCT per channel against the previous block's
//! tail, quantizes the coefficients and packs them into a fixed-size frame:
//!
//! ```
//! use libldac_bt::{ChannelMode, EncoderConfig, EncoderSession, QualityMode};
//!
//! let mut session = EncoderSession::new();
//! session
//!     .configure(EncoderConfig::new(QualityMode::Standard, ChannelMode::Stereo, 48000))
//!     .unwrap();
//!
//! let pcm = vec![0u8; 512];
//! let frame = session.encode_frame(&pcm).unwrap();
//! assert_eq!(frame.len(), 223);
//! assert_eq!(session.bitrate(), 660_000);
//! ```

pub mod core;
pub mod frame;
pub mod session;
pub mod streaming;
pub mod transform;
pub mod wasm;

mod reader;
mod writer;

pub use core::{
    bitrate, ChannelMode, EncoderConfig, ErrorCode, LdacError, LdacResult, QualityMode,
    SampleFormat, SamplingFrequency, BLOCK_SAMPLES, DEFAULT_MTU, FRAME_HEADER_SIZE, SYNC_BYTE,
};
pub use frame::{Frame, FrameHeader};
pub use reader::{FrameReader, FrameRef};
pub use session::{EncodeOutput, EncoderSession, SessionState};
pub use streaming::{EncodedFrame, StreamEncoder, StreamStats};
pub use writer::{pack_frame, FrameWriter};
