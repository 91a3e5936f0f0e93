pub mod audio_constants;
pub mod config;
pub mod error;
pub mod pcm;
pub mod quality;
pub mod types;

pub use audio_constants::*;
pub use config::EncoderConfig;
pub use error::{ErrorCode, LdacError, LdacResult};
pub use pcm::{deinterleave_block, samples_to_s16le, ChannelBlock};
pub use quality::{bitrate, QualityMode};
pub use types::*;
