//! Encoder session: lifecycle, overlap state and the per-block pipeline

mod encoder;
mod overlap;

pub use encoder::{EncodeOutput, EncoderSession, SessionState};
pub use overlap::OverlapState;
