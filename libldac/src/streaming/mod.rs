//! streaming encode for arbitrary-length audio
//!
//! buffers pcm into fixed blocks so callers don't have to, and packs frames
//! into mtu-sized packets for the transport
mod encoder;
mod types;

pub use encoder::StreamEncoder;
pub use types::{EncodedFrame, StreamStats};
