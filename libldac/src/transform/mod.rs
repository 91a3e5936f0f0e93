//! Transform core for the block encoder
//!
//! A sine-windowed MDCT turns each 256-sample channel window into 128
//! coefficients; the quantizer folds those into block floating point bytes
//! for the frame payload. Both stages are pure functions of their input.

pub mod mdct;
pub mod quantize;

pub use mdct::{analysis_window, forward, init_tables, MdctTables};
pub use quantize::{block_shift, payload_stream, quantize, ScaledBlock, FULL_SCALE, MAX_SHIFT};
