//! error taxonomy for the encoder
//!
//! Every failure carries enough context for logs, and maps onto one of the
//! five boundary codes through [`LdacError::code`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// error code surfaced across the embedding boundary
///
/// | Value | Code             | Meaning                                   |
/// |-------|------------------|-------------------------------------------|
/// | 0     | None             | last operation succeeded                  |
/// | 1     | NonFatal         | diagnostic, encoding continues            |
/// | 2     | Fatal            | handle is invalid or destroyed            |
/// | 3     | IllegalParameter | caller contract violation, state intact   |
/// | 4     | IllegalVersion   | reserved                                  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum ErrorCode {
    #[default]
    None = 0,
    NonFatal = 1,
    Fatal = 2,
    IllegalParameter = 3,
    IllegalVersion = 4,
}

impl ErrorCode {
    /// raw integer value
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// does this code end the session?
    pub fn is_fatal(self) -> bool {
        self == ErrorCode::Fatal
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> i32 {
        code as i32
    }
}

/// Errors raised by configuration, encoding and frame parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LdacError {
    #[error("unsupported sampling frequency {0} Hz (expected 44100, 48000, 88200 or 96000)")]
    UnsupportedSamplingFrequency(i64),

    #[error("invalid quality mode {0} (expected 0=high, 1=standard, 2=mobile)")]
    InvalidQualityMode(i32),

    #[error("invalid channel mode {0} (expected 0=stereo, 1=dual channel, 2=mono)")]
    InvalidChannelMode(i32),

    #[error("invalid sample format {0} (expected 1=s16, 2=s24, 3=s32, 4=f32)")]
    InvalidSampleFormat(i32),

    #[error("invalid transport mtu {0}")]
    InvalidMtu(i64),

    #[error("encoder is not configured")]
    NotConfigured,

    #[error("pcm block must be {expected} bytes, got {got}")]
    BlockSizeMismatch { expected: usize, got: usize },

    #[error("output buffer too small: frame needs {required} bytes, capacity is {capacity}")]
    OutputTooSmall { required: usize, capacity: usize },

    #[error("frame write overflow at byte {position} (capacity {capacity})")]
    FrameOverflow { position: usize, capacity: usize },

    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    #[error("encoder handle has been destroyed")]
    SessionDestroyed,

    #[error("{0}")]
    NonFatal(String),
}

impl LdacError {
    /// boundary code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            LdacError::SessionDestroyed => ErrorCode::Fatal,
            LdacError::NonFatal(_) => ErrorCode::NonFatal,
            _ => ErrorCode::IllegalParameter,
        }
    }
}

/// result type for encoder operations
pub type LdacResult<T> = Result<T, LdacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_boundary_values() {
        assert_eq!(ErrorCode::None.as_i32(), 0);
        assert_eq!(ErrorCode::NonFatal.as_i32(), 1);
        assert_eq!(ErrorCode::Fatal.as_i32(), 2);
        assert_eq!(ErrorCode::IllegalParameter.as_i32(), 3);
        assert_eq!(ErrorCode::IllegalVersion.as_i32(), 4);
    }

    #[test]
    fn test_error_to_code() {
        assert_eq!(
            LdacError::UnsupportedSamplingFrequency(22050).code(),
            ErrorCode::IllegalParameter
        );
        assert_eq!(
            LdacError::OutputTooSmall {
                required: 333,
                capacity: 10
            }
            .code(),
            ErrorCode::IllegalParameter
        );
        assert_eq!(LdacError::SessionDestroyed.code(), ErrorCode::Fatal);
        assert!(LdacError::SessionDestroyed.code().is_fatal());
        assert_eq!(
            LdacError::NonFatal("clipped".into()).code(),
            ErrorCode::NonFatal
        );
    }

    #[test]
    fn test_error_messages_carry_context() {
        let msg = LdacError::BlockSizeMismatch {
            expected: 512,
            got: 100,
        }
        .to_string();
        assert!(msg.contains("512"));
        assert!(msg.contains("100"));
    }
}
