//! PCM block unpacking
//!
//! Input blocks are little-endian and interleaved. Every supported sample
//! format is normalized to f32 in roughly [-1.0, 1.0] and split per channel.

use super::audio_constants::{f32_to_i16, i16_to_f32, i24_to_f32, i32_to_f32};
use super::error::{LdacError, LdacResult};
use super::types::{SampleFormat, BLOCK_SAMPLES, MAX_CHANNELS};

/// one block of one channel
pub type ChannelBlock = [f32; BLOCK_SAMPLES];

/// Split an interleaved PCM block into per-channel sample arrays.
///
/// The block must be exactly `BLOCK_SAMPLES * channels * width` bytes. Unused
/// channel slots are left silent.
pub fn deinterleave_block(
    pcm: &[u8],
    format: SampleFormat,
    channels: usize,
) -> LdacResult<[ChannelBlock; MAX_CHANNELS]> {
    debug_assert!((1..=MAX_CHANNELS).contains(&channels));

    let width = format.bytes_per_sample();
    let expected = BLOCK_SAMPLES * channels * width;
    if pcm.len() != expected {
        return Err(LdacError::BlockSizeMismatch {
            expected,
            got: pcm.len(),
        });
    }

    let mut out = [[0.0f32; BLOCK_SAMPLES]; MAX_CHANNELS];
    for (i, sample) in pcm.chunks_exact(width).enumerate() {
        out[i % channels][i / channels] = decode_sample(sample, format);
    }

    Ok(out)
}

#[inline]
fn decode_sample(b: &[u8], format: SampleFormat) -> f32 {
    match format {
        SampleFormat::S16 => i16_to_f32(i16::from_le_bytes([b[0], b[1]])),
        SampleFormat::S24 => {
            // shift into the top of an i32 and back down to sign-extend
            let raw = i32::from_le_bytes([0, b[0], b[1], b[2]]) >> 8;
            i24_to_f32(raw)
        }
        SampleFormat::S32 => i32_to_f32(i32::from_le_bytes([b[0], b[1], b[2], b[3]])),
        SampleFormat::F32 => {
            let v = f32::from_le_bytes([b[0], b[1], b[2], b[3]]);
            if v.is_finite() {
                v.clamp(-1.0, 1.0)
            } else {
                0.0
            }
        }
    }
}

/// Interleaved f32 samples to 16-bit little-endian PCM bytes
pub fn samples_to_s16le(samples: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        out.extend_from_slice(&f32_to_i16(s).to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deinterleave_s16_stereo() {
        let mut pcm = Vec::with_capacity(512);
        for i in 0..BLOCK_SAMPLES as i16 {
            pcm.extend_from_slice(&(i * 100).to_le_bytes());
            pcm.extend_from_slice(&(-i * 100).to_le_bytes());
        }

        let block = deinterleave_block(&pcm, SampleFormat::S16, 2).unwrap();
        assert_eq!(block[0][1], 100.0 / 32768.0);
        assert_eq!(block[1][1], -100.0 / 32768.0);
        assert_eq!(block[0][127], 12700.0 / 32768.0);
    }

    #[test]
    fn test_deinterleave_mono_leaves_second_slot_silent() {
        let pcm: Vec<u8> = (0..BLOCK_SAMPLES)
            .flat_map(|_| 16384i16.to_le_bytes())
            .collect();
        let block = deinterleave_block(&pcm, SampleFormat::S16, 1).unwrap();
        assert!(block[0].iter().all(|&s| s == 0.5));
        assert!(block[1].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_s24_sign_extension() {
        let mut pcm = Vec::new();
        for _ in 0..BLOCK_SAMPLES {
            pcm.extend_from_slice(&[0x00, 0x00, 0x80]); // -2^23
        }
        let block = deinterleave_block(&pcm, SampleFormat::S24, 1).unwrap();
        assert_eq!(block[0][0], -1.0);
    }

    #[test]
    fn test_f32_non_finite_is_silenced() {
        let mut pcm = Vec::new();
        for i in 0..BLOCK_SAMPLES {
            let v = match i % 3 {
                0 => f32::NAN,
                1 => f32::INFINITY,
                _ => 4.0,
            };
            pcm.extend_from_slice(&v.to_le_bytes());
        }
        let block = deinterleave_block(&pcm, SampleFormat::F32, 1).unwrap();
        assert_eq!(block[0][0], 0.0);
        assert_eq!(block[0][1], 0.0);
        assert_eq!(block[0][2], 1.0);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let pcm = vec![0u8; 500];
        assert_eq!(
            deinterleave_block(&pcm, SampleFormat::S16, 2),
            Err(LdacError::BlockSizeMismatch {
                expected: 512,
                got: 500
            })
        );
    }

    #[test]
    fn test_samples_to_s16le() {
        let bytes = samples_to_s16le(&[0.0, 1.0, -1.0]);
        assert_eq!(bytes.len(), 6);
        assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), 32767);
        assert_eq!(i16::from_le_bytes([bytes[4], bytes[5]]), -32767);
    }
}
