use crate::core::{LdacError, LdacResult};
use crate::frame::FrameHeader;
use crate::transform::{payload_stream, ScaledBlock};

/// bounds-checked writer over a caller-provided output buffer
///
/// The writable region is fixed at construction; any write past it fails
/// with [`LdacError::FrameOverflow`] instead of touching memory beyond it.
pub struct FrameWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FrameWriter<'a> {
    /// writer limited to the first `capacity` bytes of `buf`
    pub fn new(buf: &'a mut [u8], capacity: usize) -> LdacResult<Self> {
        if buf.len() < capacity {
            return Err(LdacError::OutputTooSmall {
                required: capacity,
                capacity: buf.len(),
            });
        }
        Ok(FrameWriter {
            buf: &mut buf[..capacity],
            pos: 0,
        })
    }

    pub fn push(&mut self, byte: u8) -> LdacResult<()> {
        match self.buf.get_mut(self.pos) {
            Some(slot) => {
                *slot = byte;
                self.pos += 1;
                Ok(())
            }
            None => Err(LdacError::FrameOverflow {
                position: self.pos,
                capacity: self.buf.len(),
            }),
        }
    }

    pub fn extend<I: IntoIterator<Item = u8>>(&mut self, bytes: I) -> LdacResult<()> {
        for b in bytes {
            self.push(b)?;
        }
        Ok(())
    }

    /// bytes written so far
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// number of bytes written
    pub fn finish(self) -> usize {
        self.pos
    }
}

/// write a complete frame into `out`, returning its length
///
/// `out` must hold at least `header.frame_len()` bytes.
pub fn pack_frame(out: &mut [u8], header: &FrameHeader, blocks: &[ScaledBlock]) -> LdacResult<usize> {
    let mut writer = FrameWriter::new(out, header.frame_len())?;

    writer.extend(header.to_bytes())?;
    writer.extend(payload_stream(blocks).take(header.payload_len()))?;

    debug_assert_eq!(writer.remaining(), 0);
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChannelMode, QualityMode, SamplingFrequency, NUM_COEFFICIENTS};

    #[test]
    fn test_writer_rejects_overflow() {
        let mut buf = [0u8; 8];
        let mut writer = FrameWriter::new(&mut buf, 4).unwrap();
        writer.extend([1, 2, 3, 4]).unwrap();
        assert_eq!(writer.remaining(), 0);
        assert_eq!(
            writer.push(5),
            Err(LdacError::FrameOverflow {
                position: 4,
                capacity: 4
            })
        );
        assert_eq!(writer.finish(), 4);
        // nothing past the writable region was touched
        assert_eq!(buf, [1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_writer_needs_capacity() {
        let mut buf = [0u8; 10];
        assert!(matches!(
            FrameWriter::new(&mut buf, 11),
            Err(LdacError::OutputTooSmall {
                required: 11,
                capacity: 10
            })
        ));
    }

    #[test]
    fn test_pack_frame_fills_exactly() {
        let header = FrameHeader::new(
            ChannelMode::Stereo,
            SamplingFrequency::Hz44100,
            QualityMode::Standard,
        );
        let block = ScaledBlock {
            shift: 2,
            values: [0x0101; NUM_COEFFICIENTS],
        };
        let mut out = vec![0xEEu8; 400];
        let written = pack_frame(&mut out, &header, &[block.clone(), block]).unwrap();

        assert_eq!(written, 223);
        assert_eq!(&out[..3], &[0xAA, 0x00, 0xDC]);
        assert_eq!(&out[3..5], &[2, 2]);
        assert!(out[5..223].iter().all(|&b| b == 0x01));
        assert!(out[223..].iter().all(|&b| b == 0xEE));
    }
}
