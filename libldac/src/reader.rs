use crate::core::{LdacError, LdacResult, SYNC_BYTE};
use crate::frame::FrameHeader;

/// a frame located inside a byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRef<'a> {
    /// byte offset of the sync byte in the stream
    pub offset: usize,
    pub header: FrameHeader,
    /// the whole frame, header included
    pub bytes: &'a [u8],
}

impl<'a> FrameRef<'a> {
    pub fn payload(&self) -> &'a [u8] {
        &self.bytes[crate::core::FRAME_HEADER_SIZE..]
    }
}

/// walks a concatenated frame stream
///
/// Garbage between frames is skipped by scanning for the next sync byte whose
/// header parses. A header that promises more bytes than the stream holds ends
/// iteration with an error.
pub struct FrameReader<'a> {
    data: &'a [u8],
    pos: usize,
    skipped: usize,
    done: bool,
}

impl<'a> FrameReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        FrameReader {
            data,
            pos: 0,
            skipped: 0,
            done: false,
        }
    }

    /// bytes discarded while searching for sync
    pub fn skipped_bytes(&self) -> usize {
        self.skipped
    }

    /// current read position
    pub fn position(&self) -> usize {
        self.pos
    }

    fn resync(&mut self) {
        let next = self.data[self.pos..]
            .iter()
            .position(|&b| b == SYNC_BYTE)
            .unwrap_or(self.data.len() - self.pos);
        self.skipped += next;
        self.pos += next;
    }
}

impl<'a> Iterator for FrameReader<'a> {
    type Item = LdacResult<FrameRef<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.resync();
            if self.pos >= self.data.len() {
                return None;
            }

            let rest = &self.data[self.pos..];
            let header = match FrameHeader::parse(rest) {
                Ok(header) => header,
                Err(_) if rest.len() >= crate::core::FRAME_HEADER_SIZE => {
                    // false sync inside garbage, try the next candidate
                    self.pos += 1;
                    self.skipped += 1;
                    continue;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            let len = header.frame_len();
            if rest.len() < len {
                self.done = true;
                return Some(Err(LdacError::InvalidFrame(format!(
                    "truncated frame at offset {}: need {} bytes, {} left",
                    self.pos,
                    len,
                    rest.len()
                ))));
            }

            let frame = FrameRef {
                offset: self.pos,
                header,
                bytes: &rest[..len],
            };
            self.pos += len;
            return Some(Ok(frame));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QualityMode;

    fn mobile_frame(fill: u8) -> Vec<u8> {
        let mut f = vec![fill; 113];
        f[..3].copy_from_slice(&[0xAA, 0x20, 0x6E]);
        f
    }

    #[test]
    fn test_reads_back_to_back_frames() {
        let mut stream = mobile_frame(1);
        stream.extend(mobile_frame(2));

        let frames: Vec<_> = FrameReader::new(&stream).collect::<LdacResult<_>>().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].offset, 0);
        assert_eq!(frames[1].offset, 113);
        assert_eq!(frames[1].header.quality, QualityMode::Mobile);
        assert!(frames[1].payload().iter().all(|&b| b == 2));
    }

    #[test]
    fn test_skips_garbage() {
        let mut stream = vec![0x00, 0xAA, 0xFF, 0x13];
        stream.extend(mobile_frame(0));

        let mut reader = FrameReader::new(&stream);
        let frame = reader.next().unwrap().unwrap();
        assert_eq!(frame.offset, 4);
        assert!(reader.next().is_none());
        assert_eq!(reader.skipped_bytes(), 4);
    }

    #[test]
    fn test_truncated_frame_is_an_error() {
        let stream = &mobile_frame(0)[..50];
        let mut reader = FrameReader::new(stream);
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }
}
