use crate::core::vlq::{self, VlqError, CONTINUE, MAX_VLQ_BYTES};
use log::trace;
use snafu::{ensure, OptionExt, ResultExt, Snafu};

/// A positioned view over the bytes being parsed. Reads advance the position
/// and fail when they would cross the end of the view. [`ByteReader::slice`]
/// hands out a sub-cursor confined to a chunk body. Running status is the
/// most recent channel status byte, kept here because it is parser state in
/// exactly the way the position is.
///
/// The MIDI file format is big-endian throughout; the little-endian, signed
/// and float reads exist to round out the cursor abstraction.
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
    running_status: Option<u8>,
}

#[derive(Debug, Snafu)]
pub(crate) enum ByteError {
    #[snafu(display(
        "unexpected end of input: {} byte(s) requested at position {}, size is {}",
        requested,
        position,
        size
    ))]
    Overflow {
        requested: usize,
        position: usize,
        size: usize,
    },

    #[snafu(display(
        "expected tag '{}' but found '{}' at position {}",
        expected,
        found,
        position
    ))]
    Tag {
        expected: String,
        found: String,
        position: usize,
    },

    #[snafu(display(
        "incorrect byte value at position {}: expected '{:#04X}', found '{:#04X}'",
        position,
        expected,
        found
    ))]
    ReadExpect {
        expected: u8,
        found: u8,
        position: usize,
    },

    #[snafu(display(
        "invalid variable-length quantity at position {}: no terminator within {} bytes",
        position,
        crate::core::vlq::MAX_VLQ_BYTES
    ))]
    VlqTooBig { position: usize },

    #[snafu(display(
        "invalid variable-length quantity at position {}: {}",
        position,
        source
    ))]
    VlqDecode { position: usize, source: VlqError },
}

pub(crate) type ByteResult<T> = std::result::Result<T, ByteError>;

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            running_status: None,
        }
    }

    /// The offset of the next byte to be read.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Move the read position. Fails when `position` is past the end of the
    /// view.
    #[allow(dead_code)]
    pub(crate) fn seek(&mut self, position: usize) -> ByteResult<()> {
        ensure!(
            position <= self.bytes.len(),
            OverflowSnafu {
                requested: position,
                position: self.position,
                size: self.bytes.len(),
            }
        );
        self.position = position;
        Ok(())
    }

    pub(crate) fn is_end(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// The next byte, without advancing.
    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    pub(crate) fn peek_or_die(&self) -> ByteResult<u8> {
        self.peek().context(OverflowSnafu {
            requested: 1usize,
            position: self.position,
            size: self.bytes.len(),
        })
    }

    pub(crate) fn read_u8(&mut self) -> ByteResult<u8> {
        ensure!(
            !self.is_end(),
            OverflowSnafu {
                requested: 1usize,
                position: self.position,
                size: self.bytes.len(),
            }
        );
        let value = self.bytes[self.position];
        trace!("read {:#04x} at position {}", value, self.position);
        self.position += 1;
        Ok(value)
    }

    pub(crate) fn read_n(&mut self, num_bytes: usize) -> ByteResult<&'a [u8]> {
        ensure!(
            num_bytes <= self.bytes.len() - self.position,
            OverflowSnafu {
                requested: num_bytes,
                position: self.position,
                size: self.bytes.len(),
            }
        );
        let slice = &self.bytes[self.position..self.position + num_bytes];
        self.position += num_bytes;
        Ok(slice)
    }

    pub(crate) fn skip(&mut self, num_bytes: usize) -> ByteResult<()> {
        self.read_n(num_bytes)?;
        Ok(())
    }

    /// A sub-cursor confined to the next `length` bytes; the parent advances
    /// past them. The sub-cursor keeps the parent's byte offsets so errors
    /// still point into the whole input, and it starts with no running
    /// status. Fails when fewer than `length` bytes remain, so a chunk whose
    /// declared length exceeds the input is detected here rather than
    /// mid-chunk.
    pub(crate) fn slice(&mut self, length: usize) -> ByteResult<ByteReader<'a>> {
        ensure!(
            length <= self.bytes.len() - self.position,
            OverflowSnafu {
                requested: length,
                position: self.position,
                size: self.bytes.len(),
            }
        );
        let sub = ByteReader {
            bytes: &self.bytes[..self.position + length],
            position: self.position,
            running_status: None,
        };
        self.position += length;
        Ok(sub)
    }

    fn read_2(&mut self) -> ByteResult<[u8; 2]> {
        let bytes = self.read_n(2)?;
        Ok([bytes[0], bytes[1]])
    }

    fn read_4(&mut self) -> ByteResult<[u8; 4]> {
        let bytes = self.read_n(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn read_8(&mut self) -> ByteResult<[u8; 8]> {
        let bytes = self.read_n(8)?;
        let mut fixed = [0u8; 8];
        fixed.copy_from_slice(bytes);
        Ok(fixed)
    }

    pub(crate) fn read_i8(&mut self) -> ByteResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub(crate) fn read_u16(&mut self) -> ByteResult<u16> {
        Ok(u16::from_be_bytes(self.read_2()?))
    }

    #[allow(dead_code)]
    pub(crate) fn read_u16_le(&mut self) -> ByteResult<u16> {
        Ok(u16::from_le_bytes(self.read_2()?))
    }

    #[allow(dead_code)]
    pub(crate) fn read_i16(&mut self) -> ByteResult<i16> {
        Ok(i16::from_be_bytes(self.read_2()?))
    }

    #[allow(dead_code)]
    pub(crate) fn read_i16_le(&mut self) -> ByteResult<i16> {
        Ok(i16::from_le_bytes(self.read_2()?))
    }

    pub(crate) fn read_u32(&mut self) -> ByteResult<u32> {
        Ok(u32::from_be_bytes(self.read_4()?))
    }

    #[allow(dead_code)]
    pub(crate) fn read_u32_le(&mut self) -> ByteResult<u32> {
        Ok(u32::from_le_bytes(self.read_4()?))
    }

    #[allow(dead_code)]
    pub(crate) fn read_i32(&mut self) -> ByteResult<i32> {
        Ok(i32::from_be_bytes(self.read_4()?))
    }

    #[allow(dead_code)]
    pub(crate) fn read_i32_le(&mut self) -> ByteResult<i32> {
        Ok(i32::from_le_bytes(self.read_4()?))
    }

    #[allow(dead_code)]
    pub(crate) fn read_f32(&mut self) -> ByteResult<f32> {
        Ok(f32::from_be_bytes(self.read_4()?))
    }

    #[allow(dead_code)]
    pub(crate) fn read_f64(&mut self) -> ByteResult<f64> {
        Ok(f64::from_be_bytes(self.read_8()?))
    }

    /// Read four bytes and compare them to `expected_tag`.
    pub(crate) fn expect_tag(&mut self, expected_tag: &str) -> ByteResult<()> {
        let position = self.position;
        let tag_bytes = self.read_n(4)?;
        ensure!(
            expected_tag.as_bytes() == tag_bytes,
            TagSnafu {
                expected: expected_tag,
                found: String::from_utf8_lossy(tag_bytes),
                position,
            }
        );
        Ok(())
    }

    /// Returns true if the next bytes are `expected_tag`, without advancing.
    pub(crate) fn is_tag(&self, expected_tag: &str) -> bool {
        let expected = expected_tag.as_bytes();
        self.position + expected.len() <= self.bytes.len()
            && &self.bytes[self.position..self.position + expected.len()] == expected
    }

    pub(crate) fn read_expect(&mut self, expected: u8) -> ByteResult<()> {
        let position = self.position;
        let found = self.read_u8()?;
        ensure!(
            expected == found,
            ReadExpectSnafu {
                expected,
                found,
                position,
            }
        );
        Ok(())
    }

    pub(crate) fn read_vlq_u32(&mut self) -> ByteResult<u32> {
        let start = self.position;
        let mut current_byte = CONTINUE;
        while current_byte & CONTINUE == CONTINUE {
            ensure!(
                self.position - start < MAX_VLQ_BYTES,
                VlqTooBigSnafu {
                    position: self.position,
                }
            );
            current_byte = self.read_u8()?;
        }
        let decoded = vlq::decode(&self.bytes[start..self.position])
            .context(VlqDecodeSnafu { position: start })?;
        trace!(
            "decoded vlq value {} from {} bytes",
            decoded,
            self.position - start
        );
        Ok(decoded)
    }

    pub(crate) fn running_status(&self) -> Option<u8> {
        self.running_status
    }

    pub(crate) fn set_running_status(&mut self, status: u8) {
        self.running_status = Some(status)
    }

    pub(crate) fn clear_running_status(&mut self) {
        self.running_status = None
    }
}

#[test]
fn byte_reader_test() {
    let bytes = [0x00u8, 0x01, 0x02, 0x03, 0x04, 0x10, 0x20, 0x30, 0x40];
    let mut reader = ByteReader::new(&bytes);
    assert_eq!(0x00, reader.read_u8().unwrap());
    assert_eq!(Some(0x01), reader.peek());
    assert_eq!(0x0102, reader.read_u16().unwrap());
    assert_eq!(3, reader.position());

    // the sub-cursor sees exactly two bytes and the parent skips them
    let mut sub = reader.slice(2).unwrap();
    assert_eq!(5, reader.position());
    assert!(!sub.is_end());
    assert_eq!(0x03, sub.read_u8().unwrap());
    assert_eq!(0x04, sub.read_u8().unwrap());
    assert!(sub.is_end());
    assert!(sub.read_u8().is_err());
    assert_eq!(0x10, reader.read_u8().unwrap());
}

#[test]
fn overflow_context_test() {
    let bytes = [0x00u8, 0x01];
    let mut reader = ByteReader::new(&bytes);
    reader.read_u8().unwrap();
    let err = reader.read_u32().err().unwrap();
    match err {
        ByteError::Overflow {
            requested,
            position,
            size,
        } => {
            assert_eq!(4, requested);
            assert_eq!(1, position);
            assert_eq!(2, size);
        }
        other => panic!("expected Overflow, got {:?}", other),
    }
}

#[test]
fn slice_beyond_input_test() {
    let bytes = [0x00u8, 0x01, 0x02];
    let mut reader = ByteReader::new(&bytes);
    reader.read_u8().unwrap();
    assert!(reader.slice(10).is_err());
    assert!(reader.slice(2).is_ok());
}

#[test]
fn numeric_reads_test() {
    let bytes = [0x01u8, 0x02, 0x03, 0x04, 0xFF, 0xFE];
    let mut reader = ByteReader::new(&bytes);
    assert_eq!(0x0102_0304, reader.read_u32().unwrap());
    reader.seek(0).unwrap();
    assert_eq!(0x0403_0201, reader.read_u32_le().unwrap());
    reader.seek(0).unwrap();
    assert_eq!(0x0102, reader.read_u16().unwrap());
    assert_eq!(0x0403, reader.read_u16_le().unwrap());
    reader.seek(0).unwrap();
    assert_eq!(0x0102_0304, reader.read_i32().unwrap());
    reader.seek(0).unwrap();
    assert_eq!(0x0403_0201, reader.read_i32_le().unwrap());
    reader.seek(4).unwrap();
    assert_eq!(-1, reader.read_i8().unwrap());
    assert_eq!(-2, reader.read_i8().unwrap());
    reader.seek(4).unwrap();
    assert_eq!(-2, reader.read_i16().unwrap());
    reader.seek(4).unwrap();
    assert_eq!(i16::from_le_bytes([0xFF, 0xFE]), reader.read_i16_le().unwrap());
    assert!(reader.seek(7).is_err());
    reader.seek(6).unwrap();
    assert!(reader.is_end());
}

#[test]
fn float_reads_test() {
    let bytes = 1.5f32.to_be_bytes();
    let mut reader = ByteReader::new(&bytes);
    assert_eq!(1.5, reader.read_f32().unwrap());
    let bytes = 2.25f64.to_be_bytes();
    let mut reader = ByteReader::new(&bytes);
    assert_eq!(2.25, reader.read_f64().unwrap());
}

#[test]
fn tag_test() {
    let bytes = b"MThdXXXX";
    let mut reader = ByteReader::new(bytes);
    assert!(reader.is_tag("MThd"));
    assert!(!reader.is_tag("MTrk"));
    reader.expect_tag("MThd").unwrap();
    assert!(reader.expect_tag("MTrk").is_err());
}

#[test]
fn vlq_terminator_test() {
    let bytes = [0xffu8, 0xff, 0xff, 0xff];
    let mut reader = ByteReader::new(&bytes);
    let err = reader.read_vlq_u32().err().unwrap();
    assert!(matches!(err, ByteError::VlqTooBig { .. }));
}
