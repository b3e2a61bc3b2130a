use crate::error::LibResult;
use snafu::ResultExt;
use std::io::Write;

/// The encoder's running status register: disabled outright, or tracking the
/// channel status byte written most recently.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum RunningStatus {
    Off,
    On(Option<u8>),
}

/// The encode-side cursor: a wrapper for any `Write` that owns the running
/// status register and the numeric encoding helpers. Meta and sysex events
/// clear the register so that the next channel event emits its status
/// explicitly, mirroring the parser.
///
/// The MIDI file format is big-endian throughout; the little-endian, signed
/// and float writers exist to round out the cursor abstraction.
pub(crate) struct Scribe<W: Write> {
    sink: W,
    running_status: RunningStatus,
}

impl<W: Write> Write for Scribe<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.sink.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.sink.flush()
    }
}

impl<W: Write> Scribe<W> {
    pub(crate) fn new(sink: W, use_running_status: bool) -> Self {
        let running_status = if use_running_status {
            RunningStatus::On(None)
        } else {
            RunningStatus::Off
        };
        Self {
            sink,
            running_status,
        }
    }

    /// Write a channel status byte, suppressing it when the register is on
    /// and holds the same byte.
    pub(crate) fn write_status_byte(&mut self, status: u8) -> LibResult<()> {
        if let RunningStatus::On(tracked) = &mut self.running_status {
            if *tracked == Some(status) {
                return Ok(());
            }
            *tracked = Some(status);
        }
        write_u8!(self.sink, status)
    }

    /// Forget the tracked status byte. Called when a meta or sysex event is
    /// written, because the parser treats those as interrupting running
    /// status.
    pub(crate) fn clear_running_status(&mut self) {
        if let RunningStatus::On(tracked) = &mut self.running_status {
            *tracked = None;
        }
    }

    /// Whether this scribe compresses repeated status bytes. Track encoding
    /// propagates the answer to the fresh scribe it creates for each chunk
    /// body.
    pub(crate) fn running_status_enabled(&self) -> bool {
        matches!(self.running_status, RunningStatus::On(_))
    }

    /// Write `value` as a variable-length quantity.
    pub(crate) fn write_vlq(&mut self, value: u32) -> LibResult<()> {
        match crate::core::vlq::encode(value) {
            Ok(bytes) => self.write_all(&bytes).context(wr!()),
            Err(_) => out_of_range!("{} does not fit in a variable-length quantity", value),
        }
    }

    pub(crate) fn write_u16(&mut self, value: u16) -> LibResult<()> {
        self.write_all(&value.to_be_bytes()).context(wr!())
    }

    #[allow(dead_code)]
    pub(crate) fn write_u16_le(&mut self, value: u16) -> LibResult<()> {
        self.write_all(&value.to_le_bytes()).context(wr!())
    }

    #[allow(dead_code)]
    pub(crate) fn write_i16(&mut self, value: i16) -> LibResult<()> {
        self.write_all(&value.to_be_bytes()).context(wr!())
    }

    pub(crate) fn write_u32(&mut self, value: u32) -> LibResult<()> {
        self.write_all(&value.to_be_bytes()).context(wr!())
    }

    #[allow(dead_code)]
    pub(crate) fn write_u32_le(&mut self, value: u32) -> LibResult<()> {
        self.write_all(&value.to_le_bytes()).context(wr!())
    }

    #[allow(dead_code)]
    pub(crate) fn write_i32(&mut self, value: i32) -> LibResult<()> {
        self.write_all(&value.to_be_bytes()).context(wr!())
    }

    #[allow(dead_code)]
    pub(crate) fn write_f32(&mut self, value: f32) -> LibResult<()> {
        self.write_all(&value.to_be_bytes()).context(wr!())
    }

    #[allow(dead_code)]
    pub(crate) fn write_f64(&mut self, value: f64) -> LibResult<()> {
        self.write_all(&value.to_be_bytes()).context(wr!())
    }
}

/// Converts a payload length to the `u32` that will prefix it on the wire,
/// failing when the length cannot be represented as a variable-length
/// quantity.
pub(crate) fn vlq_length(len: usize) -> LibResult<u32> {
    use crate::core::vlq::MAX_VLQ_VALUE;
    use std::convert::TryFrom;
    match u32::try_from(len) {
        Ok(value) if value <= MAX_VLQ_VALUE => Ok(value),
        _ => out_of_range!("a payload of {} bytes cannot be length-prefixed", len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scribed<F>(use_running_status: bool, f: F) -> Vec<u8>
    where
        F: FnOnce(&mut Scribe<&mut Vec<u8>>),
    {
        let mut bytes: Vec<u8> = Vec::new();
        let mut scribe = Scribe::new(&mut bytes, use_running_status);
        f(&mut scribe);
        bytes
    }

    #[test]
    fn status_bytes_are_suppressed_when_repeated() {
        let bytes = scribed(true, |scribe| {
            scribe.write_status_byte(0x90).unwrap();
            scribe.write_status_byte(0x90).unwrap();
            scribe.write_status_byte(0x80).unwrap();
        });
        assert_eq!(vec![0x90, 0x80], bytes);
    }

    #[test]
    fn clearing_forces_the_next_status() {
        let bytes = scribed(true, |scribe| {
            scribe.write_status_byte(0x90).unwrap();
            scribe.clear_running_status();
            scribe.write_status_byte(0x90).unwrap();
        });
        assert_eq!(vec![0x90, 0x90], bytes);
    }

    #[test]
    fn disabled_register_writes_every_status() {
        let bytes = scribed(false, |scribe| {
            assert!(!scribe.running_status_enabled());
            scribe.write_status_byte(0x90).unwrap();
            scribe.write_status_byte(0x90).unwrap();
        });
        assert_eq!(vec![0x90, 0x90], bytes);
    }

    #[test]
    fn numeric_writers() {
        let bytes = scribed(true, |scribe| {
            scribe.write_u16(0x0102).unwrap();
            scribe.write_u16_le(0x0102).unwrap();
            scribe.write_i16(-2).unwrap();
            scribe.write_u32(0x0102_0304).unwrap();
            scribe.write_u32_le(0x0102_0304).unwrap();
            scribe.write_i32(-2).unwrap();
        });
        assert_eq!(
            vec![
                0x01, 0x02, // u16 big-endian
                0x02, 0x01, // u16 little-endian
                0xFF, 0xFE, // i16 big-endian
                0x01, 0x02, 0x03, 0x04, // u32 big-endian
                0x04, 0x03, 0x02, 0x01, // u32 little-endian
                0xFF, 0xFF, 0xFF, 0xFE, // i32 big-endian
            ],
            bytes
        );
    }

    #[test]
    fn float_writers() {
        let bytes = scribed(true, |scribe| {
            scribe.write_f32(1.5).unwrap();
            scribe.write_f64(2.25).unwrap();
        });
        let mut expected = 1.5f32.to_be_bytes().to_vec();
        expected.extend_from_slice(&2.25f64.to_be_bytes());
        assert_eq!(expected, bytes);
    }

    #[test]
    fn vlq_length_bounds() {
        assert_eq!(0, vlq_length(0).unwrap());
        assert_eq!(0x0FFF_FFFF, vlq_length(0x0FFF_FFFF).unwrap());
        assert!(vlq_length(0x1000_0000).is_err());
    }
}
