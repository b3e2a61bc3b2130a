use crate::byte_reader::ByteReader;
use crate::error::LibResult;
use crate::scribe::{vlq_length, Scribe};
use snafu::ResultExt;
use std::io::Write;

/// A system exclusive event: `F0 <length> <data>` or `F7 <length> <data>`.
/// The length is a variable-length quantity counting the data bytes that
/// follow it. The data is held exactly as framed, including the terminal
/// `0xF7` when the message carries one, so a file re-encodes byte-for-byte.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct SysexEvent {
    kind: SysexEventType,
    data: Vec<u8>,
}

impl SysexEvent {
    pub fn new(kind: SysexEventType, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    pub fn kind(&self) -> SysexEventType {
        self.kind
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn parse(kind: SysexEventType, iter: &mut ByteReader<'_>) -> LibResult<Self> {
        iter.read_expect(kind as u8).context(io!())?;
        let length = iter.read_vlq_u32().context(io!())?;
        let data = iter.read_n(length as usize).context(io!())?.to_vec();
        Ok(Self { kind, data })
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        // a sysex event interrupts running status
        w.clear_running_status();
        write_u8!(w, self.kind as u8)?;
        w.write_vlq(vlq_length(self.data.len())?)?;
        w.write_all(&self.data).context(wr!())
    }
}

/// The status byte that introduces a sysex event in a file.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash, Default)]
pub enum SysexEventType {
    /// `F0 <length> <bytes to be transmitted after F0>`
    ///
    /// A complete system exclusive message, or the first packet in a series.
    /// The transmitted message `F0 43 12 00 07 F7` is stored as
    /// `F0 05 43 12 00 07 F7`: the trailing `F7` is included in the data so
    /// a reader knows it has seen the entire message.
    #[default]
    F0 = 0xf0,

    /// `F7 <length> <all bytes to be transmitted>`
    ///
    /// A continuation packet of a message split across timed packets, or an
    /// "escape" holding arbitrary bytes to transmit. Bytes under `F7` are
    /// sent without any status byte of their own.
    F7 = 0xf7,
}
