use crate::byte_reader::ByteReader;
use crate::core::Message;
use crate::error::LibResult;
use crate::file::{MetaEvent, SysexEvent, SysexEventType};
use crate::scribe::Scribe;
use log::trace;
use snafu::ResultExt;
use std::io::Write;

/// `0xFF`: all meta events begin with FF, then have an event type byte which
/// is always less than 128.
const FILE_META_EVENT: u8 = 0xff;

/// `0xF0`: `F0 <length> <bytes to be transmitted after F0>`
const FILE_SYSEX_F0: u8 = 0xf0;

/// `0xF7`: `F7 <length> <all bytes to be transmitted>`
const FILE_SYSEX_F7: u8 = 0xf7;

/// `<MTrk event> = <delta-time> <event>`
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct TrackEvent {
    /// The delta-time is stored as a variable-length quantity. It represents
    /// the amount of time before the following event. If the first event in
    /// a track occurs at the very beginning of a track, or if two events
    /// occur simultaneously, a delta-time of zero is used. Delta-times are
    /// always present. Delta-time is in ticks as specified in the header
    /// chunk.
    delta_time: u32,
    event: Event,
}

impl TrackEvent {
    pub fn new(delta_time: u32, event: Event) -> Self {
        Self { delta_time, event }
    }

    pub fn delta_time(&self) -> u32 {
        self.delta_time
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Returns true if the track event is a [`MetaEvent::EndOfTrack`].
    pub(crate) fn is_end(&self) -> bool {
        matches!(&self.event, Event::Meta(MetaEvent::EndOfTrack))
    }

    pub(crate) fn parse(iter: &mut ByteReader<'_>) -> LibResult<Self> {
        let delta_time = iter.read_vlq_u32().context(io!())?;
        trace!("delta_time {}", delta_time);
        let event = Event::parse(iter)?;
        Ok(Self { delta_time, event })
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        w.write_vlq(self.delta_time)?;
        self.event.write(w)
    }
}

/// `<event> = <MIDI event> | <sysex event> | <meta-event>`
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum Event {
    /// Any MIDI channel message. Running status applies.
    Midi(Message),
    /// A MIDI system exclusive message.
    Sysex(SysexEvent),
    /// Non-MIDI information useful to this format or to sequencers.
    Meta(MetaEvent),
}

impl Default for Event {
    fn default() -> Self {
        Event::Midi(Message::default())
    }
}

impl Event {
    pub(crate) fn parse(iter: &mut ByteReader<'_>) -> LibResult<Self> {
        let status_byte = iter.peek_or_die().context(io!())?;
        match status_byte {
            FILE_SYSEX_F0 => {
                trace!("peeked at {:#x}, a sysex event", status_byte);
                iter.clear_running_status();
                Ok(Event::Sysex(SysexEvent::parse(SysexEventType::F0, iter)?))
            }
            FILE_SYSEX_F7 => {
                trace!("peeked at {:#x}, a sysex continuation", status_byte);
                iter.clear_running_status();
                Ok(Event::Sysex(SysexEvent::parse(SysexEventType::F7, iter)?))
            }
            FILE_META_EVENT => {
                trace!("peeked at {:#x}, a meta event", status_byte);
                iter.clear_running_status();
                Ok(Event::Meta(MetaEvent::parse(iter)?))
            }
            0xF1..=0xFE => not_supported!(
                "system common or realtime status {:#04X} inside a track",
                status_byte
            ),
            _ => {
                trace!("peeked at {:#x}, a channel message", status_byte);
                Ok(Event::Midi(Message::parse(iter)?))
            }
        }
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        match self {
            Event::Midi(md) => md.write(w),
            Event::Sysex(sx) => sx.write(w),
            Event::Meta(mt) => mt.write(w),
        }
    }
}
