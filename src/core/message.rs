use crate::byte_reader::ByteReader;
use crate::core::{
    Channel, ControlNumber, ControlValue, NoteNumber, PitchBendValue, PressureValue, Program,
    StatusType, Velocity,
};
use crate::error::LibResult;
use crate::scribe::Scribe;
use log::trace;
use snafu::ResultExt;
use std::io::Write;

/// Represents the data that is common, and required, for both
/// [`Message::NoteOn`] and [`Message::NoteOff`] messages.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NoteMessage {
    channel: Channel,
    note_number: NoteNumber,
    velocity: Velocity,
}

impl NoteMessage {
    pub fn new(channel: Channel, note_number: NoteNumber, velocity: Velocity) -> Self {
        Self {
            channel,
            note_number,
            velocity,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn note_number(&self) -> NoteNumber {
        self.note_number
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    fn parse(iter: &mut ByteReader<'_>, channel: Channel) -> LibResult<Self> {
        Ok(Self {
            channel,
            note_number: data_byte(iter)?.into(),
            velocity: data_byte(iter)?.into(),
        })
    }

    fn write<W: Write>(&self, w: &mut Scribe<W>, st: StatusType) -> LibResult<()> {
        write_status_byte(w, st, self.channel)?;
        write_u8!(w, self.note_number.get())?;
        write_u8!(w, self.velocity.get())
    }
}

/// Aftertouch pressure for one sounding note.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PolyPressureMessage {
    channel: Channel,
    note_number: NoteNumber,
    pressure: PressureValue,
}

impl PolyPressureMessage {
    pub fn new(channel: Channel, note_number: NoteNumber, pressure: PressureValue) -> Self {
        Self {
            channel,
            note_number,
            pressure,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn note_number(&self) -> NoteNumber {
        self.note_number
    }

    pub fn pressure(&self) -> PressureValue {
        self.pressure
    }

    fn parse(iter: &mut ByteReader<'_>, channel: Channel) -> LibResult<Self> {
        Ok(Self {
            channel,
            note_number: data_byte(iter)?.into(),
            pressure: data_byte(iter)?.into(),
        })
    }

    fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        write_status_byte(w, StatusType::PolyPressure, self.channel)?;
        write_u8!(w, self.note_number.get())?;
        write_u8!(w, self.pressure.get())
    }
}

/// A control change: controller number and new value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ControlChangeValue {
    channel: Channel,
    control: ControlNumber,
    value: ControlValue,
}

impl ControlChangeValue {
    pub fn new(channel: Channel, control: ControlNumber, value: ControlValue) -> Self {
        Self {
            channel,
            control,
            value,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn control(&self) -> ControlNumber {
        self.control
    }

    pub fn value(&self) -> ControlValue {
        self.value
    }

    fn parse(iter: &mut ByteReader<'_>, channel: Channel) -> LibResult<Self> {
        Ok(Self {
            channel,
            control: data_byte(iter)?.into(),
            value: data_byte(iter)?.into(),
        })
    }

    fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        write_status_byte(w, StatusType::Control, self.channel)?;
        write_u8!(w, self.control.get())?;
        write_u8!(w, self.value.get())
    }
}

/// Provides the ability to change an instrument (sound, patch, etc.) by
/// specifying the affected channel number and the new program value. Carries
/// a single data byte.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ProgramChangeValue {
    channel: Channel,
    program: Program,
}

impl ProgramChangeValue {
    pub fn new(channel: Channel, program: Program) -> Self {
        Self { channel, program }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn program(&self) -> Program {
        self.program
    }

    fn parse(iter: &mut ByteReader<'_>, channel: Channel) -> LibResult<Self> {
        Ok(Self {
            channel,
            program: data_byte(iter)?.into(),
        })
    }

    fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        write_status_byte(w, StatusType::Program, self.channel)?;
        write_u8!(w, self.program.get())
    }
}

/// Aftertouch pressure for the whole channel. Carries a single data byte.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ChannelPressureMessage {
    channel: Channel,
    pressure: PressureValue,
}

impl ChannelPressureMessage {
    pub fn new(channel: Channel, pressure: PressureValue) -> Self {
        Self { channel, pressure }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn pressure(&self) -> PressureValue {
        self.pressure
    }

    fn parse(iter: &mut ByteReader<'_>, channel: Channel) -> LibResult<Self> {
        Ok(Self {
            channel,
            pressure: data_byte(iter)?.into(),
        })
    }

    fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        write_status_byte(w, StatusType::ChannelPressure, self.channel)?;
        write_u8!(w, self.pressure.get())
    }
}

/// A 14-bit pitch bend, transported as LSB then MSB on the wire.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PitchBendMessage {
    channel: Channel,
    pitch_bend: PitchBendValue,
}

impl PitchBendMessage {
    pub fn new(channel: Channel, pitch_bend: PitchBendValue) -> Self {
        Self {
            channel,
            pitch_bend,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn pitch_bend(&self) -> PitchBendValue {
        self.pitch_bend
    }

    fn parse(iter: &mut ByteReader<'_>, channel: Channel) -> LibResult<Self> {
        let lsb = data_byte(iter)?;
        let msb = data_byte(iter)?;
        Ok(Self {
            channel,
            pitch_bend: PitchBendValue::from_bytes(lsb, msb),
        })
    }

    fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        write_status_byte(w, StatusType::PitchBend, self.channel)?;
        write_u8!(w, self.pitch_bend.lsb())?;
        write_u8!(w, self.pitch_bend.msb())
    }
}

/// A MIDI channel voice message: the event family that addresses a channel
/// and carries one or two 7-bit data bytes. These are the only events subject
/// to running status.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Message {
    NoteOff(NoteMessage),
    NoteOn(NoteMessage),
    PolyPressure(PolyPressureMessage),
    Control(ControlChangeValue),
    ProgramChange(ProgramChangeValue),
    ChannelPressure(ChannelPressureMessage),
    PitchBend(PitchBendMessage),
}

impl Default for Message {
    fn default() -> Self {
        Message::NoteOn(NoteMessage::default())
    }
}

impl Message {
    pub fn channel(&self) -> Channel {
        match self {
            Message::NoteOff(value) => value.channel(),
            Message::NoteOn(value) => value.channel(),
            Message::PolyPressure(value) => value.channel(),
            Message::Control(value) => value.channel(),
            Message::ProgramChange(value) => value.channel(),
            Message::ChannelPressure(value) => value.channel(),
            Message::PitchBend(value) => value.channel(),
        }
    }

    pub(crate) fn parse(iter: &mut ByteReader<'_>) -> LibResult<Self> {
        // A data byte in status position means running status: use the
        // previous status byte and leave the data byte where it is.
        let first = iter.peek_or_die().context(io!())?;
        let status = if first & 0x80 == 0 {
            match iter.running_status() {
                Some(running) => {
                    trace!("running status byte {:#04x}", running);
                    running
                }
                None => invalid_event!(
                    "data byte {:#04X} in status position with no running status",
                    first
                ),
            }
        } else {
            let status = iter.read_u8().context(io!())?;
            iter.set_running_status(status);
            status
        };
        let (status_type, channel) = split_byte(status)?;
        match status_type {
            StatusType::NoteOff => Ok(Message::NoteOff(NoteMessage::parse(iter, channel)?)),
            StatusType::NoteOn => Ok(Message::NoteOn(NoteMessage::parse(iter, channel)?)),
            StatusType::PolyPressure => Ok(Message::PolyPressure(PolyPressureMessage::parse(
                iter, channel,
            )?)),
            StatusType::Control => Ok(Message::Control(ControlChangeValue::parse(iter, channel)?)),
            StatusType::Program => Ok(Message::ProgramChange(ProgramChangeValue::parse(
                iter, channel,
            )?)),
            StatusType::ChannelPressure => Ok(Message::ChannelPressure(
                ChannelPressureMessage::parse(iter, channel)?,
            )),
            StatusType::PitchBend => {
                Ok(Message::PitchBend(PitchBendMessage::parse(iter, channel)?))
            }
        }
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        match self {
            Message::NoteOff(value) => value.write(w, StatusType::NoteOff),
            Message::NoteOn(value) => value.write(w, StatusType::NoteOn),
            Message::PolyPressure(value) => value.write(w),
            Message::Control(value) => value.write(w),
            Message::ProgramChange(value) => value.write(w),
            Message::ChannelPressure(value) => value.write(w),
            Message::PitchBend(value) => value.write(w),
        }
    }
}

/// Returns (4-bit status type, 4-bit channel).
fn split_byte(status_byte: u8) -> LibResult<(StatusType, Channel)> {
    let status_type = StatusType::from_u8(status_byte >> 4)?;
    let channel: Channel = (status_byte & 0b0000_1111).into();
    Ok((status_type, channel))
}

/// Combines the status type and channel of a channel voice message.
fn merge_byte(status: StatusType, channel: Channel) -> u8 {
    ((status as u8) << 4) | channel.get()
}

fn write_status_byte<W: Write>(
    w: &mut Scribe<W>,
    status: StatusType,
    channel: Channel,
) -> LibResult<()> {
    w.write_status_byte(merge_byte(status, channel))
}

/// Reads one byte and requires its high bit to be clear.
fn data_byte(iter: &mut ByteReader<'_>) -> LibResult<u8> {
    let value = iter.read_u8().context(io!())?;
    if value & 0x80 != 0 {
        invalid_event!("expected a data byte, found {:#04X} with high bit set", value);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(bytes: &[u8]) -> LibResult<Message> {
        let mut iter = ByteReader::new(bytes);
        Message::parse(&mut iter)
    }

    #[test]
    fn split_and_merge() {
        let (status_type, channel) = split_byte(0x93).unwrap();
        assert_eq!(StatusType::NoteOn, status_type);
        assert_eq!(3, channel.get());
        assert_eq!(0x93, merge_byte(status_type, channel));
    }

    #[test]
    fn parse_note_on() {
        let message = parse_one(&[0x90, 0x3C, 0x40]).unwrap();
        let note = match message {
            Message::NoteOn(inner) => inner,
            other => panic!("wrong variant {:?}", other),
        };
        assert_eq!(0, note.channel().get());
        assert_eq!(60, note.note_number().get());
        assert_eq!(64, note.velocity().get());
    }

    #[test]
    fn parse_program_change_single_byte() {
        let bytes = [0xC1u8, 0x07, 0xFF];
        let mut iter = ByteReader::new(&bytes);
        let message = Message::parse(&mut iter).unwrap();
        assert!(matches!(message, Message::ProgramChange(_)));
        // only the status and one data byte were consumed
        assert_eq!(2, iter.position());
    }

    #[test]
    fn parse_running_status() {
        let bytes = [0x91u8, 0x3C, 0x40, 0x3C, 0x00];
        let mut iter = ByteReader::new(&bytes);
        let first = Message::parse(&mut iter).unwrap();
        let second = Message::parse(&mut iter).unwrap();
        assert!(matches!(first, Message::NoteOn(_)));
        let second = match second {
            Message::NoteOn(inner) => inner,
            other => panic!("wrong variant {:?}", other),
        };
        assert_eq!(1, second.channel().get());
        assert_eq!(0, second.velocity().get());
    }

    #[test]
    fn parse_running_status_missing() {
        let result = parse_one(&[0x3C, 0x40]);
        assert!(result.is_err());
        assert_eq!(
            crate::ErrorKind::InvalidEvent,
            result.err().unwrap().kind()
        );
    }

    #[test]
    fn parse_bad_data_byte() {
        let result = parse_one(&[0x90, 0x3C, 0x80]);
        assert!(result.is_err());
        assert_eq!(
            crate::ErrorKind::InvalidEvent,
            result.err().unwrap().kind()
        );
    }

    #[test]
    fn write_pitch_bend() {
        let mut bytes: Vec<u8> = Vec::new();
        let mut scribe = Scribe::new(&mut bytes, false);
        let message = Message::PitchBend(PitchBendMessage::new(
            Channel::new(2),
            PitchBendValue::new(8292),
        ));
        message.write(&mut scribe).unwrap();
        assert_eq!(vec![0xE2, 0x64, 0x40], bytes);
    }
}
