use crate::error::LibResult;
use std::convert::TryFrom;

/// The high nibble of a channel voice status byte. The low nibble carries the
/// channel number. System statuses (high nibble `0xF`) are dispatched before
/// this type is consulted, so it covers only the seven channel voice types.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum StatusType {
    /// `0x8`: a `Note Off` message.
    NoteOff = 0x8,

    /// `0x9`: a `Note On` message (a velocity of 0 acts as a note off).
    NoteOn = 0x9,

    /// `0xA`: a `Polyphonic Key Pressure/Aftertouch` message.
    PolyPressure = 0xA,

    /// `0xB`: a `Control Change` message.
    Control = 0xB,

    /// `0xC`: a `Program Change` message. Carries one data byte.
    Program = 0xC,

    /// `0xD`: a `Channel Pressure/Aftertouch` message. Carries one data byte.
    ChannelPressure = 0xD,

    /// `0xE`: a `Pitch Bend Change` message.
    PitchBend = 0xE,
}

impl Default for StatusType {
    fn default() -> Self {
        StatusType::NoteOff
    }
}

impl StatusType {
    pub(crate) fn from_u8(value: u8) -> LibResult<Self> {
        match value {
            0x8 => Ok(StatusType::NoteOff),
            0x9 => Ok(StatusType::NoteOn),
            0xA => Ok(StatusType::PolyPressure),
            0xB => Ok(StatusType::Control),
            0xC => Ok(StatusType::Program),
            0xD => Ok(StatusType::ChannelPressure),
            0xE => Ok(StatusType::PitchBend),
            _ => invalid_event!("unknown status type {:#03X}", value),
        }
    }
}

impl TryFrom<u8> for StatusType {
    type Error = crate::Error;

    fn try_from(value: u8) -> crate::Result<Self> {
        Ok(StatusType::from_u8(value)?)
    }
}

#[test]
fn status_type_conversions() {
    use std::convert::TryInto;
    for value in 0x8u8..=0xE {
        assert_eq!(value, StatusType::from_u8(value).unwrap() as u8);
    }
    assert!(StatusType::from_u8(0x7).is_err());
    let converted: StatusType = 0xBu8.try_into().unwrap();
    assert_eq!(StatusType::Control, converted);
}
