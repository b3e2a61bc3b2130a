/*!
The `core` module is for types and concepts that are *not* strictly related to
MIDI *files*. These types and concepts could be used for realtime MIDI as
well. In particular, [`Message`] is the shape a live MIDI driver would consume
and produce.
!*/

mod clocks;
mod duration_name;
mod message;
mod numbers;
mod status_type;
pub(crate) mod vlq;

pub use clocks::Clocks;
pub use duration_name::DurationName;
pub use message::{
    ChannelPressureMessage, ControlChangeValue, Message, NoteMessage, PitchBendMessage,
    PolyPressureMessage, ProgramChangeValue,
};
pub use numbers::{
    Channel, ControlNumber, ControlValue, NoteNumber, PitchBendValue, PortValue, PressureValue,
    Program, Velocity,
};
pub use status_type::StatusType;
pub use vlq::MAX_VLQ_VALUE;
