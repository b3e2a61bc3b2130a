use crate::error::LibResult;
use crate::scribe::Scribe;
use crate::Error;
use std::convert::TryFrom;
use std::io::Write;

clamp!(
    /// The allowable values for [`Division`] when using the quarter note
    /// method: a positive 15-bit integer, 1 through 32,767. The default value
    /// is 1024.
    QuarterNoteDivision,
    u16,
    1,
    32767,
    1024,
    pub
);

/// Specifies the meaning of the delta-times. It has two formats, one for
/// metrical time, and one for time-code-based time.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum Division {
    /// If bit 15 of the division word is zero, bits 14 thru 0 represent the
    /// number of delta-time "ticks" which make up a quarter-note. For
    /// instance, if the division is 96, then a time interval of an
    /// eighth-note between two events in the file would be 48.
    QuarterNote(QuarterNoteDivision),
    /// Frame rate and resolution within the frame.
    Smpte(SmpteRate),
}

impl Default for Division {
    fn default() -> Self {
        Division::QuarterNote(QuarterNoteDivision::default())
    }
}

const DIVISION_TYPE_BIT: u16 = 0b1000_0000_0000_0000;

impl Division {
    pub(crate) fn from_u16(value: u16) -> LibResult<Self> {
        if value & DIVISION_TYPE_BIT == DIVISION_TYPE_BIT {
            Ok(Division::Smpte(SmpteRate::from_u16(value)?))
        } else {
            if value == 0 {
                invalid_arg!("the division is zero ticks per quarter note");
            }
            Ok(Division::QuarterNote(QuarterNoteDivision::new(value)))
        }
    }

    pub(crate) fn to_u16(&self) -> u16 {
        match self {
            Division::QuarterNote(q) => q.get(),
            Division::Smpte(s) => s.to_u16(),
        }
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        w.write_u16(self.to_u16())
    }
}

impl TryFrom<u16> for Division {
    type Error = Error;

    fn try_from(value: u16) -> crate::Result<Self> {
        Ok(Division::from_u16(value)?)
    }
}

/// Bits 14 thru 8 of a SMPTE division contain one of the four values -24,
/// -25, -29, or -30, corresponding to the four standard SMPTE and MIDI time
/// code formats (-29 corresponds to 30 drop frame), and represent the number
/// of frames per second. These negative numbers are stored in two's
/// complement form.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum FrameRate {
    /// 24 frames per second
    N24,
    /// 25 frames per second
    N25,
    /// 30 drop frame
    N29,
    /// 30 frames per second
    N30,
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate::N24
    }
}

impl FrameRate {
    fn from_i8(value: i8) -> LibResult<Self> {
        match value {
            -24 => Ok(FrameRate::N24),
            -25 => Ok(FrameRate::N25),
            -29 => Ok(FrameRate::N29),
            -30 => Ok(FrameRate::N30),
            _ => invalid_arg!("{} is not a SMPTE frames-per-second value", value),
        }
    }

    fn to_i8(self) -> i8 {
        match self {
            FrameRate::N24 => -24,
            FrameRate::N25 => -25,
            FrameRate::N29 => -29,
            FrameRate::N30 => -30,
        }
    }
}

/// A time-code-based division: frames per second and ticks per frame. The
/// resolution (ticks per frame) is typically 4 (MIDI time code), 8, 10, 80
/// (bit resolution), or 100. Millisecond-based tracks use 25 frames per
/// second and a resolution of 40.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct SmpteRate {
    frame_rate: FrameRate,
    resolution: u8,
}

impl Default for SmpteRate {
    fn default() -> Self {
        // This is the 'millisecond-based tracks' example given by the file spec.
        SmpteRate {
            frame_rate: FrameRate::N25,
            resolution: 40,
        }
    }
}

impl SmpteRate {
    pub fn new(frame_rate: FrameRate, resolution: u8) -> Self {
        Self {
            frame_rate,
            resolution,
        }
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    fn from_u16(value: u16) -> LibResult<Self> {
        let frame_rate = FrameRate::from_i8((value >> 8) as u8 as i8)?;
        Ok(Self {
            frame_rate,
            resolution: value as u8,
        })
    }

    fn to_u16(&self) -> u16 {
        (u16::from(self.frame_rate.to_i8() as u8) << 8) | u16::from(self.resolution)
    }
}
