use crate::error::LibResult;
use std::convert::TryFrom;

/// A note duration expressed as the negative power of two stored in the `dd`
/// byte of a time signature meta event. `2` represents a quarter note, `3` an
/// eighth note, and so on.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum DurationName {
    /// Whole Note / Semibreve
    Whole = 0,

    /// Half Note / Minim
    Half = 1,

    /// Quarter Note / Crotchet
    Quarter = 2,

    /// Eighth Note / Quaver
    Eighth = 3,

    /// Sixteenth Note / Semiquaver
    Sixteenth = 4,

    /// Thirty-Second Note / Demisemiquaver
    D32 = 5,

    /// Sixty-Fourth Note / Hemidemisemiquaver
    D64 = 6,

    /// One-Twenty-Eighth Note
    D128 = 7,

    /// Two-Fifty-Sixth Note
    D256 = 8,

    /// Five-Hundred-Twelfth Note
    D512 = 9,

    /// One-Thousand-Twenty-Fourth Note
    D1024 = 10,
}

impl Default for DurationName {
    fn default() -> Self {
        DurationName::Quarter
    }
}

impl DurationName {
    pub(crate) fn from_u8(v: u8) -> LibResult<Self> {
        match v {
            0 => Ok(DurationName::Whole),
            1 => Ok(DurationName::Half),
            2 => Ok(DurationName::Quarter),
            3 => Ok(DurationName::Eighth),
            4 => Ok(DurationName::Sixteenth),
            5 => Ok(DurationName::D32),
            6 => Ok(DurationName::D64),
            7 => Ok(DurationName::D128),
            8 => Ok(DurationName::D256),
            9 => Ok(DurationName::D512),
            10 => Ok(DurationName::D1024),
            _ => invalid_event!("time signature denominator {} out of range", v),
        }
    }

    pub(crate) fn to_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for DurationName {
    type Error = crate::Error;

    fn try_from(value: u8) -> crate::Result<Self> {
        Ok(Self::from_u8(value)?)
    }
}

#[test]
fn duration_name_bytes() {
    for v in 0u8..=10 {
        assert_eq!(v, DurationName::from_u8(v).unwrap().to_u8());
    }
    assert!(DurationName::from_u8(11).is_err());
}
