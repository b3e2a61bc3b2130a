use crate::byte_reader::ByteReader;
use crate::error::{self, LibResult};
use crate::file::Division;
use crate::scribe::Scribe;
use crate::Error;
use log::trace;
use snafu::ResultExt;
use std::convert::TryFrom;
use std::io::Write;

/// The header chunk: format and division. The track count is not stored
/// here; it is derived from the file's track list when encoding and returned
/// transiently when parsing.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Header {
    format: Format,
    division: Division,
}

impl Header {
    /// Create a new `Header` object.
    pub fn new(format: Format, division: Division) -> Self {
        Self { format, division }
    }

    /// A getter for the `format` field.
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// A getter for the `division` field.
    pub fn division(&self) -> &Division {
        &self.division
    }

    /// Parse the `MThd` chunk. Returns the header and the declared number of
    /// track chunks. Anything that does not begin with the `MThd` tag is
    /// rejected as not-a-MIDI-file before any other validation.
    pub(crate) fn parse(iter: &mut ByteReader<'_>) -> LibResult<(Self, u16)> {
        if !iter.is_tag("MThd") {
            return error::NotMidiSnafu { site: site!() }.fail();
        }
        iter.expect_tag("MThd").context(io!())?;
        let chunk_length = iter.read_u32().context(io!())?;
        // header chunk length is always 6
        if chunk_length != 6 {
            invalid_file!("header chunk length is {}, expected 6", chunk_length);
        }
        let format_word = iter.read_u16().context(io!())?;
        let num_tracks = iter.read_u16().context(io!())?;
        let division_word = iter.read_u16().context(io!())?;
        let format = Format::from_u16(format_word)?;
        let division = Division::from_u16(division_word)?;
        trace!(
            "header: format {:?}, {} tracks, division {:#06x}",
            format,
            num_tracks,
            division_word
        );
        if matches!(format, Format::Single) && num_tracks != 1 {
            invalid_arg!(
                "a format 0 file must declare exactly one track, found {}",
                num_tracks
            );
        }
        Ok((Self { format, division }, num_tracks))
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>, ntracks: u16) -> LibResult<()> {
        // write the header chunk identifier
        w.write_all(b"MThd").context(wr!())?;

        // write the header chunk length (always 6)
        w.write_u32(6)?;

        // write the format indicator
        w.write_u16(self.format as u16)?;

        // write the number of tracks
        w.write_u16(ntracks)?;

        // write the division value
        self.division.write(w)
    }
}

#[repr(u16)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash, Default)]
pub enum Format {
    /// 0: the file contains a single multi-channel track
    Single = 0,
    /// 1: the file contains one or more simultaneous tracks (or MIDI outputs) of a sequence
    #[default]
    Multi = 1,
    /// 2: the file contains one or more sequentially independent single-track patterns
    Sequential = 2,
}

impl Format {
    pub(crate) fn from_u16(value: u16) -> LibResult<Self> {
        match value {
            0 => Ok(Format::Single),
            1 => Ok(Format::Multi),
            2 => Ok(Format::Sequential),
            _ => invalid_arg!("{} is not a MIDI file format", value),
        }
    }
}

impl TryFrom<u16> for Format {
    type Error = Error;

    fn try_from(value: u16) -> crate::Result<Self> {
        Ok(Self::from_u16(value)?)
    }
}
