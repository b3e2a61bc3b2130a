/*!
A library for reading, mutating, and writing Standard MIDI Files.

A [`MidiFile`] owns a [`file::Header`] and a list of [`file::Track`]s; a
track owns its [`file::TrackEvent`]s. Parsing is buffer-in (`&[u8]` or any
`Read`, which is drained first) and encoding is buffer-out (any `Write`).
Re-encoding a parsed file reproduces its bytes exactly, with one documented
normalization: the encoder always uses running status, so a file that chose
not to may come back smaller but decodes to the same events.

```
use midi_smf::MidiFile;

let bytes: Vec<u8> = vec![
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd, length 6
    0x00, 0x01, 0x00, 0x01, 0x00, 0x60,             // format 1, 1 track, division 96
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, // MTrk, length 4
    0x00, 0xFF, 0x2F, 0x00,                         // end of track
];
let mfile = MidiFile::parse(&bytes).unwrap();
assert_eq!(1, mfile.tracks_len());
let mut out: Vec<u8> = Vec::new();
mfile.write(&mut out).unwrap();
assert_eq!(bytes, out);
```
!*/

#[macro_use]
mod error;
#[macro_use]
mod clamp;
#[macro_use]
mod macros;

mod byte_reader;
mod scribe;
mod text;

pub mod core;
pub mod file;

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::text::Text;

use crate::byte_reader::ByteReader;
use crate::error::LibResult;
use crate::file::{ensure_end_of_track, Division, Format, Header, Track};
use crate::scribe::Scribe;
use log::{debug, trace};
use snafu::ResultExt;
use std::convert::TryFrom;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

// https://www.music.mcgill.ca/~gary/306/week9/smf.html

/// A Standard MIDI File: a header chunk followed by track chunks. The track
/// count written to the header is always derived from the track list, so the
/// two cannot disagree.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct MidiFile {
    header: Header,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Create an empty file with the given header fields.
    pub fn new(format: Format, division: Division) -> Self {
        Self {
            header: Header::new(format, division),
            tracks: Vec::new(),
        }
    }

    /// Parse a file from a byte buffer.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut iter = ByteReader::new(bytes);
        Ok(Self::read_inner(&mut iter)?)
    }

    /// Drain `r` and parse the bytes.
    pub fn read<R: Read>(mut r: R) -> Result<Self> {
        let mut bytes = Vec::new();
        r.read_to_end(&mut bytes)
            .context(error::ReadInputSnafu { site: site!() })?;
        Self::parse(&bytes)
    }

    /// Parse the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).context(error::FileOpenSnafu { path })?;
        Self::parse(&bytes)
    }

    /// Serialize to `w`.
    pub fn write<W: Write>(&self, w: &mut W) -> Result<()> {
        Ok(self.write_inner(w)?)
    }

    /// Serialize to the file at `path`, creating or truncating it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).context(error::FileCreateSnafu { path })?;
        let mut w = BufWriter::new(file);
        Ok(self.write_inner(&mut w)?)
    }

    /// A getter for the header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The number of tracks.
    pub fn tracks_len(&self) -> usize {
        self.tracks.len()
    }

    /// Iterator over the tracks.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// The track at `index`, or `None` if out of range.
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// The track at `index` for mutation, or `None` if out of range.
    pub fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.get_mut(index)
    }

    /// Add a track to the end. An end-of-track event is appended to the
    /// track if it does not already end with one.
    pub fn push_track(&mut self, track: Track) -> Result<()> {
        Ok(self.insert_track_inner(self.tracks.len(), track)?)
    }

    /// Add a track at `index` and shift everything after it. An end-of-track
    /// event is appended to the track if it does not already end with one.
    pub fn insert_track(&mut self, index: usize, track: Track) -> Result<()> {
        Ok(self.insert_track_inner(index, track)?)
    }

    /// Remove and return the track at `index`, shifting everything after it.
    pub fn remove_track(&mut self, index: usize) -> Result<Track> {
        Ok(self.remove_track_inner(index)?)
    }

    /// Remove and return the last track.
    pub fn pop_track(&mut self) -> Result<Track> {
        Ok(self.pop_track_inner()?)
    }

    fn pop_track_inner(&mut self) -> LibResult<Track> {
        if self.tracks.is_empty() {
            invalid_arg!("cannot remove a track from a file with no tracks");
        }
        self.remove_track_inner(self.tracks.len() - 1)
    }

    fn insert_track_inner(&mut self, index: usize, track: Track) -> LibResult<()> {
        if matches!(self.header.format(), Format::Single) && !self.tracks.is_empty() {
            invalid_arg!("a format 0 file may only contain one track");
        }
        if self.tracks.len() >= usize::from(u16::MAX) {
            invalid_arg!("a file may not contain more than {} tracks", u16::MAX);
        }
        if index > self.tracks.len() {
            invalid_arg!(
                "insert index {} is out of range for a file of {} tracks",
                index,
                self.tracks.len()
            );
        }
        self.tracks.insert(index, ensure_end_of_track(track)?);
        Ok(())
    }

    fn remove_track_inner(&mut self, index: usize) -> LibResult<Track> {
        if index >= self.tracks.len() {
            invalid_arg!(
                "remove index {} is out of range for a file of {} tracks",
                index,
                self.tracks.len()
            );
        }
        Ok(self.tracks.remove(index))
    }

    fn read_inner(iter: &mut ByteReader<'_>) -> LibResult<Self> {
        trace!("parsing header chunk");
        let (header, num_tracks) = Header::parse(iter)?;
        let mut tracks = Vec::new();
        while tracks.len() < usize::from(num_tracks) {
            if iter.is_end() {
                invalid_file!(
                    "the header declares {} track chunks but only {} were found",
                    num_tracks,
                    tracks.len()
                );
            }
            if iter.is_tag("MTrk") {
                trace!(
                    "parsing track chunk {} (zero-based) of {}",
                    tracks.len(),
                    num_tracks
                );
                tracks.push(Track::parse(iter)?);
            } else {
                // chunk types other than the ones this library knows are
                // allowed by the file spec and skipped
                skip_unknown_chunk(iter)?;
            }
        }
        Ok(Self { header, tracks })
    }

    fn write_inner<W: Write>(&self, w: &mut W) -> LibResult<()> {
        if matches!(self.header.format(), Format::Single) && self.tracks.len() != 1 {
            invalid_arg!(
                "a format 0 file must contain exactly one track, this file has {}",
                self.tracks.len()
            );
        }
        let ntracks = match u16::try_from(self.tracks.len()) {
            Ok(value) => value,
            Err(_) => out_of_range!("{} tracks do not fit in the header", self.tracks.len()),
        };
        let mut scribe = Scribe::new(w, true);
        self.header.write(&mut scribe, ntracks)?;
        for track in self.tracks() {
            track.write(&mut scribe)?;
        }
        Ok(())
    }
}

fn skip_unknown_chunk(iter: &mut ByteReader<'_>) -> LibResult<()> {
    let tag = iter.read_n(4).context(io!())?;
    let length = iter.read_u32().context(io!())?;
    debug!(
        "skipping unknown chunk '{}' of {} bytes",
        String::from_utf8_lossy(tag),
        length
    );
    iter.skip(length as usize).context(io!())?;
    Ok(())
}
