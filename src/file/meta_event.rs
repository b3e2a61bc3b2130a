use crate::byte_reader::ByteReader;
use crate::core::{Channel, Clocks, DurationName, PortValue};
use crate::error::{self, LibResult};
use crate::scribe::{vlq_length, Scribe};
use crate::{Result, Text};
use snafu::{ensure, ResultExt};
use std::io::Write;

pub(crate) const META_SEQUENCE_NUM: u8 = 0x00;
pub(crate) const META_TEXT: u8 = 0x01;
pub(crate) const META_COPYRIGHT: u8 = 0x02;
pub(crate) const META_TRACK_NAME: u8 = 0x03;
pub(crate) const META_INSTR_NAME: u8 = 0x04;
pub(crate) const META_LYRIC: u8 = 0x05;
pub(crate) const META_MARKER: u8 = 0x06;
pub(crate) const META_CUE_POINT: u8 = 0x07;
pub(crate) const META_PROG_NAME: u8 = 0x08;
pub(crate) const META_DEVICE_NAME: u8 = 0x09;
pub(crate) const META_CHAN_PREFIX: u8 = 0x20;
pub(crate) const META_PORT: u8 = 0x21;
pub(crate) const META_END_OF_TRACK: u8 = 0x2f;
pub(crate) const META_SET_TEMPO: u8 = 0x51;
pub(crate) const META_SMTPE_OFFSET: u8 = 0x54;
pub(crate) const META_TIME_SIG: u8 = 0x58;
pub(crate) const META_KEY_SIG: u8 = 0x59;

pub(crate) const LEN_META_SEQUENCE_NUM: u32 = 2;
pub(crate) const LEN_META_CHAN_PREFIX: u32 = 1;
pub(crate) const LEN_META_PORT: u32 = 1;
pub(crate) const LEN_META_END_OF_TRACK: u32 = 0;
pub(crate) const LEN_META_SET_TEMPO: u32 = 3;
pub(crate) const LEN_META_SMTPE_OFFSET: u32 = 5;
pub(crate) const LEN_META_TIME_SIG: u32 = 4;
pub(crate) const LEN_META_KEY_SIG: u32 = 2;

/// A meta event: `FF <type> <length> <data>`. The type byte is always less
/// than 128 and the length is a variable-length quantity. Types this library
/// recognizes get typed variants with their payloads decoded and their
/// lengths validated; every other type is carried through verbatim in
/// [`MetaEvent::Other`] so that it re-encodes byte-for-byte.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum MetaEvent {
    /// `FF 00 02 ssss`: the number of the sequence, a 16-bit big-endian
    /// value. Must occur at the beginning of a track if present.
    SequenceNumber(u16),

    /// `FF 01 len text`: any amount of text describing anything.
    OtherText(Text),

    /// `FF 02 len text`: a copyright notice.
    Copyright(Text),

    /// `FF 03 len text`: if in a format 0 track, or the first track in a
    /// format 1 file, the name of the sequence. Otherwise, the name of the
    /// track.
    TrackName(Text),

    /// `FF 04 len text`: a description of the instrumentation of the track.
    InstrumentName(Text),

    /// `FF 05 len text`: a lyric to be sung. Generally, each syllable is a
    /// separate lyric event which begins at the event's time.
    Lyric(Text),

    /// `FF 06 len text`: the name of a point in the sequence, such as a
    /// rehearsal letter or section name ("First Verse", etc.).
    Marker(Text),

    /// `FF 07 len text`: a description of something happening on a film or
    /// stage at that point in the score.
    CuePoint(Text),

    /// `FF 08 len text`: the name of the program (patch) used by the track.
    ProgramName(Text),

    /// `FF 09 len text`: the name of the device the track is intended for.
    DeviceName(Text),

    /// `FF 20 01 cc`: associates a MIDI channel with all events which
    /// follow, until the next event that carries a channel.
    MidiChannelPrefix(Channel),

    /// `FF 21 01 pp`: the output port for the track.
    Port(PortValue),

    /// `FF 2F 00`: this event is not optional. It marks the exact ending
    /// point of the track and must be the last event in every track chunk.
    EndOfTrack,

    /// `FF 51 03 tttttt`: set tempo, in microseconds per MIDI quarter-note,
    /// as a 24-bit big-endian value.
    SetTempo(MicrosecondsPerQuarter),

    /// `FF 54 05 hr mn se fr ff`: the SMPTE time at which the track is
    /// supposed to start.
    SmpteOffset(SmpteOffsetValue),

    /// `FF 58 04 nn dd cc bb`: the time signature: numerator, denominator as
    /// a negative power of two, MIDI clocks per metronome click, and notated
    /// 32nd-notes per MIDI quarter-note.
    TimeSignature(TimeSignatureValue),

    /// `FF 59 02 sf mi`: the key signature: a signed count of sharps
    /// (positive) or flats (negative), and major (0) or minor (1).
    KeySignature(KeySignatureValue),

    /// Any meta type this library does not recognize, including
    /// sequencer-specific (`FF 7F`). The payload is held, and re-encoded,
    /// verbatim.
    Other { meta_type: u8, data: Vec<u8> },
}

impl Default for MetaEvent {
    fn default() -> Self {
        MetaEvent::EndOfTrack
    }
}

impl MetaEvent {
    pub(crate) fn parse(iter: &mut ByteReader<'_>) -> LibResult<Self> {
        iter.read_expect(0xff).context(io!())?;
        let meta_type = iter.read_u8().context(io!())?;
        if meta_type & 0x80 != 0 {
            invalid_event!("meta event type {:#04X} has its high bit set", meta_type);
        }
        let length = iter.read_vlq_u32().context(io!())?;
        match meta_type {
            META_SEQUENCE_NUM => {
                expect_payload_length(meta_type, length, LEN_META_SEQUENCE_NUM)?;
                let value = iter.read_u16().context(io!())?;
                Ok(MetaEvent::SequenceNumber(value))
            }
            META_TEXT..=META_DEVICE_NAME => Self::parse_text(iter, meta_type, length),
            META_CHAN_PREFIX => {
                expect_payload_length(meta_type, length, LEN_META_CHAN_PREFIX)?;
                let channel = iter.read_u8().context(io!())?;
                ensure!(
                    channel <= Channel::MAX,
                    invalid_event_s!("channel prefix {} is out of range", channel)
                );
                Ok(MetaEvent::MidiChannelPrefix(Channel::new(channel)))
            }
            META_PORT => {
                expect_payload_length(meta_type, length, LEN_META_PORT)?;
                let port = iter.read_u8().context(io!())?;
                ensure!(
                    port <= PortValue::MAX,
                    invalid_event_s!("port {} is out of range", port)
                );
                Ok(MetaEvent::Port(PortValue::new(port)))
            }
            META_END_OF_TRACK => {
                expect_payload_length(meta_type, length, LEN_META_END_OF_TRACK)?;
                Ok(MetaEvent::EndOfTrack)
            }
            META_SET_TEMPO => {
                expect_payload_length(meta_type, length, LEN_META_SET_TEMPO)?;
                Ok(MetaEvent::SetTempo(MicrosecondsPerQuarter::parse(iter)?))
            }
            META_SMTPE_OFFSET => {
                expect_payload_length(meta_type, length, LEN_META_SMTPE_OFFSET)?;
                Ok(MetaEvent::SmpteOffset(SmpteOffsetValue::parse(iter)?))
            }
            META_TIME_SIG => {
                expect_payload_length(meta_type, length, LEN_META_TIME_SIG)?;
                Ok(MetaEvent::TimeSignature(TimeSignatureValue::parse(iter)?))
            }
            META_KEY_SIG => {
                expect_payload_length(meta_type, length, LEN_META_KEY_SIG)?;
                Ok(MetaEvent::KeySignature(KeySignatureValue::parse(iter)?))
            }
            _ => {
                let data = iter.read_n(length as usize).context(io!())?.to_vec();
                Ok(MetaEvent::Other { meta_type, data })
            }
        }
    }

    pub(crate) fn parse_text(
        iter: &mut ByteReader<'_>,
        text_type: u8,
        length: u32,
    ) -> LibResult<Self> {
        let bytes = iter.read_n(length as usize).context(io!())?.to_vec();
        // the file spec does not say what encoding is used for strings
        let s: Text = bytes.into();
        match text_type {
            META_TEXT => Ok(MetaEvent::OtherText(s)),
            META_COPYRIGHT => Ok(MetaEvent::Copyright(s)),
            META_TRACK_NAME => Ok(MetaEvent::TrackName(s)),
            META_INSTR_NAME => Ok(MetaEvent::InstrumentName(s)),
            META_LYRIC => Ok(MetaEvent::Lyric(s)),
            META_MARKER => Ok(MetaEvent::Marker(s)),
            META_CUE_POINT => Ok(MetaEvent::CuePoint(s)),
            META_PROG_NAME => Ok(MetaEvent::ProgramName(s)),
            META_DEVICE_NAME => Ok(MetaEvent::DeviceName(s)),
            _ => invalid_event!("{:#04X} is not a text meta type", text_type),
        }
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        // a meta event interrupts running status
        w.clear_running_status();
        w.write_all(&[0xff]).context(wr!())?;
        match self {
            MetaEvent::SequenceNumber(value) => {
                write_u8!(w, META_SEQUENCE_NUM)?;
                w.write_vlq(LEN_META_SEQUENCE_NUM)?;
                w.write_u16(*value)
            }
            MetaEvent::OtherText(s) => write_text(w, META_TEXT, s),
            MetaEvent::Copyright(s) => write_text(w, META_COPYRIGHT, s),
            MetaEvent::TrackName(s) => write_text(w, META_TRACK_NAME, s),
            MetaEvent::InstrumentName(s) => write_text(w, META_INSTR_NAME, s),
            MetaEvent::Lyric(s) => write_text(w, META_LYRIC, s),
            MetaEvent::Marker(s) => write_text(w, META_MARKER, s),
            MetaEvent::CuePoint(s) => write_text(w, META_CUE_POINT, s),
            MetaEvent::ProgramName(s) => write_text(w, META_PROG_NAME, s),
            MetaEvent::DeviceName(s) => write_text(w, META_DEVICE_NAME, s),
            MetaEvent::MidiChannelPrefix(channel) => {
                write_u8!(w, META_CHAN_PREFIX)?;
                w.write_vlq(LEN_META_CHAN_PREFIX)?;
                write_u8!(w, channel.get())
            }
            MetaEvent::Port(port) => {
                write_u8!(w, META_PORT)?;
                w.write_vlq(LEN_META_PORT)?;
                write_u8!(w, port.get())
            }
            MetaEvent::EndOfTrack => {
                write_u8!(w, META_END_OF_TRACK)?;
                w.write_vlq(LEN_META_END_OF_TRACK)
            }
            MetaEvent::SetTempo(value) => {
                write_u8!(w, META_SET_TEMPO)?;
                w.write_vlq(LEN_META_SET_TEMPO)?;
                // a 24-bit big-endian value: skip the first of the four
                // big-endian u32 bytes
                let bytes = u32::to_be_bytes(value.get());
                w.write_all(&bytes[1..]).context(wr!())
            }
            MetaEvent::SmpteOffset(value) => value.write(w),
            MetaEvent::TimeSignature(value) => value.write(w),
            MetaEvent::KeySignature(value) => value.write(w),
            MetaEvent::Other { meta_type, data } => {
                if meta_type & 0x80 != 0 {
                    out_of_range!("meta event type {:#04X} has its high bit set", meta_type);
                }
                write_u8!(w, *meta_type)?;
                w.write_vlq(vlq_length(data.len())?)?;
                w.write_all(data).context(wr!())
            }
        }
    }
}

fn expect_payload_length(meta_type: u8, found: u32, expected: u32) -> LibResult<()> {
    if found != expected {
        invalid_event!(
            "meta event {:#04X} has payload length {}, expected {}",
            meta_type,
            found,
            expected
        );
    }
    Ok(())
}

fn write_text<W: Write>(w: &mut Scribe<W>, text_type: u8, text: &Text) -> LibResult<()> {
    write_u8!(w, text_type)?;
    let bytes = text.as_bytes();
    w.write_vlq(vlq_length(bytes.len())?)?;
    w.write_all(bytes).context(wr!())
}

/// The raw bytes of a SMPTE offset meta event: hours, minutes, seconds,
/// frames and fractional frames (100ths of a frame).
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct SmpteOffsetValue {
    hr: u8,
    mn: u8,
    se: u8,
    fr: u8,
    ff: u8,
}

impl SmpteOffsetValue {
    pub fn new(hr: u8, mn: u8, se: u8, fr: u8, ff: u8) -> Self {
        Self { hr, mn, se, fr, ff }
    }

    pub fn hr(&self) -> u8 {
        self.hr
    }

    pub fn mn(&self) -> u8 {
        self.mn
    }

    pub fn se(&self) -> u8 {
        self.se
    }

    pub fn fr(&self) -> u8 {
        self.fr
    }

    pub fn ff(&self) -> u8 {
        self.ff
    }

    pub(crate) fn parse(iter: &mut ByteReader<'_>) -> LibResult<Self> {
        Ok(Self {
            hr: iter.read_u8().context(io!())?,
            mn: iter.read_u8().context(io!())?,
            se: iter.read_u8().context(io!())?,
            fr: iter.read_u8().context(io!())?,
            ff: iter.read_u8().context(io!())?,
        })
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        write_u8!(w, META_SMTPE_OFFSET)?;
        w.write_vlq(LEN_META_SMTPE_OFFSET)?;
        write_u8!(w, self.hr)?;
        write_u8!(w, self.mn)?;
        write_u8!(w, self.se)?;
        write_u8!(w, self.fr)?;
        write_u8!(w, self.ff)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct TimeSignatureValue {
    /// The upper part of a time signature. For example, in 6/8, the
    /// `numerator` is 6.
    numerator: u8,

    /// The lower part of a time signature. For example, in 6/8, the
    /// `denominator` is [`DurationName::Eighth`].
    denominator: DurationName,

    /// The number of MIDI clocks in a metronome click. This tells us on
    /// which beats of the bar a metronome should click, i.e. it is unrelated
    /// to tempo.
    click: Clocks,

    /// The number of notated 32nd-notes in a MIDI quarter-note. Normally 8.
    tpq: u8,
}

impl TimeSignatureValue {
    pub fn new(numerator: u8, denominator: DurationName, click: Clocks) -> Result<Self> {
        ensure!(
            numerator > 0,
            error::InvalidArgumentSnafu {
                site: site!(),
                description: "a time signature numerator of zero",
            }
        );
        Ok(Self {
            numerator,
            denominator,
            click,
            tpq: 8,
        })
    }

    pub fn numerator(&self) -> u8 {
        self.numerator
    }

    pub fn denominator(&self) -> DurationName {
        self.denominator
    }

    pub fn click(&self) -> Clocks {
        self.click
    }

    pub(crate) fn parse(iter: &mut ByteReader<'_>) -> LibResult<Self> {
        Ok(Self {
            numerator: iter.read_u8().context(io!())?,
            denominator: DurationName::from_u8(iter.read_u8().context(io!())?)?,
            click: Clocks::from_u8(iter.read_u8().context(io!())?),
            tpq: iter.read_u8().context(io!())?,
        })
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        write_u8!(w, META_TIME_SIG)?;
        w.write_vlq(LEN_META_TIME_SIG)?;
        write_u8!(w, self.numerator)?;
        write_u8!(w, self.denominator.to_u8())?;
        write_u8!(w, self.click.to_u8())?;
        write_u8!(w, self.tpq)
    }
}

clamp!(
    /// The number of flats (negative) or sharps (positive) in a key
    /// signature. For example `-2` means "2 flats". The valid range is -7 to
    /// 7.
    KeyAccidentals,
    i8,
    -7,
    7,
    0,
    pub
);

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum KeyMode {
    Major,
    Minor,
}

impl Default for KeyMode {
    fn default() -> Self {
        KeyMode::Major
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct KeySignatureValue {
    accidentals: KeyAccidentals,
    mode: KeyMode,
}

impl KeySignatureValue {
    pub fn new(accidentals: KeyAccidentals, mode: KeyMode) -> Self {
        Self { accidentals, mode }
    }

    pub fn accidentals(&self) -> KeyAccidentals {
        self.accidentals
    }

    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    pub(crate) fn parse(iter: &mut ByteReader<'_>) -> LibResult<Self> {
        let raw_accidentals = iter.read_i8().context(io!())?;
        if raw_accidentals < KeyAccidentals::MIN || raw_accidentals > KeyAccidentals::MAX {
            invalid_event!("key signature with {} accidentals", raw_accidentals);
        }
        let mode = match iter.read_u8().context(io!())? {
            0 => KeyMode::Major,
            1 => KeyMode::Minor,
            other => invalid_event!("key signature mode byte {}", other),
        };
        Ok(Self {
            accidentals: raw_accidentals.into(),
            mode,
        })
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        write_u8!(w, META_KEY_SIG)?;
        w.write_vlq(LEN_META_KEY_SIG)?;
        write_u8!(w, self.accidentals.get() as u8)?;
        write_u8!(w, self.mode as u8)
    }
}

pub(crate) const DEFAULT_MICROSECONDS_PER_QUARTER: u32 = 500_000;
pub(crate) const MAX_24BIT_UINT_VALUE: u32 = 16_777_215;

clamp!(
    /// In MIDI, tempos are given as microseconds per quarter note. The wire
    /// form is a 24-bit integer, hence the upper bound of 16,777,215. The
    /// default is 120 beats per minute, which is `500_000` microseconds per
    /// beat. The minimum is `1` since `0` microseconds per beat would be an
    /// infinitely fast tempo.
    MicrosecondsPerQuarter,
    u32,
    1,
    MAX_24BIT_UINT_VALUE,
    DEFAULT_MICROSECONDS_PER_QUARTER,
    pub
);

impl MicrosecondsPerQuarter {
    pub(crate) fn parse(iter: &mut ByteReader<'_>) -> LibResult<Self> {
        let bytes = iter.read_n(LEN_META_SET_TEMPO as usize).context(io!())?;
        // a big-endian u24: widen it to a big-endian u32
        let value = u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]);
        if value == 0 {
            invalid_event!("a tempo of zero microseconds per quarter note");
        }
        Ok(MicrosecondsPerQuarter::new(value))
    }
}

clamp!(
    /// A more convenient way to specify tempo, not part of the MIDI spec.
    /// This is closer to the way we think of tempo, e.g. "120 beats per
    /// minute". The type is locked to quarter notes, so translate if your
    /// "beat" is not a quarter note.
    QuartersPerMinute,
    u8,
    1,
    u8::MAX,
    120,
    pub
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn parse_meta(bytes: &[u8]) -> LibResult<MetaEvent> {
        let mut iter = ByteReader::new(bytes);
        MetaEvent::parse(&mut iter)
    }

    fn write_meta(event: &MetaEvent) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        let mut scribe = Scribe::new(&mut bytes, true);
        event.write(&mut scribe).unwrap();
        bytes
    }

    #[test]
    fn set_tempo_round_trip() {
        // 500,000 microseconds per quarter is 120 beats per minute
        let wire = [0xFFu8, 0x51, 0x03, 0x07, 0xA1, 0x20];
        let event = parse_meta(&wire).unwrap();
        let tempo = match &event {
            MetaEvent::SetTempo(value) => value,
            other => panic!("wrong variant {:?}", other),
        };
        assert_eq!(500_000, tempo.get());
        assert_eq!(wire.to_vec(), write_meta(&event));
    }

    #[test]
    fn set_tempo_length_mismatch() {
        let wire = [0xFFu8, 0x51, 0x02, 0x07, 0xA1];
        let err = parse_meta(&wire).err().unwrap();
        assert_eq!(ErrorKind::InvalidEvent, err.kind());
    }

    #[test]
    fn time_signature_length_mismatch() {
        let wire = [0xFFu8, 0x58, 0x03, 0x06, 0x03, 0x24];
        let err = parse_meta(&wire).err().unwrap();
        assert_eq!(ErrorKind::InvalidEvent, err.kind());
    }

    #[test]
    fn sequence_number_round_trip() {
        let wire = [0xFFu8, 0x00, 0x02, 0x01, 0x2C];
        let event = parse_meta(&wire).unwrap();
        assert_eq!(MetaEvent::SequenceNumber(300), event);
        assert_eq!(wire.to_vec(), write_meta(&event));
    }

    #[test]
    fn end_of_track_round_trip() {
        let wire = [0xFFu8, 0x2F, 0x00];
        let event = parse_meta(&wire).unwrap();
        assert_eq!(MetaEvent::EndOfTrack, event);
        assert_eq!(wire.to_vec(), write_meta(&event));
    }

    #[test]
    fn unknown_meta_round_trip() {
        // sequencer-specific: opaque to this library
        let wire = [0xFFu8, 0x7F, 0x04, 0x00, 0x00, 0x41, 0x12];
        let event = parse_meta(&wire).unwrap();
        match &event {
            MetaEvent::Other { meta_type, data } => {
                assert_eq!(0x7F, *meta_type);
                assert_eq!(&[0x00u8, 0x00, 0x41, 0x12], data.as_slice());
            }
            other => panic!("wrong variant {:?}", other),
        }
        assert_eq!(wire.to_vec(), write_meta(&event));
    }

    #[test]
    fn text_round_trip() {
        let wire = [0xFFu8, 0x03, 0x06, 0x53, 0x69, 0x6E, 0x67, 0x65, 0x72];
        let event = parse_meta(&wire).unwrap();
        match &event {
            MetaEvent::TrackName(name) => assert_eq!("Singer", name.as_str()),
            other => panic!("wrong variant {:?}", other),
        }
        assert_eq!(wire.to_vec(), write_meta(&event));
    }

    #[test]
    fn key_signature_round_trip() {
        // two flats, minor
        let wire = [0xFFu8, 0x59, 0x02, 0xFE, 0x01];
        let event = parse_meta(&wire).unwrap();
        let key = match &event {
            MetaEvent::KeySignature(value) => value,
            other => panic!("wrong variant {:?}", other),
        };
        assert_eq!(-2, key.accidentals().get());
        assert_eq!(KeyMode::Minor, key.mode());
        assert_eq!(wire.to_vec(), write_meta(&event));
    }

    #[test]
    fn key_signature_bad_mode() {
        let wire = [0xFFu8, 0x59, 0x02, 0x00, 0x02];
        let err = parse_meta(&wire).err().unwrap();
        assert_eq!(ErrorKind::InvalidEvent, err.kind());
    }

    #[test]
    fn smpte_offset_round_trip() {
        let wire = [0xFFu8, 0x54, 0x05, 0x21, 0x00, 0x03, 0x16, 0x00];
        let event = parse_meta(&wire).unwrap();
        let offset = match &event {
            MetaEvent::SmpteOffset(value) => value,
            other => panic!("wrong variant {:?}", other),
        };
        assert_eq!(0x21, offset.hr());
        assert_eq!(0x16, offset.fr());
        assert_eq!(wire.to_vec(), write_meta(&event));
    }

    #[test]
    fn meta_type_high_bit() {
        let wire = [0xFFu8, 0x80, 0x00];
        let err = parse_meta(&wire).err().unwrap();
        assert_eq!(ErrorKind::InvalidEvent, err.kind());
    }

    #[test]
    fn constructed_values_encode() {
        let key = MetaEvent::KeySignature(KeySignatureValue::new(
            KeyAccidentals::new(3),
            KeyMode::Minor,
        ));
        assert_eq!(vec![0xFF, 0x59, 0x02, 0x03, 0x01], write_meta(&key));

        let offset = MetaEvent::SmpteOffset(SmpteOffsetValue::new(1, 2, 3, 4, 5));
        assert_eq!(
            vec![0xFF, 0x54, 0x05, 0x01, 0x02, 0x03, 0x04, 0x05],
            write_meta(&offset)
        );
        let parsed = parse_meta(&write_meta(&offset)).unwrap();
        match parsed {
            MetaEvent::SmpteOffset(value) => {
                assert_eq!(2, value.mn());
                assert_eq!(3, value.se());
                assert_eq!(5, value.ff());
            }
            other => panic!("wrong variant {:?}", other),
        }
    }

    #[test]
    fn time_signature_constructor() {
        use std::convert::TryFrom;
        let denominator = DurationName::try_from(3u8).unwrap();
        let value = TimeSignatureValue::new(6, denominator, Clocks::DottedQuarter).unwrap();
        assert_eq!(6, value.numerator());
        assert_eq!(DurationName::Eighth, value.denominator());
        assert_eq!(Clocks::DottedQuarter, value.click());
        assert!(TimeSignatureValue::new(0, denominator, Clocks::Quarter).is_err());
    }
}
