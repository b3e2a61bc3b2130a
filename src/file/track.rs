use crate::byte_reader::ByteReader;
use crate::core::{
    Channel, Clocks, DurationName, Message, NoteMessage, NoteNumber, PitchBendMessage,
    PitchBendValue, Velocity,
};
use crate::error::LibResult;
use crate::file::{
    Event, MetaEvent, MicrosecondsPerQuarter, QuartersPerMinute, TimeSignatureValue, TrackEvent,
};
use crate::scribe::Scribe;
use crate::Text;
use log::{debug, trace};
use snafu::ResultExt;
use std::convert::TryFrom;
use std::io::Write;

/// A track chunk (type `MTrk`) is a stream of delta-timed events:
///
/// `<Track Chunk> = <chunk type><length><MTrk event>+`
///
/// The last event of a track is always [`MetaEvent::EndOfTrack`]. The parser
/// requires it; the encoder appends one with a delta-time of zero when the
/// event list does not end with one.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Track {
    events: Vec<TrackEvent>,
}

impl Track {
    /// Returns `true` if the track has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The number of events in the track.
    pub fn events_len(&self) -> usize {
        self.events.len()
    }

    /// Iterator over the events in the track.
    pub fn events(&self) -> impl Iterator<Item = &TrackEvent> {
        self.events.iter()
    }

    /// The event at `index`, or `None` if out of range.
    pub fn event(&self, index: usize) -> Option<&TrackEvent> {
        self.events.get(index)
    }

    /// Add an event to the end.
    pub fn push_event(&mut self, delta_time: u32, event: Event) -> crate::Result<()> {
        self.events.push(TrackEvent::new(delta_time, event));
        Ok(())
    }

    /// Add an event at `index` and shift everything after it.
    pub fn insert_event(
        &mut self,
        index: usize,
        delta_time: u32,
        event: Event,
    ) -> crate::Result<()> {
        Ok(self.insert_event_inner(index, delta_time, event)?)
    }

    fn insert_event_inner(
        &mut self,
        index: usize,
        delta_time: u32,
        event: Event,
    ) -> LibResult<()> {
        if index > self.events.len() {
            invalid_arg!(
                "insert index {} is out of range for a track of {} events",
                index,
                self.events.len()
            );
        }
        self.events.insert(index, TrackEvent::new(delta_time, event));
        Ok(())
    }

    /// Replace the event at `index`.
    pub fn replace_event(
        &mut self,
        index: usize,
        delta_time: u32,
        event: Event,
    ) -> crate::Result<()> {
        Ok(self.replace_event_inner(index, delta_time, event)?)
    }

    fn replace_event_inner(
        &mut self,
        index: usize,
        delta_time: u32,
        event: Event,
    ) -> LibResult<()> {
        if index >= self.events.len() {
            invalid_arg!(
                "replace index {} is out of range for a track of {} events",
                index,
                self.events.len()
            );
        }
        self.events[index] = TrackEvent::new(delta_time, event);
        Ok(())
    }

    /// Remove and return the event at `index`, shifting everything after it.
    pub fn remove_event(&mut self, index: usize) -> crate::Result<TrackEvent> {
        Ok(self.remove_event_inner(index)?)
    }

    fn remove_event_inner(&mut self, index: usize) -> LibResult<TrackEvent> {
        if index >= self.events.len() {
            invalid_arg!(
                "remove index {} is out of range for a track of {} events",
                index,
                self.events.len()
            );
        }
        Ok(self.events.remove(index))
    }

    /// Add, or replace, the track name at the beginning of a track.
    pub fn set_name<S: Into<String>>(&mut self, name: S) -> crate::Result<()> {
        let name = Text::new(name);
        let meta = Event::Meta(MetaEvent::TrackName(name.clone()));
        if self.is_empty() {
            return self.push_event(0, meta);
        }
        let existing = self
            .events
            .iter()
            .take_while(|event| event.delta_time() == 0)
            .position(|event| matches!(event.event(), Event::Meta(MetaEvent::TrackName(_))));
        match existing {
            Some(ix) => {
                debug!("changing the track name to '{}'", name);
                self.replace_event(ix, 0, meta)
            }
            None => self.insert_event(0, 0, meta),
        }
    }

    /// Add, or replace, the instrument name at the beginning of a track.
    pub fn set_instrument_name<S: Into<String>>(&mut self, name: S) -> crate::Result<()> {
        let name = Text::new(name);
        let meta = Event::Meta(MetaEvent::InstrumentName(name.clone()));
        if self.is_empty() {
            return self.push_event(0, meta);
        }
        let existing = self
            .events
            .iter()
            .take_while(|event| event.delta_time() == 0)
            .position(|event| matches!(event.event(), Event::Meta(MetaEvent::InstrumentName(_))));
        match existing {
            Some(ix) => {
                debug!("changing the instrument name to '{}'", name);
                self.replace_event(ix, 0, meta)
            }
            None => self.insert_event(0, 0, meta),
        }
    }

    /// Add a time signature.
    pub fn push_time_signature(
        &mut self,
        delta_time: u32,
        numerator: u8,
        denominator: DurationName,
        click: Clocks,
    ) -> crate::Result<()> {
        let time_sig = TimeSignatureValue::new(numerator, denominator, click)?;
        self.push_event(delta_time, Event::Meta(MetaEvent::TimeSignature(time_sig)))
    }

    /// Add a tempo message.
    pub fn push_tempo(
        &mut self,
        delta_time: u32,
        quarters_per_minute: QuartersPerMinute,
    ) -> crate::Result<()> {
        // convert to microseconds per quarter note
        let minutes_per_quarter = 1f64 / f64::from(quarters_per_minute.get());
        let seconds_per_quarter = minutes_per_quarter * 60f64;
        let microseconds_per_quarter = seconds_per_quarter * 1000000f64;
        let value = MicrosecondsPerQuarter::new(microseconds_per_quarter as u32);
        self.push_event(delta_time, Event::Meta(MetaEvent::SetTempo(value)))
    }

    /// Add a note on message.
    pub fn push_note_on(
        &mut self,
        delta_time: u32,
        channel: Channel,
        note_number: NoteNumber,
        velocity: Velocity,
    ) -> crate::Result<()> {
        let note_on = Event::Midi(Message::NoteOn(NoteMessage::new(
            channel,
            note_number,
            velocity,
        )));
        self.push_event(delta_time, note_on)
    }

    /// Add a note off message.
    pub fn push_note_off(
        &mut self,
        delta_time: u32,
        channel: Channel,
        note_number: NoteNumber,
        velocity: Velocity,
    ) -> crate::Result<()> {
        let note_off = Event::Midi(Message::NoteOff(NoteMessage::new(
            channel,
            note_number,
            velocity,
        )));
        self.push_event(delta_time, note_off)
    }

    /// Add a lyric.
    pub fn push_lyric<S: Into<String>>(&mut self, delta_time: u32, lyric: S) -> crate::Result<()> {
        self.push_event(delta_time, Event::Meta(MetaEvent::Lyric(Text::new(lyric))))
    }

    /// Add a pitch bend message.
    pub fn push_pitch_bend(
        &mut self,
        delta_time: u32,
        channel: Channel,
        pitch_bend: PitchBendValue,
    ) -> crate::Result<()> {
        let pitch_bend = Event::Midi(Message::PitchBend(PitchBendMessage::new(
            channel, pitch_bend,
        )));
        self.push_event(delta_time, pitch_bend)
    }

    pub(crate) fn parse(iter: &mut ByteReader<'_>) -> LibResult<Self> {
        iter.expect_tag("MTrk").context(io!())?;
        let chunk_length = iter.read_u32().context(io!())?;
        // the chunk body gets its own cursor, which also guarantees running
        // status never crosses a track boundary
        let mut body = iter.slice(chunk_length as usize).context(io!())?;
        let mut events = Vec::new();
        loop {
            if body.is_end() {
                invalid_event!("end of track chunk reached before an End of Track event");
            }
            let event = TrackEvent::parse(&mut body)?;
            trace!("parsed {:?}", event);
            let is_track_end = event.is_end();
            events.push(event);
            if is_track_end {
                debug!("end of track event");
                if !body.is_end() {
                    invalid_event!("End of Track event before the end of the track chunk");
                }
                break;
            }
        }
        Ok(Self { events })
    }

    pub(crate) fn write<W: Write>(&self, w: &mut Scribe<W>) -> LibResult<()> {
        // serialize the events first so the chunk length is known; the fresh
        // scribe also gives the track its own running status
        let mut track_data: Vec<u8> = Vec::new();
        let mut track_scribe = Scribe::new(&mut track_data, w.running_status_enabled());
        for event in self.events() {
            event.write(&mut track_scribe)?;
        }
        if !self.events.last().map_or(false, TrackEvent::is_end) {
            TrackEvent::new(0, Event::Meta(MetaEvent::EndOfTrack)).write(&mut track_scribe)?;
        }

        w.write_all(b"MTrk").context(wr!())?;
        let track_length = match u32::try_from(track_data.len()) {
            Ok(value) => value,
            Err(_) => out_of_range!(
                "track data of {} bytes exceeds the chunk length maximum",
                track_data.len()
            ),
        };
        w.write_u32(track_length)?;
        w.write_all(&track_data).context(wr!())?;
        Ok(())
    }
}

/// If the last event of the track is *not* an end-of-track event, add one to
/// the back with a delta-time of zero. If the track already ends with one,
/// nothing happens.
pub(crate) fn ensure_end_of_track(mut track: Track) -> LibResult<Track> {
    if !track.events.last().map_or(false, TrackEvent::is_end) {
        track
            .events
            .push(TrackEvent::new(0, Event::Meta(MetaEvent::EndOfTrack)));
    }
    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn write_track(track: &Track, running_status: bool) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        let mut scribe = Scribe::new(&mut bytes, running_status);
        track.write(&mut scribe).unwrap();
        bytes
    }

    #[test]
    fn empty_track_writes_end_of_track() {
        // MTrk, length 4, then `00 FF 2F 00`
        let bytes = write_track(&Track::default(), true);
        assert_eq!(
            vec![0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, 0x00, 0xFF, 0x2F, 0x00],
            bytes
        );
    }

    #[test]
    fn running_status_shortens_output() {
        let mut track = Track::default();
        let ch = Channel::new(0);
        let note = NoteNumber::new(60);
        track.push_note_on(0, ch, note, Velocity::new(64)).unwrap();
        track.push_note_off(96, ch, note, Velocity::new(0)).unwrap();
        track.push_note_off(0, ch, note, Velocity::new(0)).unwrap();
        let with = write_track(&track, true);
        let without = write_track(&track, false);
        assert!(with.len() < without.len());

        // both decode to the same events
        let mut with_iter = ByteReader::new(&with);
        let mut without_iter = ByteReader::new(&without);
        let a = Track::parse(&mut with_iter).unwrap();
        let b = Track::parse(&mut without_iter).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_requires_end_of_track() {
        // a track chunk holding only a note-on
        let bytes = [
            0x4Du8, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, 0x00, 0x90, 0x3C, 0x40,
        ];
        let mut iter = ByteReader::new(&bytes);
        let result = Track::parse(&mut iter);
        assert!(result.is_err());
        assert_eq!(ErrorKind::InvalidEvent, result.err().unwrap().kind());
    }

    #[test]
    fn parse_rejects_early_end_of_track() {
        // end-of-track followed by a trailing byte inside the chunk
        let bytes = [
            0x4Du8, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x05, 0x00, 0xFF, 0x2F, 0x00, 0x00,
        ];
        let mut iter = ByteReader::new(&bytes);
        let result = Track::parse(&mut iter);
        assert!(result.is_err());
        assert_eq!(ErrorKind::InvalidEvent, result.err().unwrap().kind());
    }

    #[test]
    fn oversized_delta_fails_encode() {
        let mut track = Track::default();
        track
            .push_event(0x1000_0000, Event::Meta(MetaEvent::EndOfTrack))
            .unwrap();
        let mut bytes: Vec<u8> = Vec::new();
        let mut scribe = Scribe::new(&mut bytes, true);
        let err = track.write(&mut scribe).err().unwrap();
        assert_eq!(ErrorKind::Encode, err.kind());
    }

    #[test]
    fn event_mutations() {
        let mut track = Track::default();
        track.push_event(0, Event::Meta(MetaEvent::EndOfTrack)).unwrap();
        track
            .insert_event(0, 0, Event::Meta(MetaEvent::TrackName(Text::new("One"))))
            .unwrap();
        assert_eq!(2, track.events_len());
        track
            .replace_event(0, 0, Event::Meta(MetaEvent::TrackName(Text::new("Two"))))
            .unwrap();
        match track.event(0).unwrap().event() {
            Event::Meta(MetaEvent::TrackName(name)) => assert_eq!("Two", name.as_str()),
            other => panic!("wrong event {:?}", other),
        }
        let removed = track.remove_event(0).unwrap();
        assert!(matches!(
            removed.event(),
            Event::Meta(MetaEvent::TrackName(_))
        ));
        assert_eq!(1, track.events_len());
        let err = track.remove_event(5).err().unwrap();
        assert_eq!(ErrorKind::InvalidArgument, err.kind());
    }
}
