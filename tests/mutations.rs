mod utils;

use midi_smf::core::{Message, NoteMessage};
use midi_smf::file::{Division, Event, Format, MetaEvent, Track};
use midi_smf::{ErrorKind, MidiFile};
use utils::{enable_logging, file_bytes, track_chunk, MINIMAL_FILE};

#[test]
fn add_track_updates_track_count() {
    enable_logging();
    let mut mfile = MidiFile::parse(&MINIMAL_FILE).unwrap();
    assert_eq!(1, mfile.tracks_len());

    let mut track = Track::default();
    track
        .push_event(
            0,
            Event::Midi(Message::NoteOn(NoteMessage::new(
                1.into(),
                69.into(),
                100.into(),
            ))),
        )
        .unwrap();
    track.push_event(480, Event::Meta(MetaEvent::EndOfTrack)).unwrap();
    mfile.push_track(track).unwrap();
    assert_eq!(2, mfile.tracks_len());

    // the header's track count reflects the mutation and the new chunk
    // follows the original
    let new_body = [0x00u8, 0x91, 0x45, 0x64, 0x83, 0x60, 0xFF, 0x2F, 0x00];
    let expected = {
        let mut bytes = file_bytes(1, 96, &[&[0x00, 0xFF, 0x2F, 0x00]]);
        bytes.extend_from_slice(&track_chunk(&new_body));
        bytes[11] = 2; // declared track count
        bytes
    };
    let mut written: Vec<u8> = Vec::new();
    mfile.write(&mut written).unwrap();
    assert_eq!(expected, written);
}

#[test]
fn insert_track_order() {
    enable_logging();
    let mut mfile = MidiFile::new(Format::Multi, Division::default());
    let mut first = Track::default();
    first.set_name("one").unwrap();
    let mut second = Track::default();
    second.set_name("two").unwrap();
    mfile.push_track(first).unwrap();
    mfile.insert_track(0, second).unwrap();

    let name_of = |track: &Track| match track.event(0).unwrap().event() {
        Event::Meta(MetaEvent::TrackName(name)) => name.to_string(),
        other => panic!("wrong event {:?}", other),
    };
    assert_eq!("two", name_of(mfile.track(0).unwrap()));
    assert_eq!("one", name_of(mfile.track(1).unwrap()));
}

#[test]
fn remove_track() {
    enable_logging();
    let mut mfile = MidiFile::parse(&MINIMAL_FILE).unwrap();
    let removed = mfile.remove_track(0).unwrap();
    assert_eq!(1, removed.events_len());
    assert_eq!(0, mfile.tracks_len());

    let err = mfile.remove_track(0).err().unwrap();
    assert_eq!(ErrorKind::InvalidArgument, err.kind());
    let err = mfile.pop_track().err().unwrap();
    assert_eq!(ErrorKind::InvalidArgument, err.kind());
}

#[test]
fn pop_track_removes_last() {
    enable_logging();
    let mut mfile = MidiFile::new(Format::Multi, Division::default());
    let mut first = Track::default();
    first.set_name("one").unwrap();
    let mut second = Track::default();
    second.set_name("two").unwrap();
    mfile.push_track(first).unwrap();
    mfile.push_track(second).unwrap();
    let popped = mfile.pop_track().unwrap();
    match popped.event(0).unwrap().event() {
        Event::Meta(MetaEvent::TrackName(name)) => assert_eq!("two", name.as_str()),
        other => panic!("wrong event {:?}", other),
    }
    assert_eq!(1, mfile.tracks_len());
}

#[test]
fn format_zero_allows_only_one_track() {
    enable_logging();
    let mut mfile = MidiFile::new(Format::Single, Division::default());
    mfile.push_track(Track::default()).unwrap();
    let err = mfile.push_track(Track::default()).err().unwrap();
    assert_eq!(ErrorKind::InvalidArgument, err.kind());
}

#[test]
fn format_zero_with_no_tracks_does_not_encode() {
    enable_logging();
    let mfile = MidiFile::new(Format::Single, Division::default());
    let mut written: Vec<u8> = Vec::new();
    let err = mfile.write(&mut written).err().unwrap();
    assert_eq!(ErrorKind::InvalidArgument, err.kind());
}

#[test]
fn end_of_track_is_appended_on_push() {
    enable_logging();
    let mut mfile = MidiFile::new(Format::Multi, Division::default());
    let mut track = Track::default();
    track
        .push_event(
            0,
            Event::Midi(Message::NoteOn(NoteMessage::new(
                0.into(),
                60.into(),
                64.into(),
            ))),
        )
        .unwrap();
    mfile.push_track(track).unwrap();
    let track = mfile.track(0).unwrap();
    assert_eq!(2, track.events_len());
    assert_eq!(
        &Event::Meta(MetaEvent::EndOfTrack),
        track.event(1).unwrap().event()
    );
}

#[test]
fn out_of_range_arguments_are_rejected() {
    use midi_smf::core::{Channel, Velocity};
    use midi_smf::file::QuarterNoteDivision;
    let err = Channel::try_new(16).err().unwrap();
    assert_eq!(ErrorKind::InvalidArgument, err.kind());
    assert!(Velocity::try_new(128).is_err());
    assert!(QuarterNoteDivision::try_new(0).is_err());
    assert!(QuarterNoteDivision::try_new(32768).is_err());
    assert_eq!(96, QuarterNoteDivision::try_new(96).unwrap().get());
}

#[test]
fn mutate_events_through_file() {
    enable_logging();
    let mut mfile = MidiFile::parse(&MINIMAL_FILE).unwrap();
    let track = mfile.track_mut(0).unwrap();
    track
        .insert_event(
            0,
            0,
            Event::Midi(Message::NoteOn(NoteMessage::new(
                0.into(),
                60.into(),
                64.into(),
            ))),
        )
        .unwrap();
    assert_eq!(2, mfile.track(0).unwrap().events_len());

    let mut written: Vec<u8> = Vec::new();
    mfile.write(&mut written).unwrap();
    let reloaded = MidiFile::parse(&written).unwrap();
    assert_eq!(mfile, reloaded);
}
