mod utils;

use midi_smf::core::{Channel, Clocks, DurationName, NoteNumber, Velocity};
use midi_smf::file::{Division, Format, QuartersPerMinute, Track};
use midi_smf::MidiFile;
use tempfile::TempDir;
use utils::enable_logging;

// durations
const QUARTER: u32 = 1024;
const EIGHTH: u32 = QUARTER / 2;
const DOTTED_QUARTER: u32 = QUARTER + EIGHTH;

// pitches
const C4: NoteNumber = NoteNumber::new(72);
const D4: NoteNumber = NoteNumber::new(74);
const E4: NoteNumber = NoteNumber::new(76);

// some arbitrary velocity
const V: Velocity = Velocity::new(64);

// channel zero (displayed as channel 1 in any sequencer UI)
const CH: Channel = Channel::new(0);

fn row_your_boat() -> MidiFile {
    let mut mfile = MidiFile::new(Format::Multi, Division::default());

    // set up track metadata
    let mut track = Track::default();
    track.set_name("Singer").unwrap();
    track.set_instrument_name("Alto").unwrap();

    // set time signature and tempo
    track
        .push_time_signature(0, 6, DurationName::Eighth, Clocks::DottedQuarter)
        .unwrap();
    track.push_tempo(0, QuartersPerMinute::new(116)).unwrap();

    // measure 1
    track.push_lyric(0, "Row").unwrap();
    track.push_note_on(0, CH, C4, V).unwrap();
    track.push_note_off(DOTTED_QUARTER, CH, C4, V).unwrap();

    track.push_lyric(0, "row").unwrap();
    track.push_note_on(0, CH, C4, V).unwrap();
    track.push_note_off(DOTTED_QUARTER, CH, C4, V).unwrap();

    // measure 2
    track.push_lyric(0, "row").unwrap();
    track.push_note_on(0, CH, C4, V).unwrap();
    track.push_note_off(QUARTER, CH, C4, V).unwrap();

    track.push_lyric(0, "your").unwrap();
    track.push_note_on(0, CH, D4, V).unwrap();
    track.push_note_off(EIGHTH, CH, D4, V).unwrap();

    track.push_lyric(0, "boat").unwrap();
    track.push_note_on(0, CH, E4, V).unwrap();
    track.push_note_off(DOTTED_QUARTER, CH, E4, V).unwrap();

    // add the track to the file (end-of-track is appended automatically)
    mfile.push_track(track).unwrap();
    mfile
}

const EXPECTED: [u8; 141] = [
    // header: MThd, len 6, format 1, ntracks 1, division 1024
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x01, 0x04, 0x00,
    // track: MTrk, len 119 bytes
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x77, //
    // delta 0, InstrumentName, len 4, "Alto"
    0x00, 0xFF, 0x04, 0x04, 0x41, 0x6C, 0x74, 0x6F, //
    // delta 0, TrackName, len 6, "Singer"
    0x00, 0xFF, 0x03, 0x06, 0x53, 0x69, 0x6E, 0x67, 0x65, 0x72, //
    // delta 0, TimeSignature 6/8, click 32, eight 32nds per quarter
    0x00, 0xFF, 0x58, 0x04, 0x06, 0x03, 0x20, 0x08, //
    // delta 0, SetTempo 517,241 microseconds per quarter (116 bpm)
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xE4, 0x79, //
    // lyric "Row"
    0x00, 0xFF, 0x05, 0x03, 0x52, 0x6F, 0x77, //
    // note on
    0x00, 0x90, 0x48, 0x40, //
    // note off after a dotted quarter
    0x8C, 0x00, 0x80, 0x48, 0x40, //
    // lyric "row"
    0x00, 0xFF, 0x05, 0x03, 0x72, 0x6F, 0x77, //
    0x00, 0x90, 0x48, 0x40, //
    0x8C, 0x00, 0x80, 0x48, 0x40, //
    // lyric "row"
    0x00, 0xFF, 0x05, 0x03, 0x72, 0x6F, 0x77, //
    0x00, 0x90, 0x48, 0x40, //
    // note off after a quarter
    0x88, 0x00, 0x80, 0x48, 0x40, //
    // lyric "your"
    0x00, 0xFF, 0x05, 0x04, 0x79, 0x6F, 0x75, 0x72, //
    0x00, 0x90, 0x4A, 0x40, //
    // note off after an eighth
    0x84, 0x00, 0x80, 0x4A, 0x40, //
    // lyric "boat"
    0x00, 0xFF, 0x05, 0x04, 0x62, 0x6F, 0x61, 0x74, //
    0x00, 0x90, 0x4C, 0x40, //
    0x8C, 0x00, 0x80, 0x4C, 0x40, //
    // end of track
    0x00, 0xFF, 0x2F, 0x00,
];

#[test]
fn song_bytes_are_exact() {
    enable_logging();
    let mfile = row_your_boat();
    let mut bytes: Vec<u8> = Vec::new();
    mfile.write(&mut bytes).unwrap();

    assert_eq!(EXPECTED.len(), bytes.len());
    for (ix, &byte) in bytes.iter().enumerate() {
        let ex = EXPECTED[ix];
        assert_eq!(
            ex, byte,
            "mismatch at byte index {}, expected {:#04X}, got {:#04X}",
            ix, ex, byte
        );
    }
}

#[test]
fn save_and_load() {
    enable_logging();
    let mfile = row_your_boat();
    let td = TempDir::new().unwrap();
    let path = td.path().join("song.mid");
    mfile.save(&path).unwrap();
    let reloaded = MidiFile::load(&path).unwrap();
    assert_eq!(mfile, reloaded);
}
