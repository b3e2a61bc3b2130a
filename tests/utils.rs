#![allow(dead_code)]

use log::LevelFilter;
use std::sync::Once;

static LOGGER: Once = Once::new();

pub fn enable_logging() {
    LOGGER.call_once(logger_init)
}

fn logger_init() {
    env_logger::Builder::new()
        .filter(None, LevelFilter::Warn)
        .init();
}

/// The smallest interesting file: format 1, one track, division 96, and a
/// track holding only an end-of-track event.
pub const MINIMAL_FILE: [u8; 26] = [
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd, length 6
    0x00, 0x01, 0x00, 0x01, 0x00, 0x60, // format 1, 1 track, division 96
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, // MTrk, length 4
    0x00, 0xFF, 0x2F, 0x00, // delta 0, end of track
];

/// `MThd` and its six body bytes.
pub fn header_chunk(format: u16, ntracks: u16, division: u16) -> Vec<u8> {
    let mut bytes = b"MThd".to_vec();
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&format.to_be_bytes());
    bytes.extend_from_slice(&ntracks.to_be_bytes());
    bytes.extend_from_slice(&division.to_be_bytes());
    bytes
}

/// `MTrk`, the length of `body`, then `body`.
pub fn track_chunk(body: &[u8]) -> Vec<u8> {
    let mut bytes = b"MTrk".to_vec();
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

/// A whole file from track bodies.
pub fn file_bytes(format: u16, division: u16, track_bodies: &[&[u8]]) -> Vec<u8> {
    let mut bytes = header_chunk(format, track_bodies.len() as u16, division);
    for body in track_bodies {
        bytes.extend_from_slice(&track_chunk(body));
    }
    bytes
}
