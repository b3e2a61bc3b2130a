//! The MIDI file spec recommends, but does not require, ASCII for the text
//! family of meta events. We parse text as UTF-8 when possible and fall back
//! to holding the raw bytes otherwise, so that files with unknown text
//! encodings still round-trip byte-for-byte.

use log::warn;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// The payload of a text-family meta event.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum Text {
    /// A UTF-8 encoded string.
    Utf8(String),
    /// Bytes that are not valid UTF-8, probably a string in some legacy
    /// encoding. Held verbatim.
    Other(Vec<u8>),
}

impl Default for Text {
    fn default() -> Self {
        Text::Utf8(String::new())
    }
}

impl Text {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Text::Utf8(s.into())
    }

    /// The bytes that will be written to the file.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Text::Utf8(s) => s.as_bytes(),
            Text::Other(b) => b.as_slice(),
        }
    }

    /// Lossy when the bytes are not UTF-8.
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Text::Utf8(s) => Cow::Borrowed(s.as_str()),
            Text::Other(b) => String::from_utf8_lossy(b),
        }
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Text::Utf8(s) => Display::fmt(s, f),
            Text::Other(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

impl From<Vec<u8>> for Text {
    fn from(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(s) => Text::Utf8(s),
            Err(e) => {
                warn!("non UTF-8 text encountered, holding raw bytes");
                Text::Other(e.into_bytes())
            }
        }
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::Utf8(s)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::Utf8(s.into())
    }
}

/// Lossy when the `Text` is not UTF-8 encoded.
impl From<Text> for String {
    fn from(t: Text) -> Self {
        match t {
            Text::Utf8(s) => s,
            Text::Other(b) => String::from_utf8_lossy(&b).into(),
        }
    }
}

#[test]
fn non_utf8_round_trips() {
    let bytes = vec![0xC2u8, 0x00, 0xFF];
    let text: Text = bytes.clone().into();
    assert!(matches!(text, Text::Other(_)));
    assert_eq!(bytes.as_slice(), text.as_bytes());
}

#[test]
fn utf8_text() {
    let text: Text = "Singer".into();
    assert_eq!("Singer", text.as_str());
    assert_eq!(b"Singer", text.as_bytes());
}
