use snafu::Snafu;
use std::path::PathBuf;

/// The public Error type for this library.
#[derive(Debug, Snafu)]
pub struct Error(LibError);

impl Error {
    /// The broad category of the error, for callers that dispatch on failure
    /// mode (e.g. "this is not a MIDI file at all" vs "this MIDI file is
    /// corrupt").
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }
}

/// The broad categories of failure. Every [`Error`] maps to exactly one kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A structural problem was found while decoding: a bad chunk tag, a
    /// truncated chunk, an unexpected byte, or a variable-length quantity
    /// with no terminator.
    Parse,
    /// The input does not begin with an `MThd` chunk and is probably not a
    /// Standard MIDI File.
    NotMidi,
    /// The bytes were well-formed but described an impossible event, e.g.
    /// running status with no prior status, or a meta event whose payload
    /// length does not match its type.
    InvalidEvent,
    /// The library was used incorrectly, e.g. removing a track that does not
    /// exist, or a header field outside its allowed values.
    InvalidArgument,
    /// A valid MIDI construct that this library does not handle, e.g. a
    /// system realtime status byte inside a track.
    NotSupported,
    /// A value was out of range during encoding, or the sink failed.
    Encode,
    /// A file could not be opened or created.
    Io,
}

/// The public Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// The internal Result type for this library.
pub(crate) type LibResult<T> = std::result::Result<T, LibError>;

/// The internal Error type for this library.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub(crate) enum LibError {
    #[snafu(display("{}: error while reading bytes: {}", site, source))]
    Io {
        site: String,
        source: crate::byte_reader::ByteError,
    },

    #[snafu(display("{}: the MIDI file is malformed: {}", site, description))]
    InvalidFile { site: String, description: String },

    #[snafu(display(
        "{}: the first chunk is not 'MThd', this is probably not a MIDI file",
        site
    ))]
    NotMidi { site: String },

    #[snafu(display("{}: invalid event: {}", site, description))]
    InvalidEvent { site: String, description: String },

    #[snafu(display("{}: invalid argument: {}", site, description))]
    InvalidArgument { site: String, description: String },

    #[snafu(display("{}: not supported: {}", site, description))]
    NotSupported { site: String, description: String },

    #[snafu(display("{}: error while writing bytes: {}", site, source))]
    Write {
        site: String,
        source: std::io::Error,
    },

    #[snafu(display("{}: value out of range during encoding: {}", site, description))]
    Range { site: String, description: String },

    #[snafu(display("{}: error while reading the input: {}", site, source))]
    ReadInput {
        site: String,
        source: std::io::Error,
    },

    #[snafu(display("unable to open '{}': {}", path.display(), source))]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("unable to create '{}': {}", path.display(), source))]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LibError {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            LibError::Io { .. } => ErrorKind::Parse,
            LibError::InvalidFile { .. } => ErrorKind::Parse,
            LibError::NotMidi { .. } => ErrorKind::NotMidi,
            LibError::InvalidEvent { .. } => ErrorKind::InvalidEvent,
            LibError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            LibError::NotSupported { .. } => ErrorKind::NotSupported,
            LibError::Write { .. } => ErrorKind::Encode,
            LibError::Range { .. } => ErrorKind::Encode,
            LibError::ReadInput { .. } => ErrorKind::Io,
            LibError::FileOpen { .. } => ErrorKind::Io,
            LibError::FileCreate { .. } => ErrorKind::Io,
        }
    }
}

macro_rules! site {
    () => {
        format!("{}:{}", file!(), line!())
    };
}

macro_rules! io {
    () => {
        crate::error::IoSnafu { site: site!() }
    };
}

macro_rules! wr {
    () => {
        crate::error::WriteSnafu { site: site!() }
    };
}

macro_rules! invalid_file_s {
    ($msg:expr) => {
        crate::error::InvalidFileSnafu {
            site: site!(),
            description: String::from($msg),
        }
    };
    ($fmt:expr, $($arg:expr),+) => {
        crate::error::InvalidFileSnafu {
            site: site!(),
            description: format!($fmt, $($arg),+),
        }
    };
}

macro_rules! invalid_file {
    ($msg:expr) => {
        return Err(invalid_file_s!($msg).build())
    };
    ($fmt:expr, $($arg:expr),+) => {
        return Err(invalid_file_s!($fmt, $($arg),+).build())
    };
}

macro_rules! invalid_event_s {
    ($msg:expr) => {
        crate::error::InvalidEventSnafu {
            site: site!(),
            description: String::from($msg),
        }
    };
    ($fmt:expr, $($arg:expr),+) => {
        crate::error::InvalidEventSnafu {
            site: site!(),
            description: format!($fmt, $($arg),+),
        }
    };
}

macro_rules! invalid_event {
    ($msg:expr) => {
        return Err(invalid_event_s!($msg).build())
    };
    ($fmt:expr, $($arg:expr),+) => {
        return Err(invalid_event_s!($fmt, $($arg),+).build())
    };
}

macro_rules! invalid_arg {
    ($msg:expr) => {
        return Err(crate::error::InvalidArgumentSnafu {
            site: site!(),
            description: String::from($msg),
        }
        .build())
    };
    ($fmt:expr, $($arg:expr),+) => {
        return Err(crate::error::InvalidArgumentSnafu {
            site: site!(),
            description: format!($fmt, $($arg),+),
        }
        .build())
    };
}

macro_rules! not_supported {
    ($msg:expr) => {
        return Err(crate::error::NotSupportedSnafu {
            site: site!(),
            description: String::from($msg),
        }
        .build())
    };
    ($fmt:expr, $($arg:expr),+) => {
        return Err(crate::error::NotSupportedSnafu {
            site: site!(),
            description: format!($fmt, $($arg),+),
        }
        .build())
    };
}

macro_rules! out_of_range {
    ($msg:expr) => {
        return Err(crate::error::RangeSnafu {
            site: site!(),
            description: String::from($msg),
        }
        .build())
    };
    ($fmt:expr, $($arg:expr),+) => {
        return Err(crate::error::RangeSnafu {
            site: site!(),
            description: format!($fmt, $($arg),+),
        }
        .build())
    };
}

#[test]
fn site_test() {
    let line = line!() + 1;
    let site = site!();
    assert!(site.contains("error.rs"));
    assert!(site.contains(format!("{}", line).as_str()));
}

#[test]
fn invalid_file_macro_test() {
    fn foo() -> LibResult<u64> {
        invalid_file!("hello {}, {}", "world", String::from("foo"));
    }
    let result = foo();
    assert!(result.is_err());
    let e = result.err().unwrap();
    assert_eq!(ErrorKind::Parse, e.kind());
    let message = format!("{}", e);
    assert!(message.as_str().contains("hello world, foo"));
}

#[test]
fn invalid_event_macro_test() {
    fn foo() -> LibResult<u64> {
        invalid_event!("status {:#04X}", 0xF4u8);
    }
    let result = foo();
    assert!(result.is_err());
    let e = result.err().unwrap();
    assert_eq!(ErrorKind::InvalidEvent, e.kind());
    let message = format!("{}", e);
    assert!(message.as_str().contains("0xF4"));
}

#[test]
fn error_kind_test() {
    fn foo() -> LibResult<()> {
        invalid_arg!("no such track");
    }
    let public: Error = foo().err().unwrap().into();
    assert_eq!(ErrorKind::InvalidArgument, public.kind());
}
