use std::{fmt, io};

/// Errors reported by file operations.
///
/// The first four variants are the diagnostic outcomes of [`File::open`],
/// reported in that priority order; `Io` carries every other OS-level
/// failure unmodified.
///
/// [`File::open`]: crate::File::open
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    AlreadyExists(String),
    NotWritable(String),
    NotReadable(String),
    InvalidMode(String),
    Io { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::AlreadyExists(path) => write!(f, "file already exists: {path}"),
            Error::NotWritable(path) => write!(f, "file is not writable: {path}"),
            Error::NotReadable(path) => write!(f, "file is not readable: {path}"),
            Error::InvalidMode(mode) => write!(f, "invalid mode for opening file: {mode}"),
            Error::Io { reason } => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io {
            reason: err.to_string(),
        }
    }
}
