use std::{io, num::TryFromIntError, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("code point {0} not found in font stack")]
    UnresolvedCodepoint(u32),
    #[error("Couldn't load font source {}: {reason}", .path.display())]
    SourceLoad { path: PathBuf, reason: String },
    #[error("Couldn't compress the glyph for code point {code_point:#X}")]
    Compression {
        code_point: u32,
        #[source]
        source: io::Error,
    },
    #[error("Invalid code point intervals: {0}")]
    InvalidIntervals(String),
    #[error("{0:?} is not a valid C identifier")]
    InvalidName(String),
    #[error("A glyph value overflowed its field in the driver structure")]
    Overflow(#[from] TryFromIntError),
    #[error("Couldn't read config file {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AtlasResult<T> = std::result::Result<T, AtlasError>;
