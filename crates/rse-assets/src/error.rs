//! Error types for the asset loading layer.

use std::fmt;
use std::path::PathBuf;

use rse_decode::DecodeError;

/// Result type for asset loading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading an asset file.
#[derive(Debug)]
pub enum Error {
    /// Reading the file from disk failed.
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The error message.
        message: String,
    },
    /// Decoding the file contents failed.
    Decode {
        /// The file that failed to decode.
        path: PathBuf,
        /// The underlying decode error.
        source: DecodeError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, message } => {
                write!(f, "failed to read {}: {message}", path.display())
            }
            Error::Decode { path, source } => {
                write!(f, "failed to decode {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode { source, .. } => Some(source),
            Error::Io { .. } => None,
        }
    }
}
