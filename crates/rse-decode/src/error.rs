//! Error types for decoding operations.

use std::fmt;

/// Errors that can occur while decoding an asset file.
///
/// Every error is fatal to the current file's decode and carries the byte
/// offset at which the failing read started, plus a static context naming
/// the record or field being decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A read ran past the end of the buffer.
    TruncatedInput {
        context: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    /// A declared element count would require more bytes than remain in the
    /// buffer.
    CorruptLength {
        context: &'static str,
        offset: usize,
        declared: usize,
        remaining: usize,
    },
    /// Declared bytes are not valid UTF-8 where text is required.
    CorruptString { context: &'static str, offset: usize },
    /// A decoded list did not match its header-declared count.
    CountMismatch {
        context: &'static str,
        declared: usize,
        actual: usize,
    },
    /// An index references a position outside its owning list.
    IndexOutOfRange {
        context: &'static str,
        index: u32,
        len: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedInput {
                context,
                offset,
                needed,
                remaining,
            } => {
                write!(
                    f,
                    "truncated input in {context} at offset {offset}: needed {needed} bytes, {remaining} remaining"
                )
            }
            Self::CorruptLength {
                context,
                offset,
                declared,
                remaining,
            } => {
                write!(
                    f,
                    "corrupt length in {context} at offset {offset}: declared {declared} bytes with only {remaining} remaining"
                )
            }
            Self::CorruptString { context, offset } => {
                write!(f, "corrupt string in {context} at offset {offset}: not valid UTF-8")
            }
            Self::CountMismatch {
                context,
                declared,
                actual,
            } => {
                write!(
                    f,
                    "count mismatch in {context}: header declared {declared}, decoded {actual}"
                )
            }
            Self::IndexOutOfRange { context, index, len } => {
                write!(
                    f,
                    "index {index} in {context} out of range for list of length {len}"
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
