//! Error types for IEPG parsing.
//!
//! Framing and body decoding failures are hard errors returned from
//! [`crate::parse`]. Problems with individual header fields never surface
//! here unless the caller asks for strict validation, in which case they are
//! reported as [`FieldError`].

use thiserror::Error;

/// Result alias used by the parser.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Error returned when an IEPG stream cannot be turned into a [`crate::Record`].
#[derive(Error, Debug)]
pub enum ParseError {
    /// The header block could not be tokenized or the stream could not be read.
    #[error("IEPG framing error: {0}")]
    Framing(#[from] FramingError),

    /// The body is not valid SHIFT-JIS.
    ///
    /// `offset` is the position of the first malformed byte sequence,
    /// counted from the start of the body.
    #[error("IEPG body is not valid SHIFT-JIS (malformed sequence at byte {offset})")]
    BodyDecode { offset: usize },

    /// Strict time validation was enabled and a time field could not be derived.
    #[error("IEPG field validation failed: {0}")]
    InvalidField(#[from] FieldError),
}

/// Failure while reading the MIME-style header block.
#[derive(Error, Debug)]
pub enum FramingError {
    /// The stream ended before the blank line separating header and body.
    #[error("stream ended before the header/body separator")]
    UnexpectedEof,

    /// A folded line (leading space or tab) appeared before any field.
    #[error("line {line}: continuation line with no preceding field")]
    OrphanContinuation { line: usize },

    /// A header line has no colon, an empty name, or whitespace in its name.
    #[error("line {line}: malformed header line {content:?}")]
    MalformedLine { line: usize, content: String },

    /// The header block is larger than the configured limit.
    #[error("header block exceeds {limit} bytes")]
    HeaderTooLarge { limit: usize },

    /// The underlying reader failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason a time field could not be derived in strict mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field is absent or carries no values.
    #[error("missing header field {field}")]
    Missing { field: String },

    /// The first value of an integer field is not a decimal integer.
    #[error("header field {field} is not an integer: {value:?}")]
    NotInteger { field: String, value: String },

    /// The assembled date-time string does not match `YYYY/M/D HH:MM`.
    #[error("invalid date-time {value:?}")]
    InvalidDateTime { value: String },
}
