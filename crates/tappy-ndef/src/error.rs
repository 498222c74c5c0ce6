//! Error types for NDEF parsing.

/// Result type alias for NDEF operations.
pub type Result<T> = std::result::Result<T, NdefError>;

/// Errors raised while decoding NDEF data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NdefError {
    /// No bytes to parse.
    #[error("NDEF message is empty")]
    Empty,

    /// Input ended in the middle of a record.
    #[error("NDEF record truncated at offset {offset}: needed {needed} more bytes")]
    Truncated { offset: usize, needed: usize },

    /// First record does not carry the message-begin flag.
    #[error("First NDEF record is missing the message begin flag")]
    MissingMessageBegin,

    /// A record after the first carries the message-begin flag.
    #[error("Unexpected message begin flag on record {index}")]
    UnexpectedMessageBegin { index: usize },

    /// Bytes remain after the record carrying the message-end flag.
    #[error("{count} trailing bytes after NDEF message end")]
    TrailingData { count: usize },

    /// Chunked records are not supported.
    #[error("Chunked NDEF records are not supported")]
    ChunkedUnsupported,

    /// Record header contradicts its TNF.
    #[error("Invalid NDEF record: {message}")]
    InvalidRecord { message: String },

    /// Record is not of the requested well-known type.
    #[error("Record is not a well-known {expected} record")]
    WrongRecordType { expected: &'static str },

    /// Text payload could not be decoded.
    #[error("Invalid text encoding: {message}")]
    InvalidEncoding { message: String },

    /// A record field is longer than its length field can express.
    #[error("NDEF record {field} is too long to encode: {len} bytes")]
    FieldTooLong { field: &'static str, len: usize },
}

impl NdefError {
    /// Create a new invalid record error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Create a new invalid encoding error.
    pub fn invalid_encoding(message: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            message: message.into(),
        }
    }
}
