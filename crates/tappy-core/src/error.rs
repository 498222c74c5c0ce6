use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Payload errors
    #[error("Invalid {message_type} payload: {reason}")]
    InvalidPayload {
        message_type: &'static str,
        reason: String,
    },

    #[error("Message is not a {expected} (family {family}, code {code:#04X})")]
    WrongMessageType {
        expected: &'static str,
        family: String,
        code: u8,
    },

    #[error("Invalid polling mode: {0:#04X}")]
    InvalidPollingMode(u8),

    // Resolution errors
    #[error("Unsupported command type")]
    UnsupportedCommand,

    #[error("Unsupported response type")]
    UnsupportedResponse,
}

impl Error {
    /// Create a payload error for the named message type.
    pub fn invalid_payload(message_type: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message_type,
            reason: reason.into(),
        }
    }

    /// Create a payload-too-short error.
    pub fn truncated(message_type: &'static str, expected: usize, found: usize) -> Self {
        Self::invalid_payload(
            message_type,
            format!("expected at least {expected} bytes, found {found}"),
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
