//! Types shared between drivers and their consumers.

use crate::error::DriverError;
use bytes::Bytes;
use serde::Serialize;
use std::fmt;
use tappy_core::constants::{
    ERROR_CONNECTION, ERROR_INVALID_HDLC, ERROR_INVALID_TCMP, ERROR_NOT_CONNECTED,
};
use tappy_core::to_hex;

/// Outcome passed to connect and disconnect callbacks.
pub type ConnectionResult = std::result::Result<(), DriverError>;

/// Class of a runtime driver error, as reported to the error listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverErrorType {
    /// A message was sent while disconnected.
    NotConnected,
    /// The transport failed.
    ConnectionError,
    /// A frame failed HDLC decoding or its CRC check.
    InvalidHdlc,
    /// A frame held no valid TCMP packet.
    InvalidTcmp,
    /// Driver-specific code outside the standard set.
    Unknown(u8),
}

impl DriverErrorType {
    pub fn from_code(code: u8) -> Self {
        match code {
            ERROR_NOT_CONNECTED => Self::NotConnected,
            ERROR_CONNECTION => Self::ConnectionError,
            ERROR_INVALID_HDLC => Self::InvalidHdlc,
            ERROR_INVALID_TCMP => Self::InvalidTcmp,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::NotConnected => ERROR_NOT_CONNECTED,
            Self::ConnectionError => ERROR_CONNECTION,
            Self::InvalidHdlc => ERROR_INVALID_HDLC,
            Self::InvalidTcmp => ERROR_INVALID_TCMP,
            Self::Unknown(code) => code,
        }
    }
}

impl From<u8> for DriverErrorType {
    fn from(code: u8) -> Self {
        Self::from_code(code)
    }
}

/// Extra information a driver attaches to a runtime error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ErrorData {
    #[default]
    None,
    Text(String),
    /// Raw bytes, usually the offending frame.
    Bytes(Bytes),
}

impl fmt::Display for ErrorData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorData::None => Ok(()),
            ErrorData::Text(text) => f.write_str(text),
            ErrorData::Bytes(bytes) => f.write_str(&to_hex(bytes)),
        }
    }
}

impl From<&str> for ErrorData {
    fn from(text: &str) -> Self {
        ErrorData::Text(text.to_string())
    }
}

impl From<String> for ErrorData {
    fn from(text: String) -> Self {
        ErrorData::Text(text)
    }
}

impl From<Bytes> for ErrorData {
    fn from(bytes: Bytes) -> Self {
        ErrorData::Bytes(bytes)
    }
}
