//! Payload field helpers shared by the family modules.

use tappy_core::constants::ERROR_HEADER_LENGTH;
use tappy_core::{Error, Result};

pub(crate) fn require_len(name: &'static str, payload: &[u8], len: usize) -> Result<()> {
    if payload.len() < len {
        return Err(Error::truncated(name, len, payload.len()));
    }
    Ok(())
}

pub(crate) fn lock_flag(name: &'static str, value: u8) -> Result<bool> {
    match value {
        0x00 => Ok(false),
        0x01 => Ok(true),
        other => Err(Error::invalid_payload(
            name,
            format!("lock flag must be 0 or 1, got {other:#04X}"),
        )),
    }
}

pub(crate) fn utf8(name: &'static str, data: &[u8]) -> Result<String> {
    String::from_utf8(data.to_vec())
        .map_err(|e| Error::invalid_payload(name, format!("invalid UTF-8: {e}")))
}

/// Error header plus message text, as carried by application and system
/// error responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorFields {
    pub error_code: u8,
    pub internal_error_code: u8,
    pub reader_status: u8,
    pub error_message: String,
}

impl ErrorFields {
    pub(crate) fn parse(name: &'static str, payload: &[u8]) -> Result<Self> {
        require_len(name, payload, ERROR_HEADER_LENGTH)?;
        Ok(Self {
            error_code: payload[0],
            internal_error_code: payload[1],
            reader_status: payload[2],
            error_message: utf8(name, &payload[ERROR_HEADER_LENGTH..])?,
        })
    }

    pub(crate) fn encode(
        error_code: u8,
        internal_error_code: u8,
        reader_status: u8,
        error_message: &str,
    ) -> Vec<u8> {
        let mut out = vec![error_code, internal_error_code, reader_status];
        out.extend_from_slice(error_message.as_bytes());
        out
    }
}
