//! Basic NFC command family (`00 01`).
//!
//! Tag detection, NDEF reading and writing, and tag locking.
//!
//! # Scanning
//!
//! Scan commands take a timeout in seconds ([`NO_TIMEOUT`] scans until
//! stopped) and a [`PollingMode`]. The `Stream*` variants keep reporting tags
//! until the timeout elapses or [`Stop`] is sent; the `Scan*` variants stop
//! after the first tag.
//!
//! ```
//! use tappy_protocol::TypedMessage;
//! use tappy_protocol::basic_nfc::{PollingMode, StreamTags};
//!
//! let command = StreamTags::new(0, PollingMode::General);
//! assert_eq!(command.to_message().payload().as_ref(), &[0x00, 0x01]);
//! ```
//!
//! [`NO_TIMEOUT`]: tappy_core::constants::NO_TIMEOUT

mod commands;
mod responses;

pub use commands::*;
pub use responses::*;

use crate::family::{Command, FamilyResolver, Response};
use crate::message::{TcmpMessage, TypedMessage};
use bytes::Bytes;
use tappy_core::{CommandFamily, Error, Result, TagType};
use tracing::trace;

/// Command and response codes of the basic NFC family.
pub mod codes {
    // Commands
    pub const STOP: u8 = 0x00;
    pub const STREAM_TAGS: u8 = 0x01;
    pub const SCAN_TAG: u8 = 0x02;
    pub const STREAM_NDEF: u8 = 0x03;
    pub const SCAN_NDEF: u8 = 0x04;
    pub const WRITE_NDEF_URI: u8 = 0x05;
    pub const WRITE_NDEF_TEXT: u8 = 0x06;
    pub const WRITE_NDEF_CUSTOM: u8 = 0x07;
    pub const LOCK_TAG: u8 = 0x08;
    pub const GET_LIBRARY_VERSION: u8 = 0xFF;

    // Responses
    pub const TAG_FOUND: u8 = 0x01;
    pub const NDEF_FOUND: u8 = 0x02;
    pub const SCAN_TIMEOUT: u8 = 0x03;
    pub const LIBRARY_VERSION: u8 = 0x04;
    pub const TAG_WRITTEN: u8 = 0x05;
    pub const TAG_LOCKED: u8 = 0x06;
    pub const APPLICATION_ERROR: u8 = 0x7F;
}

/// Which tag technologies the reader polls for while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PollingMode {
    /// Every supported technology except Type 1.
    #[default]
    General = 0x01,
    /// NFC Forum Type 1 tags only.
    Type1 = 0x02,
}

impl PollingMode {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PollingMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x01 => Ok(PollingMode::General),
            0x02 => Ok(PollingMode::Type1),
            other => Err(Error::InvalidPollingMode(other)),
        }
    }
}

/// Responses that report a tag by type and UID.
pub trait TagResponse {
    /// Raw tag type code reported by the reader.
    fn tag_type(&self) -> u8;

    /// Tag UID.
    fn tag_code(&self) -> &Bytes;

    /// Tag type metadata for [`TagResponse::tag_type`].
    fn resolved_tag_type(&self) -> TagType {
        TagType::resolve(self.tag_type())
    }
}

/// Typed basic NFC command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasicNfcCommand {
    Stop(Stop),
    StreamTags(StreamTags),
    ScanTag(ScanTag),
    StreamNdef(StreamNdef),
    ScanNdef(ScanNdef),
    WriteNdefUri(WriteNdefUri),
    WriteNdefText(WriteNdefText),
    WriteNdefCustom(WriteNdefCustom),
    LockTag(LockTag),
    GetLibraryVersion(GetLibraryVersion),
}

impl BasicNfcCommand {
    pub fn to_message(&self) -> TcmpMessage {
        match self {
            BasicNfcCommand::Stop(c) => c.to_message(),
            BasicNfcCommand::StreamTags(c) => c.to_message(),
            BasicNfcCommand::ScanTag(c) => c.to_message(),
            BasicNfcCommand::StreamNdef(c) => c.to_message(),
            BasicNfcCommand::ScanNdef(c) => c.to_message(),
            BasicNfcCommand::WriteNdefUri(c) => c.to_message(),
            BasicNfcCommand::WriteNdefText(c) => c.to_message(),
            BasicNfcCommand::WriteNdefCustom(c) => c.to_message(),
            BasicNfcCommand::LockTag(c) => c.to_message(),
            BasicNfcCommand::GetLibraryVersion(c) => c.to_message(),
        }
    }
}

/// Typed basic NFC response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasicNfcResponse {
    TagFound(TagFound),
    NdefFound(NdefFound),
    ScanTimeout(ScanTimeout),
    LibraryVersion(LibraryVersion),
    TagWritten(TagWritten),
    TagLocked(TagLocked),
    ApplicationError(ApplicationError),
}

impl BasicNfcResponse {
    pub fn to_message(&self) -> TcmpMessage {
        match self {
            BasicNfcResponse::TagFound(r) => r.to_message(),
            BasicNfcResponse::NdefFound(r) => r.to_message(),
            BasicNfcResponse::ScanTimeout(r) => r.to_message(),
            BasicNfcResponse::LibraryVersion(r) => r.to_message(),
            BasicNfcResponse::TagWritten(r) => r.to_message(),
            BasicNfcResponse::TagLocked(r) => r.to_message(),
            BasicNfcResponse::ApplicationError(r) => r.to_message(),
        }
    }
}

/// Resolver for the basic NFC family.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicNfcResolver;

impl FamilyResolver for BasicNfcResolver {
    fn family(&self) -> CommandFamily {
        CommandFamily::BASIC_NFC
    }

    fn resolve_command(&self, message: &TcmpMessage) -> Result<Command> {
        if !self.check_family(message) {
            return Err(Error::UnsupportedCommand);
        }
        let payload = message.payload();
        let command = match message.command_code() {
            codes::STOP => BasicNfcCommand::Stop(Stop::parse_payload(payload)?),
            codes::STREAM_TAGS => BasicNfcCommand::StreamTags(StreamTags::parse_payload(payload)?),
            codes::SCAN_TAG => BasicNfcCommand::ScanTag(ScanTag::parse_payload(payload)?),
            codes::STREAM_NDEF => BasicNfcCommand::StreamNdef(StreamNdef::parse_payload(payload)?),
            codes::SCAN_NDEF => BasicNfcCommand::ScanNdef(ScanNdef::parse_payload(payload)?),
            codes::WRITE_NDEF_URI => {
                BasicNfcCommand::WriteNdefUri(WriteNdefUri::parse_payload(payload)?)
            }
            codes::WRITE_NDEF_TEXT => {
                BasicNfcCommand::WriteNdefText(WriteNdefText::parse_payload(payload)?)
            }
            codes::WRITE_NDEF_CUSTOM => {
                BasicNfcCommand::WriteNdefCustom(WriteNdefCustom::parse_payload(payload)?)
            }
            codes::LOCK_TAG => BasicNfcCommand::LockTag(LockTag::parse_payload(payload)?),
            codes::GET_LIBRARY_VERSION => {
                BasicNfcCommand::GetLibraryVersion(GetLibraryVersion::parse_payload(payload)?)
            }
            code => {
                trace!(code, "Unrecognized basic NFC command");
                return Ok(Command::Unrecognized(message.clone()));
            }
        };
        Ok(Command::BasicNfc(command))
    }

    fn resolve_response(&self, message: &TcmpMessage) -> Result<Response> {
        if !self.check_family(message) {
            return Err(Error::UnsupportedResponse);
        }
        let payload = message.payload();
        let response = match message.command_code() {
            codes::TAG_FOUND => BasicNfcResponse::TagFound(TagFound::parse_payload(payload)?),
            codes::NDEF_FOUND => BasicNfcResponse::NdefFound(NdefFound::parse_payload(payload)?),
            codes::SCAN_TIMEOUT => {
                BasicNfcResponse::ScanTimeout(ScanTimeout::parse_payload(payload)?)
            }
            codes::LIBRARY_VERSION => {
                BasicNfcResponse::LibraryVersion(LibraryVersion::parse_payload(payload)?)
            }
            codes::TAG_WRITTEN => {
                BasicNfcResponse::TagWritten(TagWritten::parse_payload(payload)?)
            }
            codes::TAG_LOCKED => BasicNfcResponse::TagLocked(TagLocked::parse_payload(payload)?),
            codes::APPLICATION_ERROR => {
                BasicNfcResponse::ApplicationError(ApplicationError::parse_payload(payload)?)
            }
            code => {
                trace!(code, "Unrecognized basic NFC response");
                return Ok(Response::Unrecognized(message.clone()));
            }
        };
        Ok(Response::BasicNfc(response))
    }
}
