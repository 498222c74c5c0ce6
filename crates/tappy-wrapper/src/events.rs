//! Event payloads published by the [`Wrapper`](crate::Wrapper).

use crate::bus::Topic;
use bytes::Bytes;
use tappy_core::{TagType, to_hex};
use tappy_driver::{ConnectionResult, DriverErrorType, ErrorData};
use tappy_ndef::{NdefError, NdefMessage};
use tappy_protocol::basic_nfc::{NdefFound, TagFound, TagLocked, TagResponse, TagWritten};
use tappy_protocol::{Response, TcmpMessage};

/// Outcome of a connect or disconnect, as passed to the driver's callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEvent {
    pub result: ConnectionResult,
}

/// A message sent to or received from the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub message: TcmpMessage,
}

/// A response that identifies a tag, with the tag fields pulled out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEvent<R> {
    /// Raw message as received.
    pub message: TcmpMessage,
    pub resolved: R,
    pub tag_type_code: u8,
    pub tag_type: TagType,
    pub tag_code: Bytes,
    /// `tag_code` as uppercase hex.
    pub tag_code_str: String,
}

impl<R: TagResponse> TagEvent<R> {
    pub fn new(message: TcmpMessage, resolved: R, tag_type: TagType) -> Self {
        let tag_code = resolved.tag_code().clone();
        Self {
            message,
            tag_type_code: resolved.tag_type(),
            tag_type,
            tag_code_str: to_hex(&tag_code),
            tag_code,
            resolved,
        }
    }
}

/// A tag whose NDEF content parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefFoundEvent {
    pub tag: TagEvent<NdefFound>,
    pub raw_ndef: Bytes,
    pub ndef: NdefMessage,
}

/// A tag whose NDEF content did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNdefEvent {
    pub tag: TagEvent<NdefFound>,
    pub raw_ndef: Bytes,
    pub error: NdefError,
}

/// An error reported by the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessageEvent {
    pub message: TcmpMessage,
    pub resolved: Response,
    pub description: String,
}

/// A response from a known family whose payload did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMessageEvent {
    pub message: TcmpMessage,
    pub error: tappy_core::Error,
}

/// A runtime error reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverErrorEvent {
    pub error_type: DriverErrorType,
    pub data: ErrorData,
    pub description: &'static str,
}

/// Everything the wrapper publishes, one variant per [`Topic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Connect(ConnectionEvent),
    Disconnect(ConnectionEvent),
    Sent(MessageEvent),
    Received(MessageEvent),
    ErrorMessage(ErrorMessageEvent),
    TagWritten(TagEvent<TagWritten>),
    TagFound(TagEvent<TagFound>),
    NdefFound(NdefFoundEvent),
    TagLocked(TagEvent<TagLocked>),
    InvalidMessage(InvalidMessageEvent),
    InvalidNdef(InvalidNdefEvent),
    DriverError(DriverErrorEvent),
}

impl Event {
    /// Topic this event is published on.
    pub fn topic(&self) -> Topic {
        match self {
            Event::Connect(_) => Topic::Connect,
            Event::Disconnect(_) => Topic::Disconnect,
            Event::Sent(_) => Topic::Sent,
            Event::Received(_) => Topic::Received,
            Event::ErrorMessage(_) => Topic::ErrorMessage,
            Event::TagWritten(_) => Topic::TagWritten,
            Event::TagFound(_) => Topic::TagFound,
            Event::NdefFound(_) => Topic::NdefFound,
            Event::TagLocked(_) => Topic::TagLocked,
            Event::InvalidMessage(_) => Topic::InvalidMessage,
            Event::InvalidNdef(_) => Topic::InvalidNdef,
            Event::DriverError(_) => Topic::DriverError,
        }
    }

    /// Raw message behind the event, if there is one.
    pub fn message(&self) -> Option<&TcmpMessage> {
        match self {
            Event::Sent(e) | Event::Received(e) => Some(&e.message),
            Event::ErrorMessage(e) => Some(&e.message),
            Event::TagWritten(e) => Some(&e.message),
            Event::TagFound(e) => Some(&e.message),
            Event::TagLocked(e) => Some(&e.message),
            Event::NdefFound(e) => Some(&e.tag.message),
            Event::InvalidNdef(e) => Some(&e.tag.message),
            Event::InvalidMessage(e) => Some(&e.message),
            Event::Connect(_) | Event::Disconnect(_) | Event::DriverError(_) => None,
        }
    }
}
