use bytes::Bytes;
use std::fmt;
use tappy_core::{CommandFamily, Error, Result, to_hex};

/// Untyped TCMP message as exchanged with the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcmpMessage {
    family: CommandFamily,
    code: u8,
    payload: Bytes,
}

impl TcmpMessage {
    pub fn new(family: CommandFamily, code: u8, payload: impl Into<Bytes>) -> Self {
        TcmpMessage {
            family,
            code,
            payload: payload.into(),
        }
    }

    pub fn command_family(&self) -> CommandFamily {
        self.family
    }

    pub fn command_code(&self) -> u8 {
        self.code
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Replace the payload, keeping family and code.
    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = payload.into();
        self
    }
}

impl fmt::Display for TcmpMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}:{:02X}] {}",
            self.family,
            self.code,
            to_hex(&self.payload)
        )
    }
}

/// A concrete command or response type of a command family.
///
/// Implementors describe where they live (family and code) and how their
/// payload is laid out; conversion to and from [`TcmpMessage`] comes for
/// free.
pub trait TypedMessage: Sized {
    const FAMILY: CommandFamily;
    const CODE: u8;
    const NAME: &'static str;

    /// Serialize the type-specific payload.
    fn payload(&self) -> Vec<u8>;

    /// Parse the type-specific payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPayload`] when the payload does not match the
    /// layout of this type.
    fn parse_payload(payload: &[u8]) -> Result<Self>;

    fn to_message(&self) -> TcmpMessage {
        TcmpMessage::new(Self::FAMILY, Self::CODE, self.payload())
    }

    /// Check whether a raw message has this type's family and code.
    fn is_type_of(message: &TcmpMessage) -> bool {
        message.command_family() == Self::FAMILY && message.command_code() == Self::CODE
    }

    /// Type-check and parse a raw message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongMessageType`] if the family or code differ, or
    /// the payload error from [`TypedMessage::parse_payload`].
    fn from_message(message: &TcmpMessage) -> Result<Self> {
        if !Self::is_type_of(message) {
            return Err(Error::WrongMessageType {
                expected: Self::NAME,
                family: message.command_family().to_string(),
                code: message.command_code(),
            });
        }
        Self::parse_payload(message.payload())
    }
}
