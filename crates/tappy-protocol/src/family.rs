//! Command family resolution.

use crate::basic_nfc::{BasicNfcCommand, BasicNfcResponse};
use crate::message::TcmpMessage;
use crate::system::{SystemCommand, SystemResponse};
use tappy_core::{CommandFamily, Result};

/// A command resolved into its typed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    BasicNfc(BasicNfcCommand),
    System(SystemCommand),
    /// Known family, unknown command code.
    Unrecognized(TcmpMessage),
}

/// A response resolved into its typed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    BasicNfc(BasicNfcResponse),
    System(SystemResponse),
    /// Known family, unknown response code.
    Unrecognized(TcmpMessage),
}

impl Response {
    /// Short type name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Response::BasicNfc(r) => match r {
                BasicNfcResponse::TagFound(_) => "TagFound",
                BasicNfcResponse::NdefFound(_) => "NdefFound",
                BasicNfcResponse::ScanTimeout(_) => "ScanTimeout",
                BasicNfcResponse::LibraryVersion(_) => "LibraryVersion",
                BasicNfcResponse::TagWritten(_) => "TagWritten",
                BasicNfcResponse::TagLocked(_) => "TagLocked",
                BasicNfcResponse::ApplicationError(_) => "ApplicationError",
            },
            Response::System(r) => match r {
                SystemResponse::ImproperMessageFormat(_) => "ImproperMessageFormat",
                SystemResponse::LcsMismatch(_) => "LcsMismatch",
                SystemResponse::CrcMismatch(_) => "CrcMismatch",
                SystemResponse::LengthMismatch(_) => "LengthMismatch",
                SystemResponse::HardwareVersion(_) => "HardwareVersion",
                SystemResponse::FirmwareVersion(_) => "FirmwareVersion",
                SystemResponse::BatteryLevel(_) => "BatteryLevel",
                SystemResponse::Ping(_) => "Ping",
                SystemResponse::SystemError(_) => "SystemError",
            },
            Response::Unrecognized(_) => "Unrecognized",
        }
    }
}

/// Interprets the messages of one command family.
///
/// Implementations only accept messages whose family matches
/// [`FamilyResolver::family`]; anything else is rejected with
/// `UnsupportedCommand` / `UnsupportedResponse`. A code the family does not
/// define resolves to the `Unrecognized` variant rather than an error.
pub trait FamilyResolver: Send + Sync {
    fn family(&self) -> CommandFamily;

    fn check_family(&self, message: &TcmpMessage) -> bool {
        message.command_family() == self.family()
    }

    /// # Errors
    ///
    /// Fails when the family differs or the payload is malformed.
    fn resolve_command(&self, message: &TcmpMessage) -> Result<Command>;

    /// # Errors
    ///
    /// Fails when the family differs or the payload is malformed.
    fn resolve_response(&self, message: &TcmpMessage) -> Result<Response>;
}
