//! System command family (`00 00`).
//!
//! Housekeeping traffic between host and reader: ping, firmware and hardware
//! versions, battery level, and the framing error reports the reader emits
//! when it receives a malformed packet.

mod commands;
mod responses;

pub use commands::*;
pub use responses::*;

use crate::family::{Command, FamilyResolver, Response};
use crate::message::{TcmpMessage, TypedMessage};
use tappy_core::{CommandFamily, Error, Result};
use tracing::trace;

/// Command and response codes of the system family.
pub mod codes {
    // Commands
    pub const GET_BATTERY_LEVEL: u8 = 0x02;
    pub const PING: u8 = 0xFD;
    pub const GET_HARDWARE_VERSION: u8 = 0xFE;
    pub const GET_FIRMWARE_VERSION: u8 = 0xFF;

    // Responses
    pub const IMPROPER_MESSAGE_FORMAT: u8 = 0x01;
    pub const LCS_MISMATCH: u8 = 0x02;
    pub const CRC_MISMATCH: u8 = 0x03;
    pub const LENGTH_MISMATCH: u8 = 0x04;
    pub const HARDWARE_VERSION: u8 = 0x05;
    pub const FIRMWARE_VERSION: u8 = 0x06;
    pub const BATTERY_LEVEL: u8 = 0x08;
    pub const PING_RESPONSE: u8 = 0xFD;
    pub const SYSTEM_ERROR: u8 = 0x7F;
}

/// Typed system command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemCommand {
    Ping(Ping),
    GetFirmwareVersion(GetFirmwareVersion),
    GetHardwareVersion(GetHardwareVersion),
    GetBatteryLevel(GetBatteryLevel),
}

impl SystemCommand {
    pub fn to_message(&self) -> TcmpMessage {
        match self {
            SystemCommand::Ping(c) => c.to_message(),
            SystemCommand::GetFirmwareVersion(c) => c.to_message(),
            SystemCommand::GetHardwareVersion(c) => c.to_message(),
            SystemCommand::GetBatteryLevel(c) => c.to_message(),
        }
    }
}

/// Typed system response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemResponse {
    ImproperMessageFormat(ImproperMessageFormat),
    LcsMismatch(LcsMismatch),
    CrcMismatch(CrcMismatch),
    LengthMismatch(LengthMismatch),
    HardwareVersion(HardwareVersion),
    FirmwareVersion(FirmwareVersion),
    BatteryLevel(BatteryLevel),
    Ping(PingResponse),
    SystemError(SystemError),
}

impl SystemResponse {
    pub fn to_message(&self) -> TcmpMessage {
        match self {
            SystemResponse::ImproperMessageFormat(r) => r.to_message(),
            SystemResponse::LcsMismatch(r) => r.to_message(),
            SystemResponse::CrcMismatch(r) => r.to_message(),
            SystemResponse::LengthMismatch(r) => r.to_message(),
            SystemResponse::HardwareVersion(r) => r.to_message(),
            SystemResponse::FirmwareVersion(r) => r.to_message(),
            SystemResponse::BatteryLevel(r) => r.to_message(),
            SystemResponse::Ping(r) => r.to_message(),
            SystemResponse::SystemError(r) => r.to_message(),
        }
    }
}

/// Resolver for the system family.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl FamilyResolver for SystemResolver {
    fn family(&self) -> CommandFamily {
        CommandFamily::SYSTEM
    }

    fn resolve_command(&self, message: &TcmpMessage) -> Result<Command> {
        if !self.check_family(message) {
            return Err(Error::UnsupportedCommand);
        }
        let payload = message.payload();
        let command = match message.command_code() {
            codes::PING => SystemCommand::Ping(Ping::parse_payload(payload)?),
            codes::GET_FIRMWARE_VERSION => {
                SystemCommand::GetFirmwareVersion(GetFirmwareVersion::parse_payload(payload)?)
            }
            codes::GET_HARDWARE_VERSION => {
                SystemCommand::GetHardwareVersion(GetHardwareVersion::parse_payload(payload)?)
            }
            codes::GET_BATTERY_LEVEL => {
                SystemCommand::GetBatteryLevel(GetBatteryLevel::parse_payload(payload)?)
            }
            code => {
                trace!(code, "Unrecognized system command");
                return Ok(Command::Unrecognized(message.clone()));
            }
        };
        Ok(Command::System(command))
    }

    fn resolve_response(&self, message: &TcmpMessage) -> Result<Response> {
        if !self.check_family(message) {
            return Err(Error::UnsupportedResponse);
        }
        let payload = message.payload();
        let response = match message.command_code() {
            codes::IMPROPER_MESSAGE_FORMAT => SystemResponse::ImproperMessageFormat(
                ImproperMessageFormat::parse_payload(payload)?,
            ),
            codes::LCS_MISMATCH => {
                SystemResponse::LcsMismatch(LcsMismatch::parse_payload(payload)?)
            }
            codes::CRC_MISMATCH => {
                SystemResponse::CrcMismatch(CrcMismatch::parse_payload(payload)?)
            }
            codes::LENGTH_MISMATCH => {
                SystemResponse::LengthMismatch(LengthMismatch::parse_payload(payload)?)
            }
            codes::HARDWARE_VERSION => {
                SystemResponse::HardwareVersion(HardwareVersion::parse_payload(payload)?)
            }
            codes::FIRMWARE_VERSION => {
                SystemResponse::FirmwareVersion(FirmwareVersion::parse_payload(payload)?)
            }
            codes::BATTERY_LEVEL => {
                SystemResponse::BatteryLevel(BatteryLevel::parse_payload(payload)?)
            }
            codes::PING_RESPONSE => SystemResponse::Ping(PingResponse::parse_payload(payload)?),
            codes::SYSTEM_ERROR => {
                SystemResponse::SystemError(SystemError::parse_payload(payload)?)
            }
            code => {
                trace!(code, "Unrecognized system response");
                return Ok(Response::Unrecognized(message.clone()));
            }
        };
        Ok(Response::System(response))
    }
}
