use super::codes;
use crate::message::TypedMessage;
use crate::payload::require_len;
use tappy_core::{CommandFamily, Result};

empty_message!(
    /// The reader could not parse the last packet it received.
    ImproperMessageFormat,
    CommandFamily::SYSTEM,
    codes::IMPROPER_MESSAGE_FORMAT
);

empty_message!(
    /// Length checksum of the last packet did not match.
    LcsMismatch,
    CommandFamily::SYSTEM,
    codes::LCS_MISMATCH
);

empty_message!(
    /// CRC of the last packet did not match.
    CrcMismatch,
    CommandFamily::SYSTEM,
    codes::CRC_MISMATCH
);

empty_message!(
    /// Declared length of the last packet did not match its content.
    LengthMismatch,
    CommandFamily::SYSTEM,
    codes::LENGTH_MISMATCH
);

empty_message!(
    /// Answer to [`Ping`](super::Ping).
    PingResponse,
    CommandFamily::SYSTEM,
    codes::PING_RESPONSE
);

version_response!(
    /// Hardware version of the reader.
    HardwareVersion,
    CommandFamily::SYSTEM,
    codes::HARDWARE_VERSION
);

version_response!(
    /// Firmware version of the reader.
    FirmwareVersion,
    CommandFamily::SYSTEM,
    codes::FIRMWARE_VERSION
);

error_response!(
    /// Error reported by the reader's system layer.
    SystemError,
    CommandFamily::SYSTEM,
    codes::SYSTEM_ERROR
);

/// Battery charge level in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryLevel {
    pub percent: u8,
}

impl BatteryLevel {
    pub fn new(percent: u8) -> Self {
        Self { percent }
    }
}

impl TypedMessage for BatteryLevel {
    const FAMILY: CommandFamily = CommandFamily::SYSTEM;
    const CODE: u8 = codes::BATTERY_LEVEL;
    const NAME: &'static str = "BatteryLevel";

    fn payload(&self) -> Vec<u8> {
        vec![self.percent]
    }

    fn parse_payload(payload: &[u8]) -> Result<Self> {
        require_len(Self::NAME, payload, 1)?;
        Ok(Self::new(payload[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_display() {
        assert_eq!(FirmwareVersion::new(1, 12).to_string(), "1.12");
    }

    #[test]
    fn test_battery_level_payload() {
        let parsed = BatteryLevel::from_message(&BatteryLevel::new(87).to_message()).unwrap();
        assert_eq!(parsed.percent, 87);
        assert!(BatteryLevel::parse_payload(&[]).is_err());
    }

    #[test]
    fn test_ping_response_shares_ping_code() {
        assert_eq!(PingResponse::CODE, super::super::Ping::CODE);
    }
}
