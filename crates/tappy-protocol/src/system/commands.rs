use super::codes;
use tappy_core::CommandFamily;

empty_message!(
    /// Ask the reader to answer with a ping response.
    Ping,
    CommandFamily::SYSTEM,
    codes::PING
);

empty_message!(
    /// Request the firmware version.
    GetFirmwareVersion,
    CommandFamily::SYSTEM,
    codes::GET_FIRMWARE_VERSION
);

empty_message!(
    /// Request the hardware version.
    GetHardwareVersion,
    CommandFamily::SYSTEM,
    codes::GET_HARDWARE_VERSION
);

empty_message!(
    /// Request the battery charge level.
    GetBatteryLevel,
    CommandFamily::SYSTEM,
    codes::GET_BATTERY_LEVEL
);
