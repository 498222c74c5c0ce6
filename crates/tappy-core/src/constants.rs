//! Protocol-level constants for the Tappy command/response protocol (TCMP).
//!
//! Every TCMP message carries a two-byte command family and a one-byte
//! command code. The family routes a message to the resolver that knows how
//! to interpret its payload:
//!
//! | Family | Bytes | Purpose |
//! |--------|-------|---------|
//! | System | `00 00` | Ping, versions, framing error reports |
//! | Basic NFC | `00 01` | Tag scanning, NDEF writing, tag locking |
//!
//! ```
//! use tappy_core::constants::*;
//!
//! assert_eq!(SYSTEM_FAMILY, [0x00, 0x00]);
//! assert_eq!(BASIC_NFC_FAMILY, [0x00, 0x01]);
//! ```

// ============================================================================
// Command families
// ============================================================================

/// System command family.
pub const SYSTEM_FAMILY: [u8; 2] = [0x00, 0x00];

/// Basic NFC command family.
pub const BASIC_NFC_FAMILY: [u8; 2] = [0x00, 0x01];

// ============================================================================
// Driver error codes
// ============================================================================

/// A message was sent while the reader was disconnected.
pub const ERROR_NOT_CONNECTED: u8 = 0x00;

/// The transport failed to open or dropped.
pub const ERROR_CONNECTION: u8 = 0x01;

/// A frame failed HDLC unescaping or its CRC check.
pub const ERROR_INVALID_HDLC: u8 = 0x02;

/// A frame decoded but did not contain a valid TCMP packet.
pub const ERROR_INVALID_TCMP: u8 = 0x03;

// ============================================================================
// Command defaults
// ============================================================================

/// Scan timeout meaning "no timeout" (scan until stopped).
pub const NO_TIMEOUT: u8 = 0x00;

/// Byte length of the error header (error code, internal error code, reader
/// status) that precedes the message text in error responses.
pub const ERROR_HEADER_LENGTH: usize = 3;
