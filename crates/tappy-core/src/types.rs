use crate::constants::{BASIC_NFC_FAMILY, SYSTEM_FAMILY};
use serde::Serialize;
use std::fmt;

/// Two-byte TCMP command family identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CommandFamily([u8; 2]);

impl CommandFamily {
    /// System family (`00 00`).
    pub const SYSTEM: CommandFamily = CommandFamily(SYSTEM_FAMILY);

    /// Basic NFC family (`00 01`).
    pub const BASIC_NFC: CommandFamily = CommandFamily(BASIC_NFC_FAMILY);

    pub const fn new(bytes: [u8; 2]) -> Self {
        CommandFamily(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> [u8; 2] {
        self.0
    }
}

impl fmt::Display for CommandFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", to_hex(&self.0))
    }
}

/// Metadata describing a tag type reported by the reader.
///
/// The reader identifies the technology of every tag it detects with a one
/// byte code. [`TagType::resolve`] maps that code to a description, the NFC
/// Forum tag type (0 when the tag is not an NFC Forum type) and the memory
/// capacity in bytes.
///
/// # Examples
///
/// ```
/// use tappy_core::TagType;
///
/// let tag = TagType::resolve(20);
/// assert_eq!(tag.description, "NTAG216");
/// assert_eq!(tag.forum_type, 2);
/// assert_eq!(tag.max_capacity, 888);
///
/// assert!(!TagType::resolve(0xEE).is_known());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagType {
    pub code: u8,
    pub description: &'static str,
    pub forum_type: u8,
    pub max_capacity: u32,
}

/// (code, description, forum type, capacity)
const TAG_TYPES: &[(u8, &str, u8, u32)] = &[
    (0, "Unknown tag type", 0, 0),
    (1, "MIFARE Ultralight", 2, 64),
    (2, "NTAG203", 2, 144),
    (3, "MIFARE Ultralight C", 2, 144),
    (4, "MIFARE Classic 1K", 0, 1024),
    (5, "MIFARE Classic 4K", 0, 4096),
    (6, "MIFARE DESFire EV1 4K", 4, 4096),
    (7, "MIFARE DESFire EV1 2K", 4, 2048),
    (8, "MIFARE DESFire EV1 8K", 4, 8192),
    (9, "Generic NFC Forum Type 2", 2, 0),
    (10, "Topaz 512", 1, 454),
    (11, "Topaz 96", 1, 96),
    (12, "FeliCa Lite", 3, 224),
    (13, "Generic NFC Forum Type 4", 4, 0),
    (14, "MIFARE Plus 2K", 0, 2048),
    (15, "MIFARE Plus 4K", 0, 4096),
    (16, "NTAG210", 2, 48),
    (17, "NTAG212", 2, 128),
    (18, "NTAG213", 2, 144),
    (19, "NTAG215", 2, 504),
    (20, "NTAG216", 2, 888),
    (21, "MIFARE Ultralight EV1", 2, 48),
];

impl TagType {
    /// Look up the metadata for a reader tag type code.
    ///
    /// Codes missing from the table resolve to an unknown entry that keeps
    /// the original code.
    pub fn resolve(code: u8) -> TagType {
        TAG_TYPES
            .iter()
            .find(|(c, ..)| *c == code)
            .map(|&(code, description, forum_type, max_capacity)| TagType {
                code,
                description,
                forum_type,
                max_capacity,
            })
            .unwrap_or(TagType {
                code,
                description: TAG_TYPES[0].1,
                forum_type: 0,
                max_capacity: 0,
            })
    }

    /// Check whether the code was found in the table.
    pub fn is_known(&self) -> bool {
        self.code != 0 && self.description != TAG_TYPES[0].1
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.code)
    }
}

/// Render bytes as an uppercase, zero-padded hexadecimal string.
///
/// ```
/// use tappy_core::to_hex;
///
/// assert_eq!(to_hex(&[0x04, 0x50, 0x0A]), "04500A");
/// assert_eq!(to_hex(&[]), "");
/// ```
pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02X}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(6, "MIFARE DESFire EV1 4K", 4, 4096)]
    #[case(20, "NTAG216", 2, 888)]
    #[case(18, "NTAG213", 2, 144)]
    #[case(4, "MIFARE Classic 1K", 0, 1024)]
    fn test_tag_type_resolve(
        #[case] code: u8,
        #[case] description: &str,
        #[case] forum_type: u8,
        #[case] max_capacity: u32,
    ) {
        let tag = TagType::resolve(code);
        assert_eq!(tag.code, code);
        assert_eq!(tag.description, description);
        assert_eq!(tag.forum_type, forum_type);
        assert_eq!(tag.max_capacity, max_capacity);
        assert!(tag.is_known());
    }

    #[rstest]
    #[case(0)]
    #[case(0x42)]
    #[case(0xFF)]
    fn test_tag_type_unknown(#[case] code: u8) {
        let tag = TagType::resolve(code);
        assert_eq!(tag.code, code);
        assert_eq!(tag.forum_type, 0);
        assert_eq!(tag.max_capacity, 0);
        assert!(!tag.is_known());
    }

    #[test]
    fn test_to_hex_pads_small_values() {
        assert_eq!(
            to_hex(&[0x04, 0x50, 0x51, 0x52, 0x53, 0x54, 0x80]),
            "04505152535480"
        );
        assert_eq!(to_hex(&[0x00, 0x0F, 0xFF]), "000FFF");
    }

    #[test]
    fn test_command_family_display() {
        assert_eq!(CommandFamily::BASIC_NFC.to_string(), "0001");
        assert_eq!(CommandFamily::SYSTEM.as_bytes(), [0x00, 0x00]);
    }

    #[test]
    fn test_tag_type_serialization() {
        let json = serde_json::to_string(&TagType::resolve(20)).unwrap();
        assert_eq!(
            json,
            r#"{"code":20,"description":"NTAG216","forumType":2,"maxCapacity":888}"#
        );
    }
}
