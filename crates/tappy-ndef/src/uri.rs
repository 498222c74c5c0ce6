//! URI identifier codes for well-known URI records.
//!
//! URI records abbreviate common schemes with a one-byte prefix code defined
//! by the NFC Forum URI record type definition. Code `0x00` means "no
//! abbreviation".

use serde::Serialize;
use std::fmt;

/// Prefix strings indexed by their identifier code.
pub const URI_PREFIXES: [&str; 36] = [
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

pub const URI_PRE_NONE: u8 = 0x00;
pub const URI_PRE_HTTP_WWW: u8 = 0x01;
pub const URI_PRE_HTTPS_WWW: u8 = 0x02;
pub const URI_PRE_HTTP: u8 = 0x03;
pub const URI_PRE_HTTPS: u8 = 0x04;
pub const URI_PRE_TEL: u8 = 0x05;
pub const URI_PRE_MAILTO: u8 = 0x06;

/// A URI split into its prefix code and the remaining content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedUri {
    pub prefix_code: u8,
    pub content: String,
}

impl fmt::Display for ParsedUri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prefix = uri_prefix(self.prefix_code).unwrap_or("");
        write!(f, "{}{}", prefix, self.content)
    }
}

/// Get the prefix string for an identifier code.
pub fn uri_prefix(code: u8) -> Option<&'static str> {
    URI_PREFIXES.get(code as usize).copied()
}

/// Split a URI into the longest matching prefix code and the remainder.
///
/// # Examples
///
/// ```
/// use tappy_ndef::resolve_uri_to_prefix;
/// use tappy_ndef::uri::URI_PRE_HTTPS_WWW;
///
/// let parsed = resolve_uri_to_prefix("https://www.google.com");
/// assert_eq!(parsed.prefix_code, URI_PRE_HTTPS_WWW);
/// assert_eq!(parsed.content, "google.com");
/// ```
pub fn resolve_uri_to_prefix(uri: &str) -> ParsedUri {
    let (code, prefix) = URI_PREFIXES
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, prefix)| uri.starts_with(*prefix))
        .max_by_key(|(_, prefix)| prefix.len())
        .map(|(code, prefix)| (code as u8, *prefix))
        .unwrap_or((URI_PRE_NONE, ""));

    ParsedUri {
        prefix_code: code,
        content: uri[prefix.len()..].to_string(),
    }
}
