//! NDEF record representation.

use crate::error::{NdefError, Result};
use crate::text::TextPayload;
use crate::uri::{ParsedUri, uri_prefix};
use serde::Serialize;

/// Record type of a well-known text record.
pub const RTD_TEXT: &[u8] = b"T";

/// Record type of a well-known URI record.
pub const RTD_URI: &[u8] = b"U";

/// Type Name Format: how the record type field is to be interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Tnf {
    Empty,
    WellKnown,
    Mime,
    AbsoluteUri,
    External,
    Unknown,
    Unchanged,
    Reserved,
}

impl Tnf {
    /// Decode the low three bits of a record header.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0x00 => Self::Empty,
            0x01 => Self::WellKnown,
            0x02 => Self::Mime,
            0x03 => Self::AbsoluteUri,
            0x04 => Self::External,
            0x05 => Self::Unknown,
            0x06 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            Self::Empty => 0x00,
            Self::WellKnown => 0x01,
            Self::Mime => 0x02,
            Self::AbsoluteUri => 0x03,
            Self::External => 0x04,
            Self::Unknown => 0x05,
            Self::Unchanged => 0x06,
            Self::Reserved => 0x07,
        }
    }
}

/// A single NDEF record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    pub tnf: Tnf,
    pub record_type: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    pub fn new(tnf: Tnf, record_type: Vec<u8>, id: Vec<u8>, payload: Vec<u8>) -> Self {
        Self {
            tnf,
            record_type,
            id,
            payload,
        }
    }

    /// Create a well-known text record encoded as UTF-8.
    pub fn text(text: &str, language: &str) -> Self {
        let payload = TextPayload::utf8(language, text).to_bytes();
        Self::new(Tnf::WellKnown, RTD_TEXT.to_vec(), Vec::new(), payload)
    }

    /// Create a well-known URI record, abbreviating the URI with the
    /// longest matching prefix code.
    pub fn uri(uri: &str) -> Self {
        let parsed = crate::uri::resolve_uri_to_prefix(uri);
        let mut payload = Vec::with_capacity(parsed.content.len() + 1);
        payload.push(parsed.prefix_code);
        payload.extend_from_slice(parsed.content.as_bytes());
        Self::new(Tnf::WellKnown, RTD_URI.to_vec(), Vec::new(), payload)
    }

    /// Create an empty record.
    pub fn empty() -> Self {
        Self::new(Tnf::Empty, Vec::new(), Vec::new(), Vec::new())
    }

    pub fn is_well_known(&self, record_type: &[u8]) -> bool {
        self.tnf == Tnf::WellKnown && self.record_type == record_type
    }

    /// Decode this record as a well-known text record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not a text record or its payload
    /// is malformed.
    pub fn as_text(&self) -> Result<TextPayload> {
        if !self.is_well_known(RTD_TEXT) {
            return Err(NdefError::WrongRecordType { expected: "text" });
        }
        TextPayload::from_bytes(&self.payload)
    }

    /// Decode this record as a well-known URI record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not a URI record or its payload is
    /// malformed.
    pub fn as_uri(&self) -> Result<ParsedUri> {
        if !self.is_well_known(RTD_URI) {
            return Err(NdefError::WrongRecordType { expected: "URI" });
        }
        let (&prefix_code, rest) = self
            .payload
            .split_first()
            .ok_or_else(|| NdefError::invalid_record("URI record has an empty payload"))?;
        if uri_prefix(prefix_code).is_none() {
            return Err(NdefError::invalid_record(format!(
                "unknown URI prefix code {prefix_code:#04X}"
            )));
        }
        let content = std::str::from_utf8(rest)
            .map_err(|e| NdefError::invalid_encoding(e.to_string()))?
            .to_string();
        Ok(ParsedUri {
            prefix_code,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tnf_bits() {
        for bits in 0..8u8 {
            assert_eq!(Tnf::from_bits(bits).bits(), bits);
        }
        assert_eq!(Tnf::from_bits(0x33), Tnf::AbsoluteUri);
    }

    #[test]
    fn test_text_record_layout() {
        let record = NdefRecord::text("TEST", "en");
        assert_eq!(record.tnf, Tnf::WellKnown);
        assert_eq!(record.record_type, b"T");
        assert_eq!(record.payload, vec![0x02, b'e', b'n', b'T', b'E', b'S', b'T']);
    }

    #[test]
    fn test_uri_record_layout() {
        let record = NdefRecord::uri("https://www.google.com");
        assert_eq!(record.payload[0], 0x02);
        assert_eq!(&record.payload[1..], b"google.com");

        let uri = record.as_uri().unwrap();
        assert_eq!(uri.to_string(), "https://www.google.com");
    }

    #[test]
    fn test_as_text_rejects_uri_record() {
        let record = NdefRecord::uri("tel:5551234");
        assert_eq!(
            record.as_text(),
            Err(NdefError::WrongRecordType { expected: "text" })
        );
    }

    #[test]
    fn test_as_uri_rejects_unknown_prefix() {
        let record = NdefRecord::new(Tnf::WellKnown, RTD_URI.to_vec(), vec![], vec![0x50, b'x']);
        assert!(matches!(
            record.as_uri(),
            Err(NdefError::InvalidRecord { .. })
        ));
    }
}
