//! Well-known text record payloads.
//!
//! ```text
//! +--------+---------------+---------------------+
//! | status | language code | text                |
//! +--------+---------------+---------------------+
//!   bit 7: 1 = UTF-16, 0 = UTF-8
//!   bits 0-5: language code length
//! ```

use crate::error::{NdefError, Result};
use serde::Serialize;

const UTF16_FLAG: u8 = 0x80;
const LANGUAGE_LENGTH_MASK: u8 = 0x3F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextPayloadFormat {
    Utf8,
    Utf16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextPayload {
    pub format: TextPayloadFormat,
    pub language: String,
    pub text: String,
}

impl TextPayload {
    pub fn utf8(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            format: TextPayloadFormat::Utf8,
            language: language.into(),
            text: text.into(),
        }
    }

    /// Decode a text record payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is shorter than its declared language
    /// code or the text is not valid in the declared encoding.
    pub fn from_bytes(payload: &[u8]) -> Result<Self> {
        let (&status, rest) = payload
            .split_first()
            .ok_or_else(|| NdefError::invalid_record("text record has an empty payload"))?;

        let language_length = (status & LANGUAGE_LENGTH_MASK) as usize;
        if rest.len() < language_length {
            return Err(NdefError::invalid_record(format!(
                "language code length {} exceeds payload",
                language_length
            )));
        }
        let (language, text) = rest.split_at(language_length);

        let language = std::str::from_utf8(language)
            .map_err(|e| NdefError::invalid_encoding(e.to_string()))?
            .to_string();

        let (format, text) = if status & UTF16_FLAG != 0 {
            (TextPayloadFormat::Utf16, decode_utf16(text)?)
        } else {
            let text = std::str::from_utf8(text)
                .map_err(|e| NdefError::invalid_encoding(e.to_string()))?
                .to_string();
            (TextPayloadFormat::Utf8, text)
        };

        Ok(Self {
            format,
            language,
            text,
        })
    }

    /// Encode as a text record payload.
    ///
    /// Language codes longer than 63 bytes are cut at the last character
    /// boundary that fits the status byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut end = self.language.len().min(LANGUAGE_LENGTH_MASK as usize);
        while !self.language.is_char_boundary(end) {
            end -= 1;
        }
        let language = &self.language.as_bytes()[..end];
        let mut status = end as u8;

        let text = match self.format {
            TextPayloadFormat::Utf8 => self.text.as_bytes().to_vec(),
            TextPayloadFormat::Utf16 => {
                status |= UTF16_FLAG;
                self.text
                    .encode_utf16()
                    .flat_map(|unit| unit.to_be_bytes())
                    .collect()
            }
        };

        let mut out = Vec::with_capacity(1 + language.len() + text.len());
        out.push(status);
        out.extend_from_slice(language);
        out.extend_from_slice(&text);
        out
    }
}

/// UTF-16 text defaults to big-endian unless a byte order mark says otherwise.
fn decode_utf16(data: &[u8]) -> Result<String> {
    if data.len() % 2 != 0 {
        return Err(NdefError::invalid_encoding("odd UTF-16 byte count"));
    }

    let (little_endian, data) = match data {
        [0xFF, 0xFE, rest @ ..] => (true, rest),
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        _ => (false, data),
    };

    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();

    String::from_utf16(&units).map_err(|e| NdefError::invalid_encoding(e.to_string()))
}
