//! NFC Data Exchange Format (NDEF) codec.
//!
//! Parses and encodes NDEF messages as stored on NFC Forum tags, and provides
//! helpers for the two well-known record types the reader writes natively:
//! text records (`T`) and URI records (`U`).
//!
//! # Examples
//!
//! ```
//! use tappy_ndef::{NdefMessage, NdefRecord};
//!
//! let message = NdefMessage::new(vec![NdefRecord::text("TEST", "en")]);
//! let bytes = message.to_bytes().unwrap();
//!
//! let parsed = NdefMessage::from_bytes(&bytes).unwrap();
//! let text = parsed.records()[0].as_text().unwrap();
//! assert_eq!(text.language, "en");
//! assert_eq!(text.text, "TEST");
//! ```

pub mod error;
pub mod message;
pub mod record;
pub mod text;
pub mod uri;

pub use error::{NdefError, Result};
pub use message::NdefMessage;
pub use record::{NdefRecord, RTD_TEXT, RTD_URI, Tnf};
pub use text::{TextPayload, TextPayloadFormat};
pub use uri::{ParsedUri, URI_PREFIXES, resolve_uri_to_prefix, uri_prefix};
