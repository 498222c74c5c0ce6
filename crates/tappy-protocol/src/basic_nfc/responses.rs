use super::{TagResponse, codes};
use crate::message::TypedMessage;
use crate::payload::require_len;
use bytes::Bytes;
use tappy_core::{CommandFamily, Result};

/// Declare a `[tag type, uid...]` tag response.
macro_rules! tag_response {
    ($(#[$meta:meta])* $name:ident, $code:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub tag_type: u8,
            pub tag_code: Bytes,
        }

        impl $name {
            pub fn new(tag_type: u8, tag_code: impl Into<Bytes>) -> Self {
                Self {
                    tag_type,
                    tag_code: tag_code.into(),
                }
            }
        }

        impl TagResponse for $name {
            fn tag_type(&self) -> u8 {
                self.tag_type
            }

            fn tag_code(&self) -> &Bytes {
                &self.tag_code
            }
        }

        impl TypedMessage for $name {
            const FAMILY: CommandFamily = CommandFamily::BASIC_NFC;
            const CODE: u8 = $code;
            const NAME: &'static str = stringify!($name);

            fn payload(&self) -> Vec<u8> {
                let mut out = vec![self.tag_type];
                out.extend_from_slice(&self.tag_code);
                out
            }

            fn parse_payload(payload: &[u8]) -> Result<Self> {
                require_len(Self::NAME, payload, 1)?;
                Ok(Self::new(payload[0], Bytes::copy_from_slice(&payload[1..])))
            }
        }
    };
}

tag_response!(
    /// A tag entered the field.
    TagFound,
    codes::TAG_FOUND
);

tag_response!(
    /// A write command completed on the given tag.
    TagWritten,
    codes::TAG_WRITTEN
);

tag_response!(
    /// The given tag is now permanently locked.
    TagLocked,
    codes::TAG_LOCKED
);

empty_message!(
    /// A scan ran out of time without finding a tag.
    ScanTimeout,
    CommandFamily::BASIC_NFC,
    codes::SCAN_TIMEOUT
);

version_response!(
    /// Version of the reader's basic NFC library.
    LibraryVersion,
    CommandFamily::BASIC_NFC,
    codes::LIBRARY_VERSION
);

error_response!(
    /// Error reported by the basic NFC application on the reader.
    ApplicationError,
    CommandFamily::BASIC_NFC,
    codes::APPLICATION_ERROR
);

/// A tag carrying NDEF data entered the field.
///
/// Payload: `[tag type, uid length, uid..., ndef...]`. The NDEF bytes are
/// kept raw; decoding them is left to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefFound {
    pub tag_type: u8,
    pub tag_code: Bytes,
    pub message: Bytes,
}

impl NdefFound {
    /// The payload stores the tag code length in one byte, so encoding keeps
    /// at most the first 255 bytes of `tag_code`. Real UIDs are 4 to 10
    /// bytes.
    pub fn new(tag_type: u8, tag_code: impl Into<Bytes>, message: impl Into<Bytes>) -> Self {
        Self {
            tag_type,
            tag_code: tag_code.into(),
            message: message.into(),
        }
    }
}

impl TagResponse for NdefFound {
    fn tag_type(&self) -> u8 {
        self.tag_type
    }

    fn tag_code(&self) -> &Bytes {
        &self.tag_code
    }
}

impl TypedMessage for NdefFound {
    const FAMILY: CommandFamily = CommandFamily::BASIC_NFC;
    const CODE: u8 = codes::NDEF_FOUND;
    const NAME: &'static str = "NdefFound";

    fn payload(&self) -> Vec<u8> {
        let uid = &self.tag_code[..self.tag_code.len().min(usize::from(u8::MAX))];
        let uid_length = u8::try_from(uid.len()).unwrap_or(u8::MAX);
        let mut out = vec![self.tag_type, uid_length];
        out.extend_from_slice(uid);
        out.extend_from_slice(&self.message);
        out
    }

    fn parse_payload(payload: &[u8]) -> Result<Self> {
        require_len(Self::NAME, payload, 2)?;
        let uid_end = 2 + payload[1] as usize;
        require_len(Self::NAME, payload, uid_end)?;
        Ok(Self::new(
            payload[0],
            Bytes::copy_from_slice(&payload[2..uid_end]),
            Bytes::copy_from_slice(&payload[uid_end..]),
        ))
    }
}
