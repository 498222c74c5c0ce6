use super::{PollingMode, codes};
use crate::message::TypedMessage;
use crate::payload::{lock_flag, require_len, utf8};
use bytes::Bytes;
use tappy_core::{CommandFamily, Result};

/// Declare a `[timeout, polling mode]` scan command.
macro_rules! scan_command {
    ($(#[$meta:meta])* $name:ident, $code:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name {
            /// Seconds before the scan gives up, 0 for no timeout.
            pub timeout: u8,
            pub polling_mode: PollingMode,
        }

        impl $name {
            pub fn new(timeout: u8, polling_mode: PollingMode) -> Self {
                Self {
                    timeout,
                    polling_mode,
                }
            }
        }

        impl TypedMessage for $name {
            const FAMILY: CommandFamily = CommandFamily::BASIC_NFC;
            const CODE: u8 = $code;
            const NAME: &'static str = stringify!($name);

            fn payload(&self) -> Vec<u8> {
                vec![self.timeout, self.polling_mode.as_byte()]
            }

            fn parse_payload(payload: &[u8]) -> Result<Self> {
                require_len(Self::NAME, payload, 2)?;
                Ok(Self::new(payload[0], PollingMode::try_from(payload[1])?))
            }
        }
    };
}

empty_message!(
    /// Stop whatever scan or write operation is in progress.
    Stop,
    CommandFamily::BASIC_NFC,
    codes::STOP
);

empty_message!(
    /// Request the version of the reader's basic NFC library.
    GetLibraryVersion,
    CommandFamily::BASIC_NFC,
    codes::GET_LIBRARY_VERSION
);

scan_command!(
    /// Report every tag that enters the field until stopped.
    StreamTags,
    codes::STREAM_TAGS
);

scan_command!(
    /// Report the first tag that enters the field.
    ScanTag,
    codes::SCAN_TAG
);

scan_command!(
    /// Report the NDEF content of every tag that enters the field.
    StreamNdef,
    codes::STREAM_NDEF
);

scan_command!(
    /// Report the NDEF content of the first tag that enters the field.
    ScanNdef,
    codes::SCAN_NDEF
);

/// Write a single URI record.
///
/// Payload: `[timeout, lock, prefix code, uri...]`. The URI is stored without
/// the part covered by the prefix code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteNdefUri {
    pub timeout: u8,
    pub lock: bool,
    pub uri_code: u8,
    pub uri: String,
}

impl WriteNdefUri {
    pub fn new(timeout: u8, lock: bool, uri_code: u8, uri: impl Into<String>) -> Self {
        Self {
            timeout,
            lock,
            uri_code,
            uri: uri.into(),
        }
    }
}

impl TypedMessage for WriteNdefUri {
    const FAMILY: CommandFamily = CommandFamily::BASIC_NFC;
    const CODE: u8 = codes::WRITE_NDEF_URI;
    const NAME: &'static str = "WriteNdefUri";

    fn payload(&self) -> Vec<u8> {
        let mut out = vec![self.timeout, u8::from(self.lock), self.uri_code];
        out.extend_from_slice(self.uri.as_bytes());
        out
    }

    fn parse_payload(payload: &[u8]) -> Result<Self> {
        require_len(Self::NAME, payload, 3)?;
        Ok(Self {
            timeout: payload[0],
            lock: lock_flag(Self::NAME, payload[1])?,
            uri_code: payload[2],
            uri: utf8(Self::NAME, &payload[3..])?,
        })
    }
}

/// Write a single UTF-8 text record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteNdefText {
    pub timeout: u8,
    pub lock: bool,
    pub text: String,
}

impl WriteNdefText {
    pub fn new(timeout: u8, lock: bool, text: impl Into<String>) -> Self {
        Self {
            timeout,
            lock,
            text: text.into(),
        }
    }
}

impl TypedMessage for WriteNdefText {
    const FAMILY: CommandFamily = CommandFamily::BASIC_NFC;
    const CODE: u8 = codes::WRITE_NDEF_TEXT;
    const NAME: &'static str = "WriteNdefText";

    fn payload(&self) -> Vec<u8> {
        let mut out = vec![self.timeout, u8::from(self.lock)];
        out.extend_from_slice(self.text.as_bytes());
        out
    }

    fn parse_payload(payload: &[u8]) -> Result<Self> {
        require_len(Self::NAME, payload, 2)?;
        Ok(Self {
            timeout: payload[0],
            lock: lock_flag(Self::NAME, payload[1])?,
            text: utf8(Self::NAME, &payload[2..])?,
        })
    }
}

/// Write a caller-encoded NDEF message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteNdefCustom {
    pub timeout: u8,
    pub lock: bool,
    pub message: Bytes,
}

impl WriteNdefCustom {
    pub fn new(timeout: u8, lock: bool, message: impl Into<Bytes>) -> Self {
        Self {
            timeout,
            lock,
            message: message.into(),
        }
    }
}

impl TypedMessage for WriteNdefCustom {
    const FAMILY: CommandFamily = CommandFamily::BASIC_NFC;
    const CODE: u8 = codes::WRITE_NDEF_CUSTOM;
    const NAME: &'static str = "WriteNdefCustom";

    fn payload(&self) -> Vec<u8> {
        let mut out = vec![self.timeout, u8::from(self.lock)];
        out.extend_from_slice(&self.message);
        out
    }

    fn parse_payload(payload: &[u8]) -> Result<Self> {
        require_len(Self::NAME, payload, 2)?;
        Ok(Self {
            timeout: payload[0],
            lock: lock_flag(Self::NAME, payload[1])?,
            message: Bytes::copy_from_slice(&payload[2..]),
        })
    }
}

/// Permanently lock a tag.
///
/// An empty `tag_code` locks whichever tag is presented first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockTag {
    pub timeout: u8,
    pub tag_code: Bytes,
}

impl LockTag {
    pub fn new(timeout: u8, tag_code: impl Into<Bytes>) -> Self {
        Self {
            timeout,
            tag_code: tag_code.into(),
        }
    }
}

impl TypedMessage for LockTag {
    const FAMILY: CommandFamily = CommandFamily::BASIC_NFC;
    const CODE: u8 = codes::LOCK_TAG;
    const NAME: &'static str = "LockTag";

    fn payload(&self) -> Vec<u8> {
        let mut out = vec![self.timeout];
        out.extend_from_slice(&self.tag_code);
        out
    }

    fn parse_payload(payload: &[u8]) -> Result<Self> {
        require_len(Self::NAME, payload, 1)?;
        Ok(Self::new(payload[0], Bytes::copy_from_slice(&payload[1..])))
    }
}
