//! NDEF message parsing and encoding.
//!
//! # Record layout
//!
//! ```text
//! +----+----+----+----+----+-----+
//! | MB | ME | CF | SR | IL | TNF |   header byte
//! +----+----+----+----+----+-----+
//! | type length                  |   1 byte
//! | payload length               |   1 byte (SR) or 4 bytes big-endian
//! | id length                    |   1 byte, present only when IL is set
//! | type                         |
//! | id                           |
//! | payload                      |
//! +------------------------------+
//! ```

use crate::error::{NdefError, Result};
use crate::record::{NdefRecord, Tnf};

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;

/// An ordered list of NDEF records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NdefMessage {
    records: Vec<NdefRecord>,
}

impl NdefMessage {
    pub fn new(records: Vec<NdefRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[NdefRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<NdefRecord> {
        self.records
    }

    /// Parse a complete NDEF message.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or truncated, the begin/end
    /// flags are inconsistent, bytes follow the final record, or a record is
    /// chunked.
    ///
    /// # Examples
    ///
    /// ```
    /// use tappy_ndef::{NdefError, NdefMessage};
    ///
    /// assert_eq!(
    ///     NdefMessage::from_bytes(&[0x33, 0x12]),
    ///     Err(NdefError::MissingMessageBegin)
    /// );
    /// ```
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(NdefError::Empty);
        }

        let mut reader = Reader { data, offset: 0 };
        let mut records = Vec::new();

        loop {
            let header = reader.byte()?;

            if records.is_empty() && header & FLAG_MB == 0 {
                return Err(NdefError::MissingMessageBegin);
            }
            if !records.is_empty() && header & FLAG_MB != 0 {
                return Err(NdefError::UnexpectedMessageBegin {
                    index: records.len(),
                });
            }
            if header & FLAG_CF != 0 {
                return Err(NdefError::ChunkedUnsupported);
            }

            let type_length = reader.byte()? as usize;
            let payload_length = if header & FLAG_SR != 0 {
                reader.byte()? as usize
            } else {
                let bytes = reader.take(4)?;
                u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize
            };
            let id_length = if header & FLAG_IL != 0 {
                reader.byte()? as usize
            } else {
                0
            };

            let tnf = Tnf::from_bits(header);
            if tnf == Tnf::Empty && (type_length | payload_length | id_length) != 0 {
                return Err(NdefError::invalid_record(
                    "empty record with non-zero field lengths",
                ));
            }
            if tnf == Tnf::Unchanged {
                return Err(NdefError::invalid_record(
                    "unchanged TNF outside a chunked record",
                ));
            }

            let record_type = reader.take(type_length)?.to_vec();
            let id = reader.take(id_length)?.to_vec();
            let payload = reader.take(payload_length)?.to_vec();
            records.push(NdefRecord::new(tnf, record_type, id, payload));

            if header & FLAG_ME != 0 {
                break;
            }
        }

        let remaining = data.len() - reader.offset;
        if remaining != 0 {
            return Err(NdefError::TrailingData { count: remaining });
        }

        Ok(Self { records })
    }

    /// Encode the message. A message without records encodes as a single
    /// empty record.
    ///
    /// # Errors
    ///
    /// Returns [`NdefError::FieldTooLong`] if a record's type or ID exceeds
    /// 255 bytes, or its payload exceeds `u32::MAX` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.records.is_empty() {
            return Ok(vec![FLAG_MB | FLAG_ME | FLAG_SR | Tnf::Empty.bits(), 0x00, 0x00]);
        }

        let last = self.records.len() - 1;
        let mut out = Vec::new();

        for (index, record) in self.records.iter().enumerate() {
            let type_length = short_length("type", &record.record_type)?;
            let id_length = short_length("id", &record.id)?;
            let payload_length =
                u32::try_from(record.payload.len()).map_err(|_| NdefError::FieldTooLong {
                    field: "payload",
                    len: record.payload.len(),
                })?;
            let short = payload_length <= u32::from(u8::MAX);

            let mut header = record.tnf.bits();
            if index == 0 {
                header |= FLAG_MB;
            }
            if index == last {
                header |= FLAG_ME;
            }
            if short {
                header |= FLAG_SR;
            }
            if id_length > 0 {
                header |= FLAG_IL;
            }

            out.push(header);
            out.push(type_length);
            if short {
                out.push(payload_length as u8);
            } else {
                out.extend_from_slice(&payload_length.to_be_bytes());
            }
            if id_length > 0 {
                out.push(id_length);
            }
            out.extend_from_slice(&record.record_type);
            out.extend_from_slice(&record.id);
            out.extend_from_slice(&record.payload);
        }

        Ok(out)
    }
}

/// Length of a field stored in a single length byte.
fn short_length(field: &'static str, data: &[u8]) -> Result<u8> {
    u8::try_from(data.len()).map_err(|_| NdefError::FieldTooLong {
        field,
        len: data.len(),
    })
}

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let available = self.data.len() - self.offset;
        if count > available {
            return Err(NdefError::Truncated {
                offset: self.offset,
                needed: count - available,
            });
        }
        let slice = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }
}
