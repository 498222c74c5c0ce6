//! JSON-friendly summaries of wrapper events.

use serde::Serialize;
use tappy_core::TagType;
use tappy_driver::DriverErrorType;
use tappy_ndef::{NdefRecord, ParsedUri, TextPayload, Tnf};
use tappy_wrapper::Event;

/// One NDEF record, decoded where it is a text or URI record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    pub tnf: Tnf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<ParsedUri>,
    pub payload_length: usize,
}

impl From<&NdefRecord> for RecordSummary {
    fn from(record: &NdefRecord) -> Self {
        Self {
            tnf: record.tnf,
            text: record.as_text().ok(),
            uri: record.as_uri().ok(),
            payload_length: record.payload.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub topic: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_type: Option<TagType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<DriverErrorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<RecordSummary>,
}

impl EventSummary {
    fn new(event: &Event) -> Self {
        Self {
            topic: event.topic().as_str(),
            message: event.message().map(ToString::to_string),
            tag_code: None,
            tag_type: None,
            error_type: None,
            description: None,
            records: Vec::new(),
        }
    }
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        let mut summary = EventSummary::new(event);
        match event {
            Event::Connect(e) | Event::Disconnect(e) => {
                summary.description = e.result.as_ref().err().map(ToString::to_string);
            }
            Event::Sent(_) | Event::Received(_) => {}
            Event::TagFound(e) => {
                summary.tag_code = Some(e.tag_code_str.clone());
                summary.tag_type = Some(e.tag_type);
            }
            Event::TagWritten(e) => {
                summary.tag_code = Some(e.tag_code_str.clone());
                summary.tag_type = Some(e.tag_type);
            }
            Event::TagLocked(e) => {
                summary.tag_code = Some(e.tag_code_str.clone());
                summary.tag_type = Some(e.tag_type);
            }
            Event::NdefFound(e) => {
                summary.tag_code = Some(e.tag.tag_code_str.clone());
                summary.tag_type = Some(e.tag.tag_type);
                summary.records = e.ndef.records().iter().map(RecordSummary::from).collect();
            }
            Event::InvalidNdef(e) => {
                summary.tag_code = Some(e.tag.tag_code_str.clone());
                summary.description = Some(e.error.to_string());
            }
            Event::ErrorMessage(e) => summary.description = Some(e.description.clone()),
            Event::InvalidMessage(e) => summary.description = Some(e.error.to_string()),
            Event::DriverError(e) => {
                summary.error_type = Some(e.error_type);
                summary.description = Some(format!("{} ({})", e.description, e.data));
            }
        }
        summary
    }
}
