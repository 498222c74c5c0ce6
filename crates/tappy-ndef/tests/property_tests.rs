//! Property-based tests for the NDEF codec.
//!
//! The parser is fed bytes straight off a tag, so it must reject garbage with
//! an error rather than panic, and anything it encodes it must read back.

use proptest::prelude::*;
use tappy_ndef::{NdefMessage, NdefRecord, Tnf};

fn arbitrary_tnf() -> impl Strategy<Value = Tnf> {
    prop_oneof![
        Just(Tnf::WellKnown),
        Just(Tnf::Mime),
        Just(Tnf::AbsoluteUri),
        Just(Tnf::External),
        Just(Tnf::Unknown),
    ]
}

fn arbitrary_record() -> impl Strategy<Value = NdefRecord> {
    (
        arbitrary_tnf(),
        prop::collection::vec(any::<u8>(), 0..8),
        prop::collection::vec(any::<u8>(), 0..4),
        prop::collection::vec(any::<u8>(), 0..400),
    )
        .prop_map(|(tnf, record_type, id, payload)| NdefRecord::new(tnf, record_type, id, payload))
}

proptest! {
    #[test]
    fn parser_never_panics(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = NdefMessage::from_bytes(&data);
    }

    #[test]
    fn encoded_messages_parse_back(records in prop::collection::vec(arbitrary_record(), 1..4)) {
        let message = NdefMessage::new(records);
        let parsed = NdefMessage::from_bytes(&message.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(parsed, message);
    }

    #[test]
    fn text_records_decode_to_original(text in "\\PC{0,40}", language in "[a-z]{2}") {
        let message = NdefMessage::new(vec![NdefRecord::text(&text, &language)]);
        let parsed = NdefMessage::from_bytes(&message.to_bytes().unwrap()).unwrap();
        let payload = parsed.records()[0].as_text().unwrap();
        prop_assert_eq!(payload.text, text);
        prop_assert_eq!(payload.language, language);
    }
}
