//! Integration tests for the wrapper driven by the mock reader.
//!
//! Covers the three directions of traffic:
//! 1. Connection management passed through to the driver
//! 2. Commands built by the convenience senders
//! 3. Responses and driver errors classified onto topics

mod common;

use bytes::Bytes;
use common::{
    TAG_TYPE_DESFIRE_4K, TAG_TYPE_NTAG216, UID_DESFIRE, UID_NTAG216, create_wrapper,
    create_wrapper_with, record, sent_command, take,
};
use rstest::rstest;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tappy_core::{CommandFamily, Error};
use tappy_driver::mock::{MockTappy, MockTappyConfig};
use tappy_driver::{DriverError, DriverErrorType, ErrorData, TappyDriver};
use tappy_ndef::uri::{URI_PRE_HTTP_WWW, URI_PRE_HTTPS_WWW};
use tappy_ndef::{NdefError, NdefMessage, NdefRecord, Tnf};
use tappy_protocol::basic_nfc::{
    ApplicationError, BasicNfcResponse, LockTag, NdefFound, PollingMode, ScanNdef, ScanTag,
    ScanTimeout, Stop, StreamNdef, StreamTags, TagFound, TagLocked, TagWritten, WriteNdefCustom,
    WriteNdefText, WriteNdefUri, codes,
};
use tappy_protocol::system::{
    CrcMismatch, FirmwareVersion, ImproperMessageFormat, LcsMismatch, LengthMismatch, Ping,
    PingResponse, SystemError, SystemResponse,
};
use tappy_protocol::{Response, TcmpMessage, TypedMessage};
use tappy_wrapper::{BusError, Event, Topic, Wrapper, WrapperParams};

// ============================================================================
// Connection
// ============================================================================

#[test]
fn test_connect_passes_through_to_driver() {
    let (wrapper, handle) = create_wrapper();
    wrapper.connect();
    assert_eq!(handle.connect_calls(), 1);
    assert!(wrapper.is_connected());
}

#[test]
fn test_connect_callback_runs_before_event() {
    let (wrapper, _handle) = create_wrapper();
    let order = Arc::new(Mutex::new(Vec::new()));

    let from_event = order.clone();
    wrapper.on(Topic::Connect, move |event| {
        assert!(matches!(event, Event::Connect(c) if c.result.is_ok()));
        from_event.lock().unwrap().push("event");
    });
    let from_callback = order.clone();
    wrapper.connect_with(move |result| {
        assert!(result.is_ok());
        from_callback.lock().unwrap().push("callback");
    });

    assert_eq!(*order.lock().unwrap(), vec!["callback", "event"]);
}

#[test]
fn test_failed_connect_is_published() {
    let (wrapper, handle) = create_wrapper();
    handle.fail_next_connect(DriverError::connection_failed("port busy"));
    let connects = record(&wrapper, Topic::Connect);

    wrapper.connect();

    let events = take(&connects);
    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::Connect(event) => {
            assert_eq!(event.result, Err(DriverError::connection_failed("port busy")));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(!wrapper.is_connected());
}

#[test]
fn test_disconnect_passes_through_and_publishes() {
    let (wrapper, handle) = create_wrapper_with(MockTappyConfig::default().connected(true));
    let disconnects = record(&wrapper, Topic::Disconnect);
    let called = Arc::new(AtomicBool::new(false));

    let flag = called.clone();
    wrapper.disconnect_with(move |_| flag.store(true, Ordering::SeqCst));

    assert!(called.load(Ordering::SeqCst));
    assert_eq!(handle.disconnect_calls(), 1);
    assert_eq!(take(&disconnects).len(), 1);
    assert!(!wrapper.is_connected());
}

#[test]
fn test_is_connected_reflects_driver() {
    let (wrapper, handle) = create_wrapper();
    assert!(!wrapper.is_connected());
    handle.set_connected(true);
    assert!(wrapper.is_connected());
}

#[test]
fn test_construction_from_params() {
    let params = MockTappyConfig::default()
        .with_name("Bench reader")
        .connected(true);
    let wrapper = Wrapper::<MockTappy>::new(WrapperParams::Params(params)).unwrap();
    assert_eq!(wrapper.driver().name(), "Bench reader");
    assert!(wrapper.is_connected());

    let error = Wrapper::<MockTappy>::open(MockTappyConfig::default().with_name("")).unwrap_err();
    assert!(matches!(error, DriverError::Configuration { .. }));
}

#[test]
fn test_construction_from_driver() {
    let (tappy, handle) = MockTappy::new();
    let wrapper = Wrapper::new(WrapperParams::Tappy(tappy)).unwrap();
    let found = record(&wrapper, Topic::TagFound);

    handle.reply(TagFound::new(TAG_TYPE_NTAG216, UID_NTAG216.to_vec()).to_message());
    assert_eq!(take(&found).len(), 1);
}

// ============================================================================
// Sending
// ============================================================================

#[test]
fn test_send_message_passes_through_and_publishes() {
    let (wrapper, handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);

    wrapper.send_message(Ping.to_message());

    assert_eq!(handle.sent_messages(), vec![Ping.to_message()]);
    let _: Ping = sent_command(&sent);
}

#[rstest]
#[case(false, ScanTag::CODE)]
#[case(true, StreamTags::CODE)]
fn test_detect_tag(#[case] continuous: bool, #[case] expected_code: u8) {
    let (wrapper, handle) = create_wrapper();
    wrapper.detect_tag(continuous);

    let message = handle.last_sent().unwrap();
    assert_eq!(message.command_code(), expected_code);
    // Both commands share the [timeout, polling mode] layout
    let scan = ScanTag::parse_payload(message.payload()).unwrap();
    assert_eq!(scan.timeout, 0);
    assert_eq!(scan.polling_mode, PollingMode::General);
}

#[test]
fn test_detect_ndef_single() {
    let (wrapper, _handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    wrapper.detect_ndef(false);

    let scan: ScanNdef = sent_command(&sent);
    assert_eq!(scan, ScanNdef::new(0, PollingMode::General));
}

#[test]
fn test_detect_ndef_continuous() {
    let (wrapper, _handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    wrapper.detect_ndef(true);

    let stream: StreamNdef = sent_command(&sent);
    assert_eq!(stream, StreamNdef::new(0, PollingMode::General));
}

#[test]
fn test_write_uri_strips_prefix() {
    let (wrapper, _handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    wrapper.write_uri("https://www.google.com", false);

    let command: WriteNdefUri = sent_command(&sent);
    assert_eq!(command.timeout, 0);
    assert!(!command.lock);
    assert_eq!(command.uri_code, URI_PRE_HTTPS_WWW);
    assert_eq!(command.uri, "google.com");
}

#[test]
fn test_write_url_with_lock() {
    let (wrapper, _handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    wrapper.write_url("http://www.taptrack.com", true);

    let command: WriteNdefUri = sent_command(&sent);
    assert!(command.lock);
    assert_eq!(command.uri_code, URI_PRE_HTTP_WWW);
    assert_eq!(command.uri, "taptrack.com");
}

#[rstest]
#[case("TEST", false)]
#[case("TEST", true)]
#[case("こんにちは世界", false)]
fn test_write_text(#[case] text: &str, #[case] lock: bool) {
    let (wrapper, _handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    wrapper.write_text(text, lock);

    let command: WriteNdefText = sent_command(&sent);
    assert_eq!(command, WriteNdefText::new(0, lock, text));
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_write_ndef(#[case] lock: bool) {
    let (wrapper, _handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    wrapper.write_ndef(vec![0x03, 0x04, 0x05], lock);

    let command: WriteNdefCustom = sent_command(&sent);
    assert_eq!(command.timeout, 0);
    assert_eq!(command.lock, lock);
    assert_eq!(command.message.as_ref(), &[0x03, 0x04, 0x05]);
}

#[test]
fn test_write_ndef_message_encodes() {
    let (wrapper, _handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    let message = NdefMessage::new(vec![NdefRecord::uri("https://example.com")]);
    wrapper.write_ndef_message(&message, false).unwrap();

    let command: WriteNdefCustom = sent_command(&sent);
    assert_eq!(NdefMessage::from_bytes(&command.message).unwrap(), message);
}

#[test]
fn test_write_ndef_message_rejects_unencodable() {
    let (wrapper, handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    let record = NdefRecord::new(Tnf::External, vec![b'x'; 300], Vec::new(), vec![0x01]);

    let result = wrapper.write_ndef_message(&NdefMessage::new(vec![record]), false);

    assert_eq!(
        result,
        Err(NdefError::FieldTooLong {
            field: "type",
            len: 300
        })
    );
    assert!(handle.sent_messages().is_empty());
    assert!(take(&sent).is_empty());
}

#[test]
fn test_lock_tag_without_uid() {
    let (wrapper, _handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    wrapper.lock_tag(None);

    let command: LockTag = sent_command(&sent);
    assert_eq!(command.timeout, 0);
    assert!(command.tag_code.is_empty());
}

#[test]
fn test_lock_tag_with_uid() {
    let (wrapper, _handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    wrapper.lock_tag(Some(&[0x03, 0x04, 0x05]));

    let command: LockTag = sent_command(&sent);
    assert_eq!(command.tag_code.as_ref(), &[0x03, 0x04, 0x05]);
}

#[test]
fn test_stop_sends_exactly_one_stop() {
    let (wrapper, handle) = create_wrapper();
    let sent = record(&wrapper, Topic::Sent);
    wrapper.stop();

    let _: Stop = sent_command(&sent);
    assert_eq!(handle.sent_messages(), vec![Stop.to_message()]);
}

#[test]
fn test_send_while_disconnected_reports_driver_error() {
    let (wrapper, handle) =
        create_wrapper_with(MockTappyConfig::default().reject_when_disconnected(true));
    let errors = record(&wrapper, Topic::DriverError);
    let sent = record(&wrapper, Topic::Sent);

    wrapper.stop();

    assert!(handle.sent_messages().is_empty());
    // The wrapper still reports what it handed to the driver
    assert_eq!(take(&sent).len(), 1);
    match take(&errors).as_slice() {
        [Event::DriverError(error)] => {
            assert_eq!(error.error_type, DriverErrorType::NotConnected);
            assert_eq!(error.description, "Tappy not connected");
        }
        other => panic!("unexpected {other:?}"),
    }
}

// ============================================================================
// Driver errors
// ============================================================================

#[test]
fn test_driver_error_published() {
    let (wrapper, handle) = create_wrapper();
    let errors = record(&wrapper, Topic::DriverError);

    handle.error(DriverErrorType::from_code(5), "DATA");

    match take(&errors).as_slice() {
        [Event::DriverError(error)] => {
            assert_eq!(error.error_type.code(), 5);
            assert_eq!(error.data, ErrorData::Text("DATA".to_string()));
            assert_eq!(error.description, "Unknown error");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_driver_error_reaches_raw_listener() {
    let (wrapper, handle) = create_wrapper();
    let seen = Arc::new(Mutex::new(None));

    let slot = seen.clone();
    wrapper.set_error_listener(move |error_type, data| {
        *slot.lock().unwrap() = Some((error_type, data.clone()));
    });
    handle.error(DriverErrorType::from_code(5), "DATA");

    assert_eq!(
        *seen.lock().unwrap(),
        Some((DriverErrorType::Unknown(5), ErrorData::from("DATA")))
    );
}

#[rstest]
#[case(DriverErrorType::NotConnected, "Tappy not connected")]
#[case(DriverErrorType::ConnectionError, "Connection error")]
#[case(DriverErrorType::InvalidHdlc, "Received invalid frame")]
#[case(DriverErrorType::InvalidTcmp, "Received invalid packet")]
fn test_driver_error_descriptions(#[case] error_type: DriverErrorType, #[case] expected: &str) {
    let (wrapper, handle) = create_wrapper();
    let errors = record(&wrapper, Topic::DriverError);

    handle.error(error_type, ErrorData::Bytes(Bytes::from_static(&[0x7E])));

    match take(&errors).as_slice() {
        [Event::DriverError(error)] => assert_eq!(error.description, expected),
        other => panic!("unexpected {other:?}"),
    }
}

// ============================================================================
// Received messages
// ============================================================================

#[test]
fn test_received_published_for_every_message() {
    let (wrapper, handle) = create_wrapper();
    let received = record(&wrapper, Topic::Received);

    handle.reply(PingResponse.to_message());
    // Unknown family: still received, nothing else
    handle.reply(TcmpMessage::new(CommandFamily::new([0x00, 0x07]), 0x01, Bytes::new()));

    let events = take(&received);
    assert_eq!(events.len(), 2);
    assert!(PingResponse::is_type_of(events[0].message().unwrap()));
}

#[test]
fn test_received_reaches_raw_listener() {
    let (wrapper, handle) = create_wrapper();
    let called = Arc::new(AtomicBool::new(false));

    let flag = called.clone();
    wrapper.set_message_listener(move |message| {
        if PingResponse::is_type_of(message) {
            flag.store(true, Ordering::SeqCst);
        }
    });
    handle.reply(PingResponse.to_message());

    assert!(called.load(Ordering::SeqCst));
}

#[test]
fn test_tag_written() {
    let (wrapper, handle) = create_wrapper();
    let written = record(&wrapper, Topic::TagWritten);

    handle.reply(TagWritten::new(TAG_TYPE_DESFIRE_4K, UID_DESFIRE.to_vec()).to_message());

    match take(&written).as_slice() {
        [Event::TagWritten(event)] => {
            assert_eq!(event.resolved.tag_code.as_ref(), &UID_DESFIRE);
            assert_eq!(event.tag_code.as_ref(), &UID_DESFIRE);
            assert_eq!(event.tag_code_str, "04505152535480");
            assert_eq!(event.tag_type_code, 6);
            assert_eq!(event.tag_type.forum_type, 4);
            assert_eq!(event.tag_type.max_capacity, 4096);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_tag_found() {
    let (wrapper, handle) = create_wrapper();
    let found = record(&wrapper, Topic::TagFound);

    handle.reply(TagFound::new(TAG_TYPE_DESFIRE_4K, UID_DESFIRE.to_vec()).to_message());

    match take(&found).as_slice() {
        [Event::TagFound(event)] => {
            assert_eq!(event.tag_code_str, "04505152535480");
            assert_eq!(event.tag_type.description, "MIFARE DESFire EV1 4K");
            assert_eq!(event.tag_type.max_capacity, 4096);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_tag_locked() {
    let (wrapper, handle) = create_wrapper();
    let locked = record(&wrapper, Topic::TagLocked);

    handle.reply(TagLocked::new(TAG_TYPE_NTAG216, UID_NTAG216.to_vec()).to_message());

    match take(&locked).as_slice() {
        [Event::TagLocked(event)] => {
            assert_eq!(event.tag_code_str, "04505152535481");
            assert_eq!(event.tag_type_code, 20);
            assert_eq!(event.tag_type.forum_type, 2);
            assert_eq!(event.tag_type.max_capacity, 888);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_ndef_found() {
    let (wrapper, handle) = create_wrapper();
    let ndef_found = record(&wrapper, Topic::NdefFound);
    let invalid = record(&wrapper, Topic::InvalidNdef);
    let ndef = NdefMessage::new(vec![NdefRecord::text("TEST", "en")]);
    let raw = ndef.to_bytes().unwrap();

    handle.reply(NdefFound::new(TAG_TYPE_NTAG216, UID_NTAG216.to_vec(), raw.clone()).to_message());

    match take(&ndef_found).as_slice() {
        [Event::NdefFound(event)] => {
            assert_eq!(event.tag.tag_code_str, "04505152535481");
            assert_eq!(event.tag.tag_type_code, 20);
            assert_eq!(event.tag.tag_type.forum_type, 2);
            assert_eq!(event.tag.tag_type.max_capacity, 888);
            assert_eq!(event.raw_ndef.as_ref(), raw.as_slice());

            let text = event.ndef.records()[0].as_text().unwrap();
            assert_eq!(text.language, "en");
            assert_eq!(text.text, "TEST");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(take(&invalid).is_empty());
}

#[test]
fn test_invalid_ndef() {
    let (wrapper, handle) = create_wrapper();
    let ndef_found = record(&wrapper, Topic::NdefFound);
    let invalid = record(&wrapper, Topic::InvalidNdef);

    handle.reply(
        NdefFound::new(TAG_TYPE_NTAG216, UID_NTAG216.to_vec(), vec![0x33, 0x12]).to_message(),
    );

    match take(&invalid).as_slice() {
        [Event::InvalidNdef(event)] => {
            assert_eq!(event.tag.tag_code_str, "04505152535481");
            assert_eq!(event.tag.tag_type.max_capacity, 888);
            assert_eq!(event.raw_ndef.as_ref(), &[0x33, 0x12]);
            assert_eq!(event.error, NdefError::MissingMessageBegin);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(take(&ndef_found).is_empty());
}

#[test]
fn test_empty_ndef_is_invalid() {
    let (wrapper, handle) = create_wrapper();
    let ndef_found = record(&wrapper, Topic::NdefFound);
    let invalid = record(&wrapper, Topic::InvalidNdef);

    handle.reply(
        NdefFound::new(TAG_TYPE_NTAG216, UID_NTAG216.to_vec(), Bytes::new()).to_message(),
    );

    match take(&invalid).as_slice() {
        [Event::InvalidNdef(event)] => {
            assert_eq!(event.tag.tag_code_str, "04505152535481");
            assert!(event.raw_ndef.is_empty());
            assert_eq!(event.error, NdefError::Empty);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(take(&ndef_found).is_empty());
}

#[rstest]
#[case(LcsMismatch.to_message(), "LCS Mismatch")]
#[case(CrcMismatch.to_message(), "CRC mismatch")]
#[case(ImproperMessageFormat.to_message(), "Improper message format")]
#[case(LengthMismatch.to_message(), "Message length mismatch")]
fn test_framing_errors(#[case] message: TcmpMessage, #[case] description: &str) {
    let (wrapper, handle) = create_wrapper();
    let errors = record(&wrapper, Topic::ErrorMessage);

    handle.reply(message.clone());

    match take(&errors).as_slice() {
        [Event::ErrorMessage(event)] => {
            assert_eq!(event.message, message);
            assert_eq!(event.description, description);
            assert!(matches!(event.resolved, Response::System(_)));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_application_error() {
    let (wrapper, handle) = create_wrapper();
    let errors = record(&wrapper, Topic::ErrorMessage);

    handle.reply(ApplicationError::new(1, 2, 3, "TESTMESSAGE").to_message());

    match take(&errors).as_slice() {
        [Event::ErrorMessage(event)] => {
            assert_eq!(event.description, "TESTMESSAGE");
            assert_eq!(
                event.resolved,
                Response::BasicNfc(BasicNfcResponse::ApplicationError(ApplicationError::new(
                    1,
                    2,
                    3,
                    "TESTMESSAGE"
                )))
            );
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_system_error() {
    let (wrapper, handle) = create_wrapper();
    let errors = record(&wrapper, Topic::ErrorMessage);

    handle.reply(SystemError::new(1, 2, 3, "TESTMESSAGE").to_message());

    match take(&errors).as_slice() {
        [Event::ErrorMessage(event)] => {
            assert_eq!(event.description, "TESTMESSAGE");
            match &event.resolved {
                Response::System(SystemResponse::SystemError(error)) => {
                    assert_eq!(error.error_code, 1);
                    assert_eq!(error.internal_error_code, 2);
                    assert_eq!(error.reader_status, 3);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_invalid_message_carries_error() {
    let (wrapper, handle) = create_wrapper();
    let invalid = record(&wrapper, Topic::InvalidMessage);
    let errors = record(&wrapper, Topic::ErrorMessage);

    let message = TcmpMessage::new(
        CommandFamily::BASIC_NFC,
        codes::APPLICATION_ERROR,
        vec![0x02, 0x03],
    );
    handle.reply(message.clone());

    match take(&invalid).as_slice() {
        [Event::InvalidMessage(event)] => {
            assert_eq!(event.message, message);
            assert!(matches!(
                event.error,
                Error::InvalidPayload {
                    message_type: "ApplicationError",
                    ..
                }
            ));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(take(&errors).is_empty());
}

#[test]
fn test_responses_without_topic_only_reach_received() {
    let (wrapper, handle) = create_wrapper();
    let received = record(&wrapper, Topic::Received);
    let count = Arc::new(AtomicUsize::new(0));
    for topic in Topic::ALL {
        if topic == Topic::Received {
            continue;
        }
        let count = count.clone();
        wrapper.on(topic, move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });
    }

    handle.reply(ScanTimeout.to_message());
    handle.reply(FirmwareVersion::new(1, 4).to_message());
    handle.reply(PingResponse.to_message());
    handle.reply(TcmpMessage::new(CommandFamily::BASIC_NFC, 0x55, Bytes::new()));

    assert_eq!(take(&received).len(), 4);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Subscription
// ============================================================================

#[test]
fn test_second_subscriber_replaces_first() {
    let (wrapper, handle) = create_wrapper();
    let first = record(&wrapper, Topic::TagFound);
    let second = record(&wrapper, Topic::TagFound);

    handle.reply(TagFound::new(TAG_TYPE_NTAG216, UID_NTAG216.to_vec()).to_message());

    assert!(take(&first).is_empty());
    assert_eq!(take(&second).len(), 1);
}

#[test]
fn test_off_removes_subscriber() {
    let (wrapper, handle) = create_wrapper();
    let found = record(&wrapper, Topic::TagFound);

    assert!(wrapper.off(Topic::TagFound));
    handle.reply(TagFound::new(TAG_TYPE_NTAG216, UID_NTAG216.to_vec()).to_message());
    assert!(take(&found).is_empty());
}

#[test]
fn test_on_named() {
    let (wrapper, handle) = create_wrapper();
    let called = Arc::new(AtomicBool::new(false));

    let flag = called.clone();
    wrapper
        .on_named("tag_locked", move |_| flag.store(true, Ordering::SeqCst))
        .unwrap();
    handle.reply(TagLocked::new(TAG_TYPE_NTAG216, UID_NTAG216.to_vec()).to_message());
    assert!(called.load(Ordering::SeqCst));

    assert_eq!(
        wrapper.on_named("tag_lost", |_| {}),
        Err(BusError::UnknownTopic("tag_lost".to_string()))
    );
}

#[test]
fn test_subscriber_can_stop_from_callback() {
    let (wrapper, handle) = create_wrapper();
    let inner = wrapper.clone();
    wrapper.on(Topic::TagFound, move |_| inner.stop());

    wrapper.detect_tag(true);
    handle.reply(TagFound::new(TAG_TYPE_NTAG216, UID_NTAG216.to_vec()).to_message());

    let sent = handle.sent_messages();
    assert_eq!(sent.len(), 2);
    assert!(StreamTags::is_type_of(&sent[0]));
    assert!(Stop::is_type_of(&sent[1]));
}

#[tokio::test]
async fn test_subscribe_channel() {
    let (wrapper, handle) = create_wrapper();
    let mut found = wrapper.subscribe(Topic::TagFound);

    handle.reply(TagFound::new(TAG_TYPE_DESFIRE_4K, UID_DESFIRE.to_vec()).to_message());
    handle.reply(TagFound::new(TAG_TYPE_NTAG216, UID_NTAG216.to_vec()).to_message());

    let mut codes = Vec::new();
    for _ in 0..2 {
        match found.recv().await {
            Some(Event::TagFound(event)) => codes.push(event.tag_code_str),
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(codes, vec!["04505152535480", "04505152535481"]);
}

#[test]
fn test_dropped_subscription_is_harmless() {
    let (wrapper, handle) = create_wrapper();
    drop(wrapper.subscribe(Topic::Received));

    assert!(handle.reply(PingResponse.to_message()));
}

#[test]
fn test_resolve_tag_type_through_driver() {
    let tag_type = MockTappy::resolve_tag_type(TAG_TYPE_NTAG216);
    assert_eq!(tag_type.description, "NTAG216");
}
