//! Common test utilities for wrapper integration tests.
//!
//! Helpers fall into two groups:
//!
//! 1. **Setup** (`create_*`) - a wrapper over a fresh mock reader
//! 2. **Recording** (`record`, `sent_command`) - capture what a topic
//!    published and decode it
//!
//! ```ignore
//! let (wrapper, handle) = common::create_wrapper();
//! let sent = common::record(&wrapper, Topic::Sent);
//! wrapper.stop();
//! let stop: Stop = common::sent_command(&sent);
//! ```

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tappy_driver::mock::{MockTappy, MockTappyConfig, MockTappyHandle};
use tappy_protocol::TypedMessage;
use tappy_wrapper::{Event, Topic, Wrapper};

/// UID used by tag fixtures.
pub const UID_DESFIRE: [u8; 7] = [0x04, 0x50, 0x51, 0x52, 0x53, 0x54, 0x80];

/// UID used by NTAG216 fixtures.
pub const UID_NTAG216: [u8; 7] = [0x04, 0x50, 0x51, 0x52, 0x53, 0x54, 0x81];

/// Tag type code of a MIFARE DESFire EV1 4K.
pub const TAG_TYPE_DESFIRE_4K: u8 = 6;

/// Tag type code of an NTAG216.
pub const TAG_TYPE_NTAG216: u8 = 20;

/// Events captured from one topic.
pub type Recorded = Arc<Mutex<Vec<Event>>>;

/// Wrapper over a disconnected mock reader.
pub fn create_wrapper() -> (Wrapper<MockTappy>, MockTappyHandle) {
    create_wrapper_with(MockTappyConfig::default())
}

pub fn create_wrapper_with(config: MockTappyConfig) -> (Wrapper<MockTappy>, MockTappyHandle) {
    let (tappy, handle) = MockTappy::with_config(config);
    (Wrapper::from_driver(tappy), handle)
}

/// Capture every event published on `topic`.
pub fn record(wrapper: &Wrapper<MockTappy>, topic: Topic) -> Recorded {
    let events: Recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    wrapper.on(topic, move |event| sink.lock().unwrap().push(event.clone()));
    events
}

/// Events captured so far.
pub fn take(recorded: &Recorded) -> Vec<Event> {
    std::mem::take(&mut *recorded.lock().unwrap())
}

/// Decode the single command published on `sent`.
///
/// Panics unless exactly one message of type `T` was sent.
pub fn sent_command<T: TypedMessage>(recorded: &Recorded) -> T {
    let events = take(recorded);
    assert_eq!(events.len(), 1, "expected one sent event, got {events:?}");
    match &events[0] {
        Event::Sent(sent) => T::from_message(&sent.message)
            .unwrap_or_else(|e| panic!("sent message is not a {}: {e}", T::NAME)),
        other => panic!("expected a sent event, got {other:?}"),
    }
}
