//! Event-driven convenience layer over a Tappy driver.
//!
//! [`Wrapper`] installs itself as the driver's message and error listener,
//! classifies every inbound message through the standard
//! [`ResolverMux`](tappy_protocol::ResolverMux) and republishes it on a
//! named [`Topic`] with the fields callers usually want already derived:
//! tag type metadata, hex tag code, parsed NDEF. Outbound, it offers one
//! method per common workflow (`detect_tag`, `write_uri`, `lock_tag`, ...).
//!
//! # Topics
//!
//! | Topic | Published when |
//! |---|---|
//! | `connect` / `disconnect` | the driver finished connecting / disconnecting |
//! | `sent` / `received` | any message leaves / reaches the host |
//! | `tag_found` | a tag was detected (not published for NDEF scans) |
//! | `ndef_found` | a tag with parsable NDEF content was detected |
//! | `invalid_ndef` | a tag was detected but its NDEF content does not parse |
//! | `tag_written` / `tag_locked` | a write / lock completed |
//! | `error_message` | the reader reported an error |
//! | `invalid_message` | a response of a known family failed to parse |
//! | `driver_error` | the driver reported a transport level error |
//!
//! Each topic holds at most one subscriber; registering again replaces it.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use tappy_driver::mock::MockTappy;
//! use tappy_protocol::TypedMessage;
//! use tappy_protocol::basic_nfc::TagFound;
//! use tappy_wrapper::{Event, Topic, Wrapper};
//!
//! let (tappy, handle) = MockTappy::new();
//! let wrapper = Wrapper::from_driver(tappy);
//!
//! let found = Arc::new(Mutex::new(None));
//! let slot = found.clone();
//! wrapper.on(Topic::TagFound, move |event| {
//!     if let Event::TagFound(tag) = event {
//!         *slot.lock().unwrap() = Some(tag.tag_code_str.clone());
//!     }
//! });
//!
//! wrapper.detect_tag(false);
//! handle.reply(TagFound::new(20, vec![0x04, 0xA1, 0xB2]).to_message());
//!
//! assert_eq!(found.lock().unwrap().as_deref(), Some("04A1B2"));
//! ```

pub mod bus;
pub mod events;
pub mod wrapper;

pub use bus::{BusError, EventBus, Subscriber, Topic};
pub use events::{
    ConnectionEvent, DriverErrorEvent, ErrorMessageEvent, Event, InvalidMessageEvent,
    InvalidNdefEvent, MessageEvent, NdefFoundEvent, TagEvent,
};
pub use wrapper::{Wrapper, WrapperParams};
