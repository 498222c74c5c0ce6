//! Driver abstraction for Tappy NFC readers.
//!
//! A driver owns the transport to one reader (serial, USB, BLE, TCP) and
//! exchanges [`TcmpMessage`](tappy_protocol::TcmpMessage)s with it. Framing,
//! CRC and reconnection all live below this trait. Consumers only see:
//!
//! - connection management with completion callbacks,
//! - fire-and-forget message sending,
//! - one message listener and one error listener.
//!
//! Listener and callback types are `Send + Sync` so a driver may invoke them
//! from its own I/O thread.
//!
//! # Mock driver
//!
//! [`mock::MockTappy`] is an in-process driver for tests and demos. Its
//! [`mock::MockTappyHandle`] injects replies and driver errors and records
//! everything sent:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use tappy_driver::TappyDriver;
//! use tappy_driver::mock::MockTappy;
//! use tappy_protocol::{TcmpMessage, TypedMessage};
//! use tappy_protocol::basic_nfc::{ScanTimeout, Stop};
//!
//! let (tappy, handle) = MockTappy::new();
//!
//! let received = Arc::new(Mutex::new(Vec::new()));
//! let sink = received.clone();
//! tappy.set_message_listener(Box::new(move |msg: &TcmpMessage| {
//!     sink.lock().unwrap().push(msg.clone());
//! }));
//!
//! tappy.send_message(&Stop.to_message());
//! handle.reply(ScanTimeout.to_message());
//!
//! assert_eq!(handle.sent_messages(), vec![Stop.to_message()]);
//! assert_eq!(received.lock().unwrap().len(), 1);
//! ```

pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

pub use error::{DriverError, Result};
pub use traits::{ConnectionCallback, ErrorListener, MessageListener, TappyDriver};
pub use types::{ConnectionResult, DriverErrorType, ErrorData};
