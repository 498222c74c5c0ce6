//! Driver trait definition.

use crate::error::Result;
use crate::types::{ConnectionResult, DriverErrorType, ErrorData};
use tappy_core::TagType;
use tappy_protocol::TcmpMessage;

/// Listener for every message received from the reader.
pub type MessageListener = Box<dyn Fn(&TcmpMessage) + Send + Sync>;

/// Listener for runtime driver errors.
pub type ErrorListener = Box<dyn Fn(DriverErrorType, &ErrorData) + Send + Sync>;

/// Completion callback for connect and disconnect.
pub type ConnectionCallback = Box<dyn FnOnce(&ConnectionResult) + Send>;

/// A connection to a single Tappy reader.
///
/// Methods take `&self`; drivers keep their mutable state behind interior
/// locks so listeners running on the driver's thread can call back into it.
/// Implementations must not hold those locks while invoking a listener or
/// callback.
pub trait TappyDriver: Send + Sync {
    /// Parameters accepted by [`TappyDriver::open`].
    type Params;

    /// Build a driver from parameters. Does not connect.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Configuration`](crate::DriverError::Configuration)
    /// when the parameters are unusable.
    fn open(params: Self::Params) -> Result<Self>
    where
        Self: Sized;

    /// Open the transport, then call `callback` with the outcome.
    fn connect(&self, callback: ConnectionCallback);

    /// Close the transport, then call `callback` with the outcome.
    fn disconnect(&self, callback: ConnectionCallback);

    fn is_connected(&self) -> bool;

    /// Send a message. Failures are reported through the error listener.
    fn send_message(&self, message: &TcmpMessage);

    /// Replace the message listener.
    fn set_message_listener(&self, listener: MessageListener);

    /// Replace the error listener.
    fn set_error_listener(&self, listener: ErrorListener);

    /// Describe a tag type code reported by this driver's readers.
    fn resolve_tag_type(code: u8) -> TagType
    where
        Self: Sized,
    {
        TagType::resolve(code)
    }
}
