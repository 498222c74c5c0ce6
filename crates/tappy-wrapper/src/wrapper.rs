//! The [`Wrapper`] itself.

use crate::bus::{BusError, EventBus, Subscriber, Topic};
use crate::events::{
    ConnectionEvent, DriverErrorEvent, ErrorMessageEvent, Event, InvalidMessageEvent,
    InvalidNdefEvent, MessageEvent, NdefFoundEvent, TagEvent,
};
use bytes::Bytes;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tappy_core::constants::NO_TIMEOUT;
use tappy_driver::{ConnectionResult, DriverError, DriverErrorType, ErrorData, TappyDriver};
use tappy_ndef::{NdefError, NdefMessage, resolve_uri_to_prefix};
use tappy_protocol::basic_nfc::{
    BasicNfcResponse, LockTag, NdefFound, PollingMode, ScanNdef, ScanTag, Stop, StreamNdef,
    StreamTags, TagResponse, WriteNdefCustom, WriteNdefText, WriteNdefUri,
};
use tappy_protocol::system::SystemResponse;
use tappy_protocol::{ResolverMux, Response, TcmpMessage, TypedMessage};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

type MessageHook = Arc<dyn Fn(&TcmpMessage) + Send + Sync>;
type ErrorHook = Arc<dyn Fn(DriverErrorType, &ErrorData) + Send + Sync>;

/// How to obtain the driver a [`Wrapper`] runs on.
pub enum WrapperParams<D: TappyDriver> {
    /// Wrap an existing driver.
    Tappy(D),
    /// Build a driver through [`TappyDriver::open`].
    Params(D::Params),
}

/// Human readable description of a driver error class.
pub fn describe_driver_error(error_type: DriverErrorType) -> &'static str {
    match error_type {
        DriverErrorType::NotConnected => "Tappy not connected",
        DriverErrorType::ConnectionError => "Connection error",
        DriverErrorType::InvalidHdlc => "Received invalid frame",
        DriverErrorType::InvalidTcmp => "Received invalid packet",
        DriverErrorType::Unknown(_) => "Unknown error",
    }
}

#[derive(Default)]
struct Hooks {
    message: Option<MessageHook>,
    error: Option<ErrorHook>,
}

/// State reachable from the listeners installed on the driver.
struct Shared {
    bus: EventBus,
    mux: ResolverMux,
    hooks: Mutex<Hooks>,
}

impl Shared {
    fn hooks(&self) -> MutexGuard<'_, Hooks> {
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: Event) {
        if let Err(error) = self.bus.publish(&event, &[event.topic()]) {
            warn!(%error, "Failed to publish event");
        }
    }

    fn handle_message<D: TappyDriver>(&self, message: &TcmpMessage) {
        let hook = self.hooks().message.clone();
        if let Some(hook) = hook {
            hook(message);
        }

        self.emit(Event::Received(MessageEvent {
            message: message.clone(),
        }));

        if !self.mux.check_family(message) {
            trace!(family = %message.command_family(), "Ignoring message of unknown family");
            return;
        }

        let resolved = match self.mux.resolve_response(message) {
            Ok(resolved) => resolved,
            Err(error) => {
                debug!(%message, %error, "Received invalid message");
                self.emit(Event::InvalidMessage(InvalidMessageEvent {
                    message: message.clone(),
                    error,
                }));
                return;
            }
        };

        if let Some(event) = classify::<D>(message, resolved) {
            self.emit(event);
        }
    }

    fn handle_error(&self, error_type: DriverErrorType, data: &ErrorData) {
        let hook = self.hooks().error.clone();
        if let Some(hook) = hook {
            hook(error_type, data);
        }

        let description = describe_driver_error(error_type);
        debug!(code = error_type.code(), description, "Driver error");
        self.emit(Event::DriverError(DriverErrorEvent {
            error_type,
            data: data.clone(),
            description,
        }));
    }
}

fn tag_event<D: TappyDriver, R: TagResponse>(message: &TcmpMessage, resolved: R) -> TagEvent<R> {
    let tag_type = D::resolve_tag_type(resolved.tag_type());
    TagEvent::new(message.clone(), resolved, tag_type)
}

fn ndef_event<D: TappyDriver>(message: &TcmpMessage, found: NdefFound) -> Event {
    let raw_ndef = found.message.clone();
    let tag = tag_event::<D, _>(message, found);
    match NdefMessage::from_bytes(&raw_ndef) {
        Ok(ndef) => Event::NdefFound(NdefFoundEvent { tag, raw_ndef, ndef }),
        Err(error) => {
            debug!(tag = %tag.tag_code_str, %error, "Tag holds unparsable NDEF");
            Event::InvalidNdef(InvalidNdefEvent {
                tag,
                raw_ndef,
                error,
            })
        }
    }
}

/// Map a resolved response to the event it is published as.
///
/// Responses without a topic (versions, battery, ping, scan timeout and
/// unrecognized codes) yield `None`.
fn classify<D: TappyDriver>(message: &TcmpMessage, resolved: Response) -> Option<Event> {
    let name = resolved.name();
    let (resolved, description) = match resolved {
        Response::BasicNfc(response) => match response {
            BasicNfcResponse::TagFound(found) => {
                return Some(Event::TagFound(tag_event::<D, _>(message, found)));
            }
            BasicNfcResponse::TagWritten(written) => {
                return Some(Event::TagWritten(tag_event::<D, _>(message, written)));
            }
            BasicNfcResponse::TagLocked(locked) => {
                return Some(Event::TagLocked(tag_event::<D, _>(message, locked)));
            }
            BasicNfcResponse::NdefFound(found) => return Some(ndef_event::<D>(message, found)),
            BasicNfcResponse::ApplicationError(error) => {
                let description = error.error_message.clone();
                (
                    Response::BasicNfc(BasicNfcResponse::ApplicationError(error)),
                    description,
                )
            }
            BasicNfcResponse::ScanTimeout(_) | BasicNfcResponse::LibraryVersion(_) => {
                trace!(response = name, "No topic for response");
                return None;
            }
        },
        Response::System(response) => {
            let description = match &response {
                SystemResponse::LcsMismatch(_) => "LCS Mismatch".to_string(),
                SystemResponse::LengthMismatch(_) => "Message length mismatch".to_string(),
                SystemResponse::ImproperMessageFormat(_) => "Improper message format".to_string(),
                SystemResponse::CrcMismatch(_) => "CRC mismatch".to_string(),
                SystemResponse::SystemError(error) => error.error_message.clone(),
                SystemResponse::HardwareVersion(_)
                | SystemResponse::FirmwareVersion(_)
                | SystemResponse::BatteryLevel(_)
                | SystemResponse::Ping(_) => {
                    trace!(response = name, "No topic for response");
                    return None;
                }
            };
            (Response::System(response), description)
        }
        Response::Unrecognized(_) => {
            trace!(%message, "Unrecognized response code");
            return None;
        }
    };

    Some(Event::ErrorMessage(ErrorMessageEvent {
        message: message.clone(),
        resolved,
        description,
    }))
}

/// Event-publishing wrapper around a [`TappyDriver`].
///
/// Cloning is cheap; clones share the driver and the subscriber table, so a
/// subscriber can hold a clone and issue commands (for example `stop()` once
/// a tag is found).
pub struct Wrapper<D> {
    driver: Arc<D>,
    shared: Arc<Shared>,
}

impl<D> Clone for Wrapper<D> {
    fn clone(&self) -> Self {
        Self {
            driver: self.driver.clone(),
            shared: self.shared.clone(),
        }
    }
}

impl<D: TappyDriver + 'static> Wrapper<D> {
    /// Create a wrapper from an existing driver or from driver parameters.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when [`TappyDriver::open`] fails.
    pub fn new(params: WrapperParams<D>) -> Result<Self, DriverError> {
        let driver = match params {
            WrapperParams::Tappy(driver) => driver,
            WrapperParams::Params(params) => D::open(params)?,
        };
        Ok(Self::from_driver(driver))
    }

    /// Build the driver from parameters and wrap it.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when [`TappyDriver::open`] fails.
    pub fn open(params: D::Params) -> Result<Self, DriverError> {
        Self::new(WrapperParams::Params(params))
    }

    /// Wrap an existing driver, replacing its message and error listeners.
    pub fn from_driver(driver: D) -> Self {
        let shared = Arc::new(Shared {
            bus: EventBus::new(),
            mux: ResolverMux::standard(),
            hooks: Mutex::default(),
        });
        let driver = Arc::new(driver);

        let on_message = shared.clone();
        driver.set_message_listener(Box::new(move |message: &TcmpMessage| {
            on_message.handle_message::<D>(message);
        }));
        let on_error = shared.clone();
        driver.set_error_listener(Box::new(
            move |error_type: DriverErrorType, data: &ErrorData| {
                on_error.handle_error(error_type, data);
            },
        ));

        Self { driver, shared }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn resolver(&self) -> &ResolverMux {
        &self.shared.mux
    }

    /// Set the subscriber for `topic`, replacing any previous one.
    pub fn on<F>(&self, topic: Topic, subscriber: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.shared.bus.set_subscriber(topic, Arc::new(subscriber));
    }

    /// Like [`Wrapper::on`] with the topic given by name, e.g. `"tag_found"`.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::UnknownTopic`] for names outside the topic set.
    pub fn on_named<F>(&self, topic: &str, subscriber: F) -> Result<(), BusError>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let topic = topic.parse()?;
        self.on(topic, subscriber);
        Ok(())
    }

    /// Remove the subscriber for `topic`. Returns whether one was set.
    pub fn off(&self, topic: Topic) -> bool {
        self.shared.bus.clear_subscriber(topic)
    }

    /// Receive the events of `topic` through a channel.
    ///
    /// The channel takes the topic's single subscriber slot. Once the
    /// receiver is dropped further events are discarded.
    pub fn subscribe(&self, topic: Topic) -> mpsc::UnboundedReceiver<Event> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscriber: Subscriber = Arc::new(move |event: &Event| {
            if tx.send(event.clone()).is_err() {
                trace!(%topic, "Subscription receiver dropped");
            }
        });
        self.shared.bus.set_subscriber(topic, subscriber);
        rx
    }

    /// Install a hook called with every inbound message before it is
    /// classified.
    pub fn set_message_listener<F>(&self, listener: F)
    where
        F: Fn(&TcmpMessage) + Send + Sync + 'static,
    {
        self.shared.hooks().message = Some(Arc::new(listener));
    }

    /// Install a hook called with every driver error before `driver_error`
    /// is published.
    pub fn set_error_listener<F>(&self, listener: F)
    where
        F: Fn(DriverErrorType, &ErrorData) + Send + Sync + 'static,
    {
        self.shared.hooks().error = Some(Arc::new(listener));
    }

    pub fn is_connected(&self) -> bool {
        self.driver.is_connected()
    }

    /// Connect, then publish `connect`.
    pub fn connect(&self) {
        self.connect_with(|_| {});
    }

    /// Connect, call `callback` with the outcome, then publish `connect`.
    pub fn connect_with<F>(&self, callback: F)
    where
        F: FnOnce(&ConnectionResult) + Send + 'static,
    {
        let shared = self.shared.clone();
        self.driver.connect(Box::new(move |result: &ConnectionResult| {
            callback(result);
            shared.emit(Event::Connect(ConnectionEvent {
                result: result.clone(),
            }));
        }));
    }

    /// Disconnect, then publish `disconnect`.
    pub fn disconnect(&self) {
        self.disconnect_with(|_| {});
    }

    /// Disconnect, call `callback` with the outcome, then publish
    /// `disconnect`.
    pub fn disconnect_with<F>(&self, callback: F)
    where
        F: FnOnce(&ConnectionResult) + Send + 'static,
    {
        let shared = self.shared.clone();
        self.driver.disconnect(Box::new(move |result: &ConnectionResult| {
            callback(result);
            shared.emit(Event::Disconnect(ConnectionEvent {
                result: result.clone(),
            }));
        }));
    }

    /// Forward a message to the driver and publish `sent`.
    pub fn send_message(&self, message: TcmpMessage) {
        debug!(%message, "Sending message");
        self.driver.send_message(&message);
        self.shared.emit(Event::Sent(MessageEvent { message }));
    }

    /// Send a typed command.
    pub fn send<T: TypedMessage>(&self, command: &T) {
        self.send_message(command.to_message());
    }

    /// Scan for tags. `continuous` keeps scanning after the first tag.
    pub fn detect_tag(&self, continuous: bool) {
        if continuous {
            self.send(&StreamTags::new(NO_TIMEOUT, PollingMode::General));
        } else {
            self.send(&ScanTag::new(NO_TIMEOUT, PollingMode::General));
        }
    }

    /// Scan for NDEF tags. `continuous` keeps scanning after the first tag.
    pub fn detect_ndef(&self, continuous: bool) {
        if continuous {
            self.send(&StreamNdef::new(NO_TIMEOUT, PollingMode::General));
        } else {
            self.send(&ScanNdef::new(NO_TIMEOUT, PollingMode::General));
        }
    }

    /// Write a single URI record to the next tag presented.
    ///
    /// The longest matching NFC Forum prefix is replaced by its code.
    pub fn write_uri(&self, uri: &str, lock: bool) {
        let parsed = resolve_uri_to_prefix(uri);
        self.send(&WriteNdefUri::new(
            NO_TIMEOUT,
            lock,
            parsed.prefix_code,
            parsed.content,
        ));
    }

    /// Alias of [`Wrapper::write_uri`].
    pub fn write_url(&self, url: &str, lock: bool) {
        self.write_uri(url, lock);
    }

    /// Write a single text record to the next tag presented.
    pub fn write_text(&self, text: &str, lock: bool) {
        self.send(&WriteNdefText::new(NO_TIMEOUT, lock, text));
    }

    /// Write an already encoded NDEF message to the next tag presented.
    pub fn write_ndef(&self, data: impl Into<Bytes>, lock: bool) {
        self.send(&WriteNdefCustom::new(NO_TIMEOUT, lock, data));
    }

    /// Encode `message` and write it to the next tag presented.
    ///
    /// # Errors
    ///
    /// Returns the encoding error, in which case nothing is sent.
    pub fn write_ndef_message(&self, message: &NdefMessage, lock: bool) -> Result<(), NdefError> {
        self.write_ndef(message.to_bytes()?, lock);
        Ok(())
    }

    /// Lock the tag with `uid`, or the next tag presented when `None`.
    pub fn lock_tag(&self, uid: Option<&[u8]>) {
        let uid = uid.map(Bytes::copy_from_slice).unwrap_or_default();
        self.send(&LockTag::new(NO_TIMEOUT, uid));
    }

    /// Stop the current operation.
    ///
    /// Issue this before disconnecting; otherwise the reader keeps running
    /// the last command, which after `lock_tag` means locking every tag that
    /// comes into range.
    pub fn stop(&self) {
        self.send(&Stop);
    }
}

impl<D> std::fmt::Debug for Wrapper<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Wrapper")
            .field("bus", &self.shared.bus)
            .field("resolver", &self.shared.mux)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DriverErrorType::NotConnected, "Tappy not connected")]
    #[case(DriverErrorType::ConnectionError, "Connection error")]
    #[case(DriverErrorType::InvalidHdlc, "Received invalid frame")]
    #[case(DriverErrorType::InvalidTcmp, "Received invalid packet")]
    #[case(DriverErrorType::Unknown(5), "Unknown error")]
    fn test_describe_driver_error(#[case] error_type: DriverErrorType, #[case] expected: &str) {
        assert_eq!(describe_driver_error(error_type), expected);
    }

    #[test]
    fn test_version_responses_have_no_topic() {
        use tappy_driver::mock::MockTappy;
        use tappy_protocol::basic_nfc::LibraryVersion;
        use tappy_protocol::system::BatteryLevel;

        let version = LibraryVersion::new(1, 2);
        let message = version.to_message();
        let resolved = Response::BasicNfc(BasicNfcResponse::LibraryVersion(version));
        assert_eq!(classify::<MockTappy>(&message, resolved), None);

        let battery = BatteryLevel::new(50);
        let message = battery.to_message();
        let resolved = Response::System(SystemResponse::BatteryLevel(battery));
        assert_eq!(classify::<MockTappy>(&message, resolved), None);
    }
}
