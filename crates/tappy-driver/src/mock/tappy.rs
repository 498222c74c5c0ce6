//! Mock Tappy reader.
//!
//! [`MockTappy`] implements [`TappyDriver`] without any transport. The paired
//! [`MockTappyHandle`] plays the reader's side: it pushes replies and driver
//! errors into the installed listeners and records every message the host
//! sent.

use crate::error::{DriverError, Result};
use crate::traits::{ConnectionCallback, ErrorListener, MessageListener, TappyDriver};
use crate::types::{ConnectionResult, DriverErrorType, ErrorData};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tappy_protocol::TcmpMessage;
use tracing::{debug, trace};

type SharedMessageListener = Arc<dyn Fn(&TcmpMessage) + Send + Sync>;
type SharedErrorListener = Arc<dyn Fn(DriverErrorType, &ErrorData) + Send + Sync>;

/// Parameters for [`MockTappy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTappyConfig {
    /// Name used in logs and error messages.
    pub name: String,

    /// Start in the connected state.
    pub connected: bool,

    /// Report [`DriverErrorType::NotConnected`] instead of recording messages
    /// sent while disconnected.
    pub reject_when_disconnected: bool,
}

impl Default for MockTappyConfig {
    fn default() -> Self {
        Self {
            name: "Mock Tappy".to_string(),
            connected: false,
            reject_when_disconnected: false,
        }
    }
}

impl MockTappyConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    pub fn reject_when_disconnected(mut self, reject: bool) -> Self {
        self.reject_when_disconnected = reject;
        self
    }
}

#[derive(Default)]
struct MockState {
    connected: bool,
    sent: Vec<TcmpMessage>,
    connect_calls: usize,
    disconnect_calls: usize,
    connect_error: Option<DriverError>,
    message_listener: Option<SharedMessageListener>,
    error_listener: Option<SharedErrorListener>,
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock Tappy driver.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use tappy_driver::mock::MockTappy;
/// use tappy_driver::{ConnectionResult, TappyDriver};
///
/// let (tappy, handle) = MockTappy::new();
/// assert!(!tappy.is_connected());
///
/// let outcome = Arc::new(Mutex::new(None));
/// let slot = outcome.clone();
/// tappy.connect(Box::new(move |result: &ConnectionResult| {
///     *slot.lock().unwrap() = Some(result.is_ok());
/// }));
///
/// assert!(tappy.is_connected());
/// assert_eq!(*outcome.lock().unwrap(), Some(true));
/// assert_eq!(handle.connect_calls(), 1);
/// ```
pub struct MockTappy {
    name: String,
    reject_when_disconnected: bool,
    state: Arc<Mutex<MockState>>,
}

impl MockTappy {
    /// Create a disconnected mock with the default name.
    pub fn new() -> (Self, MockTappyHandle) {
        Self::with_config(MockTappyConfig::default())
    }

    pub fn with_config(config: MockTappyConfig) -> (Self, MockTappyHandle) {
        let state = Arc::new(Mutex::new(MockState {
            connected: config.connected,
            ..MockState::default()
        }));

        let tappy = Self {
            name: config.name,
            reject_when_disconnected: config.reject_when_disconnected,
            state,
        };
        let handle = tappy.handle();
        (tappy, handle)
    }

    /// Another handle onto this mock's state.
    pub fn handle(&self) -> MockTappyHandle {
        MockTappyHandle {
            name: self.name.clone(),
            state: self.state.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for MockTappy {
    fn default() -> Self {
        Self::new().0
    }
}

impl std::fmt::Debug for MockTappy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("MockTappy")
            .field("name", &self.name)
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl TappyDriver for MockTappy {
    type Params = MockTappyConfig;

    fn open(params: MockTappyConfig) -> Result<Self> {
        if params.name.trim().is_empty() {
            return Err(DriverError::configuration("mock name must not be empty"));
        }
        Ok(Self::with_config(params).0)
    }

    fn connect(&self, callback: ConnectionCallback) {
        let result: ConnectionResult = {
            let mut state = lock(&self.state);
            state.connect_calls += 1;
            match state.connect_error.take() {
                Some(error) => Err(error),
                None => {
                    state.connected = true;
                    Ok(())
                }
            }
        };
        debug!(name = %self.name, ok = result.is_ok(), "Mock Tappy connect");
        callback(&result);
    }

    fn disconnect(&self, callback: ConnectionCallback) {
        {
            let mut state = lock(&self.state);
            state.disconnect_calls += 1;
            state.connected = false;
        }
        debug!(name = %self.name, "Mock Tappy disconnect");
        callback(&Ok(()));
    }

    fn is_connected(&self) -> bool {
        lock(&self.state).connected
    }

    fn send_message(&self, message: &TcmpMessage) {
        let rejected = {
            let mut state = lock(&self.state);
            if self.reject_when_disconnected && !state.connected {
                Some(state.error_listener.clone())
            } else {
                state.sent.push(message.clone());
                None
            }
        };

        match rejected {
            None => trace!(name = %self.name, %message, "Mock Tappy recorded message"),
            Some(listener) => {
                debug!(
                    name = %self.name,
                    %message,
                    "Mock Tappy dropped message while disconnected"
                );
                if let Some(listener) = listener {
                    listener(DriverErrorType::NotConnected, &ErrorData::None);
                }
            }
        }
    }

    fn set_message_listener(&self, listener: MessageListener) {
        lock(&self.state).message_listener = Some(Arc::from(listener));
    }

    fn set_error_listener(&self, listener: ErrorListener) {
        lock(&self.state).error_listener = Some(Arc::from(listener));
    }
}

/// Reader-side control of a [`MockTappy`].
#[derive(Clone)]
pub struct MockTappyHandle {
    name: String,
    state: Arc<Mutex<MockState>>,
}

impl MockTappyHandle {
    /// Deliver a message to the installed message listener.
    ///
    /// Returns `false` when no listener is installed.
    pub fn reply(&self, message: TcmpMessage) -> bool {
        let listener = lock(&self.state).message_listener.clone();
        match listener {
            Some(listener) => {
                trace!(name = %self.name, %message, "Mock Tappy reply");
                listener(&message);
                true
            }
            None => {
                debug!(name = %self.name, %message, "Mock Tappy reply without listener");
                false
            }
        }
    }

    /// Deliver a driver error to the installed error listener.
    ///
    /// Returns `false` when no listener is installed.
    pub fn error(&self, error_type: DriverErrorType, data: impl Into<ErrorData>) -> bool {
        let listener = lock(&self.state).error_listener.clone();
        match listener {
            Some(listener) => {
                listener(error_type, &data.into());
                true
            }
            None => false,
        }
    }

    /// Messages sent by the host, oldest first.
    pub fn sent_messages(&self) -> Vec<TcmpMessage> {
        lock(&self.state).sent.clone()
    }

    pub fn last_sent(&self) -> Option<TcmpMessage> {
        lock(&self.state).sent.last().cloned()
    }

    pub fn clear_sent(&self) {
        lock(&self.state).sent.clear();
    }

    pub fn set_connected(&self, connected: bool) {
        lock(&self.state).connected = connected;
    }

    pub fn is_connected(&self) -> bool {
        lock(&self.state).connected
    }

    /// Make the next `connect` fail with `error`.
    pub fn fail_next_connect(&self, error: DriverError) {
        lock(&self.state).connect_error = Some(error);
    }

    pub fn connect_calls(&self) -> usize {
        lock(&self.state).connect_calls
    }

    pub fn disconnect_calls(&self) -> usize {
        lock(&self.state).disconnect_calls
    }
}

impl std::fmt::Debug for MockTappyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("MockTappyHandle")
            .field("name", &self.name)
            .finish()
    }
}
