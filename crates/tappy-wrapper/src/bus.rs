//! Single-subscriber-per-topic event bus.
//!
//! Unlike a broadcast bus, each [`Topic`] owns exactly one subscriber slot.
//! Setting a subscriber replaces the previous one; publishing to a topic with
//! an empty slot does nothing. A subscriber that wants to fan out does so
//! itself, or uses [`Wrapper::subscribe`](crate::Wrapper::subscribe) to get a
//! channel instead.
//!
//! Subscribers run synchronously on the publishing thread, after the slot
//! table lock has been released, so they may publish or re-register.

use crate::events::Event;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::trace;

/// Errors from misusing the bus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("Must specify one or more topics to publish to")]
    NoTopics,

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),
}

/// Topics events are published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Connect,
    Disconnect,
    Sent,
    Received,
    ErrorMessage,
    TagWritten,
    TagFound,
    NdefFound,
    TagLocked,
    InvalidMessage,
    InvalidNdef,
    DriverError,
}

impl Topic {
    /// Number of topics.
    pub const COUNT: usize = 12;

    /// Every topic, in declaration order.
    pub const ALL: [Topic; Topic::COUNT] = [
        Topic::Connect,
        Topic::Disconnect,
        Topic::Sent,
        Topic::Received,
        Topic::ErrorMessage,
        Topic::TagWritten,
        Topic::TagFound,
        Topic::NdefFound,
        Topic::TagLocked,
        Topic::InvalidMessage,
        Topic::InvalidNdef,
        Topic::DriverError,
    ];

    /// Wire name of the topic, e.g. `"tag_found"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Connect => "connect",
            Topic::Disconnect => "disconnect",
            Topic::Sent => "sent",
            Topic::Received => "received",
            Topic::ErrorMessage => "error_message",
            Topic::TagWritten => "tag_written",
            Topic::TagFound => "tag_found",
            Topic::NdefFound => "ndef_found",
            Topic::TagLocked => "tag_locked",
            Topic::InvalidMessage => "invalid_message",
            Topic::InvalidNdef => "invalid_ndef",
            Topic::DriverError => "driver_error",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| BusError::UnknownTopic(s.to_string()))
    }
}

/// Callback registered for a topic.
pub type Subscriber = Arc<dyn Fn(&Event) + Send + Sync>;

/// Topic-keyed subscriber table.
pub struct EventBus {
    subscribers: Mutex<[Option<Subscriber>; Topic::COUNT]>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(std::array::from_fn(|_| None)),
        }
    }

    fn slots(&self) -> MutexGuard<'_, [Option<Subscriber>; Topic::COUNT]> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver `event` to the subscriber of each topic, in order.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::NoTopics`] if `topics` is empty.
    pub fn publish(&self, event: &Event, topics: &[Topic]) -> Result<(), BusError> {
        if topics.is_empty() {
            return Err(BusError::NoTopics);
        }

        for &topic in topics {
            let subscriber = self.slots()[topic.index()].clone();
            match subscriber {
                Some(subscriber) => subscriber(event),
                None => trace!(%topic, "No subscriber"),
            }
        }
        Ok(())
    }

    /// Register `subscriber` for `topic`, replacing any previous one.
    pub fn set_subscriber(&self, topic: Topic, subscriber: Subscriber) {
        self.slots()[topic.index()] = Some(subscriber);
    }

    /// Remove the subscriber of `topic`. Returns whether one was set.
    pub fn clear_subscriber(&self, topic: Topic) -> bool {
        self.slots()[topic.index()].take().is_some()
    }

    pub fn has_subscriber(&self, topic: Topic) -> bool {
        self.slots()[topic.index()].is_some()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let slots = self.slots();
        let active: Vec<&'static str> = Topic::ALL
            .iter()
            .filter(|topic| slots[topic.index()].is_some())
            .map(Topic::as_str)
            .collect();
        f.debug_struct("EventBus")
            .field("subscribed", &active)
            .finish()
    }
}
