//! Error types for driver operations.

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors returned by driver construction and connection management.
///
/// Errors that occur while the driver runs (bad frames, dropped links) are
/// reported through the error listener instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    /// Operation requires a connected reader.
    #[error("Reader not connected: {device}")]
    NotConnected { device: String },

    /// Transport could not be opened or was lost.
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    /// Driver parameters were rejected.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DriverError {
    pub fn not_connected(device: impl Into<String>) -> Self {
        Self::NotConnected {
            device: device.into(),
        }
    }

    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
