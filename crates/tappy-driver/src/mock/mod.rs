//! In-process driver implementations for testing and development.

pub mod tappy;

pub use tappy::{MockTappy, MockTappyConfig, MockTappyHandle};
