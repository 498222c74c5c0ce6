//! Shared types for the Tappy wrapper workspace.
//!
//! Holds the error type used by the protocol layer, the command family
//! identifiers, the driver error codes and the tag type metadata table that
//! every other crate in the workspace refers to.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
