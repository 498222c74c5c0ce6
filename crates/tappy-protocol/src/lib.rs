//! Typed TCMP messages for the Tappy reader.
//!
//! A [`TcmpMessage`] is the untyped unit the driver exchanges with the
//! reader: a command family, a command code and a payload. Each family module
//! defines typed commands and responses implementing [`TypedMessage`] and a
//! [`FamilyResolver`] that turns raw messages into them. [`ResolverMux`]
//! routes a message to whichever resolver claims its family.
//!
//! ```
//! use tappy_protocol::{ResolverMux, Response, TypedMessage};
//! use tappy_protocol::basic_nfc::{BasicNfcResponse, TagFound};
//!
//! let raw = TagFound::new(20, vec![0x04, 0x50, 0x51]).to_message();
//!
//! let mux = ResolverMux::standard();
//! assert!(mux.check_family(&raw));
//! match mux.resolve_response(&raw).unwrap() {
//!     Response::BasicNfc(BasicNfcResponse::TagFound(found)) => {
//!         assert_eq!(found.tag_type, 20);
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

#[macro_use]
mod macros;

pub mod basic_nfc;
pub mod family;
pub mod message;
mod payload;
pub mod resolver;
pub mod system;

pub use family::{Command, FamilyResolver, Response};
pub use message::{TcmpMessage, TypedMessage};
pub use resolver::ResolverMux;
pub use tappy_core::CommandFamily;
