//! Wire vocabulary for the drover robot-piloting protocol.
//!
//! This crate contains the pure protocol data shared by the conversation
//! engine, the test harness, and the server binary:
//!
//! - [`command`]: the server-to-robot command set (codes 102-302)
//! - [`confirm`]: robot position confirmations (`OK <x> <y>`)
//! - [`hash`]: the 16-bit keyed hash used by the login exchange
//! - [`limits`]: per-message-kind length bounds
//! - [`errors`]: parse error types
//!
//! Everything here is side-effect free. Framing, timeouts, and session state
//! live in `drover-core`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod command;
pub mod confirm;
pub mod errors;
pub mod hash;
pub mod limits;

pub use command::ServerCommand;
pub use confirm::{parse_confirmation, Position};
pub use errors::WireError;
pub use hash::{keyed_hash, CLIENT_KEY, SERVER_KEY};
pub use limits::MessageKind;

/// First byte of the message terminator (`\a`).
pub const TERM_FIRST: u8 = 0x07;

/// Second byte of the message terminator (`\b`).
pub const TERM_SECOND: u8 = 0x08;

/// The two-byte end-of-message marker.
///
/// Either byte may appear alone inside a payload; only the adjacent pair
/// terminates a message.
pub const TERMINATOR: [u8; 2] = [TERM_FIRST, TERM_SECOND];

/// Exact payload a robot sends to open a recharging pause.
pub const RECHARGING: &[u8] = b"RECHARGING";

/// Exact payload a robot sends to close a recharging pause.
pub const FULL_POWER: &[u8] = b"FULL POWER";

/// Default TCP port the server listens on.
pub const DEFAULT_PORT: u16 = 3999;
