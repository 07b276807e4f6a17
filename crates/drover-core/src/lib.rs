//! Conversation engine for piloting one robot over one TCP connection.
//!
//! This crate is the whole of the per-connection logic and none of the
//! socket plumbing. It is generic over any `AsyncRead + AsyncWrite`
//! byte-duplex, which is how the same code runs against real sockets in
//! production, turmoil's simulated network in the harness, and in-memory
//! pipes in unit tests.
//!
//! # Architecture
//!
//! Four layers, data flowing linearly through them:
//!
//! ```text
//! bytes ⇄ framing ⇄ channel ⇄ { auth during startup, nav afterwards }
//!                                └── session drives both
//! ```
//!
//! - [`framing`]: terminator-delimited messages with size bounds and a
//!   per-read timeout
//! - [`channel`]: per-message-kind length table and the recharging pause
//! - [`auth`]: the keyed-hash login exchange
//! - [`nav`]: orientation inference, grid routing, serpentine sweep
//! - [`session`]: the `run(connection)` entry point tying them together
//! - [`error`]: the four-way fault taxonomy and its wire-report mapping
//!
//! # Key principles
//!
//! - One robot, one task: sessions share no mutable state, and every await
//!   inside a session is a read or write on its own connection.
//! - Faults are never recovered locally. Each one maps to at most one
//!   report line (`300`/`301`/`302`) and tears the session down.
//! - During a recharging pause nothing is sent; the channel serializes
//!   reads, so higher layers cannot even try.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod auth;
pub mod channel;
pub mod error;
pub mod framing;
pub mod nav;
pub mod session;

pub use error::SessionError;
pub use session::run;
