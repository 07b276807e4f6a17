//! Session error taxonomy.
//!
//! Four families of fault can end a session, each with its own observable
//! behavior on the wire:
//!
//! 1. **Syntax** — malformed framing, oversize message, bad access code,
//!    unparsable confirmation. Reported as `301 SYNTAX ERROR`.
//! 2. **Logic** — a well-formed message that violates protocol state, such
//!    as breaking a recharging pause. Reported as `302 LOGIC ERROR`.
//! 3. **Authentication** — access code mismatch. Reported as
//!    `300 LOGIN FAILED`.
//! 4. **I/O** — timeout, disconnect, send failure. Nothing is reported; the
//!    peer is presumed gone.
//!
//! No fault is recovered locally. Every variant propagates to the session
//! top level, which sends the single report line (if any) and tears the
//! connection down.

use std::io;
use std::time::Duration;

use drover_proto::{ServerCommand, WireError};
use thiserror::Error;

/// A fault that terminates the session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Malformed or oversize input from the robot.
    #[error("syntax fault: {0}")]
    Syntax(&'static str),

    /// Well-formed input that violates the protocol state machine.
    #[error("logic fault: {0}")]
    Logic(&'static str),

    /// The robot's access code did not match the expected hash.
    #[error("access code mismatch")]
    LoginFailed,

    /// No byte arrived within the allotted window.
    #[error("read timed out after {0:?}")]
    Timeout(Duration),

    /// The robot closed the connection mid-message.
    #[error("connection closed by peer")]
    Disconnected,

    /// Transport failure outside the protocol's control.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    /// The error line owed to the robot, if any.
    ///
    /// I/O faults return `None`: there is no point writing to a peer that
    /// timed out or hung up.
    #[must_use]
    pub fn report(&self) -> Option<ServerCommand> {
        match self {
            Self::Syntax(_) => Some(ServerCommand::SyntaxError),
            Self::Logic(_) => Some(ServerCommand::LogicError),
            Self::LoginFailed => Some(ServerCommand::LoginFailed),
            Self::Timeout(_) | Self::Disconnected | Self::Io(_) => None,
        }
    }
}

impl From<WireError> for SessionError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::MalformedConfirmation => Self::Syntax("malformed confirmation"),
            WireError::MalformedAccessCode => Self::Syntax("malformed access code"),
        }
    }
}
