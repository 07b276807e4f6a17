//! Server-to-robot command vocabulary.
//!
//! Every line the server may send is drawn from a fixed set of nine
//! commands. Codes 1xx order the robot around, `200` acknowledges a login,
//! and 3xx report faults. Each command is sent as `"<code> <text>"` followed
//! by the message terminator; the numeric value is part of the payload, not
//! a binary field.

/// A command or status line sent by the server.
///
/// # Representation
///
/// The discriminants are the protocol codes, so `cmd as u16` and
/// [`ServerCommand::code`] agree. The wire form is the fixed string returned
/// by [`ServerCommand::line`]; there is no variable payload (the login hash
/// is the one line outside this vocabulary and is sent as raw digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ServerCommand {
    /// Move one cell forward.
    Move = 102,
    /// Rotate 90° counter-clockwise.
    TurnLeft = 103,
    /// Rotate 90° clockwise.
    TurnRight = 104,
    /// Ask the robot for the secret at its current cell.
    GetMessage = 105,
    /// End the session after a successful pick-up.
    Logout = 106,
    /// Login accepted.
    Ok = 200,
    /// Access code did not match the expected hash.
    LoginFailed = 300,
    /// Malformed or oversize message.
    SyntaxError = 301,
    /// Well-formed message that violates the protocol state.
    LogicError = 302,
}

impl ServerCommand {
    /// Numeric protocol code.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Look a command up by its protocol code.
    ///
    /// Returns `None` for codes outside the vocabulary. Total over `u16`;
    /// never panics.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            102 => Some(Self::Move),
            103 => Some(Self::TurnLeft),
            104 => Some(Self::TurnRight),
            105 => Some(Self::GetMessage),
            106 => Some(Self::Logout),
            200 => Some(Self::Ok),
            300 => Some(Self::LoginFailed),
            301 => Some(Self::SyntaxError),
            302 => Some(Self::LogicError),
            _ => None,
        }
    }

    /// Full wire payload, exclusive of the terminator.
    #[must_use]
    pub const fn line(self) -> &'static str {
        match self {
            Self::Move => "102 MOVE",
            Self::TurnLeft => "103 TURN LEFT",
            Self::TurnRight => "104 TURN RIGHT",
            Self::GetMessage => "105 GET MESSAGE",
            Self::Logout => "106 LOGOUT",
            Self::Ok => "200 OK",
            Self::LoginFailed => "300 LOGIN FAILED",
            Self::SyntaxError => "301 SYNTAX ERROR",
            Self::LogicError => "302 LOGIC ERROR",
        }
    }

    /// Parse a received payload back into a command.
    ///
    /// Used by test peers to interpret server output; the production robot
    /// is on the other side of the wire and never runs this code.
    #[must_use]
    pub fn from_line(payload: &[u8]) -> Option<Self> {
        const ALL: [ServerCommand; 9] = [
            ServerCommand::Move,
            ServerCommand::TurnLeft,
            ServerCommand::TurnRight,
            ServerCommand::GetMessage,
            ServerCommand::Logout,
            ServerCommand::Ok,
            ServerCommand::LoginFailed,
            ServerCommand::SyntaxError,
            ServerCommand::LogicError,
        ];
        ALL.into_iter().find(|cmd| cmd.line().as_bytes() == payload)
    }
}

impl std::fmt::Display for ServerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.line())
    }
}
