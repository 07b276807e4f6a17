//! Per-message-kind length bounds.
//!
//! The frame reader enforces a hard payload bound per expected message kind;
//! a peer that cannot terminate within the bound is cut off mid-stream. The
//! values are protocol constants, not tunables.

/// Maximum number of digits in a login access code.
///
/// Checked by the authenticator after the read: the read itself runs with
/// the looser [`MessageKind::Confirmation`] bound so that a `RECHARGING`
/// notice (10 bytes) still fits in the confirmation slot.
pub const ACCESS_CODE_DIGITS: usize = 5;

/// The kinds of message a robot can send, each with its own read bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Robot name, first message of a session.
    Username,
    /// Key-pair selector (reserved; the single-key handshake never reads
    /// one).
    KeyId,
    /// Login access code.
    Confirmation,
    /// Movement confirmation, `OK <x> <y>`.
    OkReply,
    /// `RECHARGING` / `FULL POWER` notice.
    PowerNotice,
    /// Secret message answered to `105 GET MESSAGE`.
    Secret,
}

impl MessageKind {
    /// Hard read bound in bytes, exclusive of the terminator.
    #[must_use]
    pub const fn max_payload(self) -> usize {
        match self {
            Self::Username => 18,
            Self::KeyId => 3,
            Self::Confirmation => 10,
            Self::OkReply => 10,
            Self::PowerNotice => 10,
            Self::Secret => 98,
        }
    }
}
