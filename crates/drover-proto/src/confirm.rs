//! Robot position confirmations.
//!
//! After every movement or rotation command the robot answers with
//! `OK <x> <y>`, its current grid cell. The grammar is strict: exactly three
//! whitespace-separated tokens, the literal `OK`, then two signed decimal
//! integers. Anything else is a syntax fault for the session layer to
//! punish.

use crate::errors::WireError;

/// A cell on the unbounded 2D grid the robots move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// East-west coordinate; east is positive.
    pub x: i32,
    /// North-south coordinate; north is positive.
    pub y: i32,
}

impl Position {
    /// The grid origin, `(0, 0)`.
    ///
    /// Also the session's assumed pose before the first confirmation
    /// arrives; the first reported position overrides it.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Construct a position from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parse an `OK <x> <y>` confirmation payload.
///
/// Accepts any ASCII whitespace between tokens. Trailing tokens, a missing
/// coordinate, a first token other than `OK`, or an unparsable integer all
/// fail.
///
/// # Errors
///
/// Returns [`WireError::MalformedConfirmation`] on any deviation from the
/// grammar, including non-UTF-8 payloads (the grammar is ASCII-only, so no
/// valid confirmation is lost to the UTF-8 requirement).
pub fn parse_confirmation(payload: &[u8]) -> Result<Position, WireError> {
    let text = std::str::from_utf8(payload).map_err(|_| WireError::MalformedConfirmation)?;
    let mut tokens = text.split_ascii_whitespace();

    match tokens.next() {
        Some("OK") => {},
        _ => return Err(WireError::MalformedConfirmation),
    }

    let mut coordinate = || -> Result<i32, WireError> {
        tokens
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or(WireError::MalformedConfirmation)
    };
    let x = coordinate()?;
    let y = coordinate()?;

    if tokens.next().is_some() {
        return Err(WireError::MalformedConfirmation);
    }

    Ok(Position::new(x, y))
}
