//! Parse error types for the wire vocabulary.

use thiserror::Error;

/// Errors produced while interpreting a robot's payload.
///
/// These are pure parse failures. The conversation engine maps them onto the
/// protocol's `301 SYNTAX ERROR` line; this crate only describes what went
/// wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// A movement confirmation was not of the form `OK <x> <y>`.
    #[error("confirmation must be `OK <x> <y>`, with exactly two integers")]
    MalformedConfirmation,

    /// An access code was empty, too long, or contained a non-digit.
    #[error("access code must be 1-{max} ASCII digits", max = crate::limits::ACCESS_CODE_DIGITS)]
    MalformedAccessCode,
}
