//! The keyed-hash login exchange.
//!
//! The session opens with a three-message handshake: the robot names
//! itself, the server answers with the [`SERVER_KEY`] hash of the name, and
//! the robot must reply with the [`CLIENT_KEY`] hash. Both values derive
//! from the same byte sum, so a robot that knows its key can verify the
//! server and vice versa without either key crossing the wire.

use drover_proto::{
    keyed_hash, limits::ACCESS_CODE_DIGITS, MessageKind, ServerCommand, WireError, CLIENT_KEY,
    SERVER_KEY,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use crate::channel::Channel;
use crate::error::SessionError;

/// Run the login exchange to completion.
///
/// On success the robot has been told `200 OK` and the session may proceed
/// to navigation. On failure the returned fault carries the report line
/// (`301` for a malformed code, `300` for a mismatch); the caller sends it.
///
/// # Errors
///
/// [`SessionError::Syntax`] for an oversize name or malformed access code,
/// [`SessionError::LoginFailed`] for a well-formed code that does not match,
/// plus any transport fault.
pub async fn authenticate<R, W>(channel: &mut Channel<R, W>) -> Result<(), SessionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let username = channel.recv(MessageKind::Username).await?;
    channel.send_digits(keyed_hash(SERVER_KEY, &username)).await?;

    let code = channel.recv(MessageKind::Confirmation).await?;
    let claimed = parse_access_code(&code)?;
    if claimed != keyed_hash(CLIENT_KEY, &username) {
        return Err(SessionError::LoginFailed);
    }

    channel.send(ServerCommand::Ok).await?;
    info!(robot = %String::from_utf8_lossy(&username), "robot authenticated");
    Ok(())
}

/// Validate and parse an access code.
///
/// The code must be one to five ASCII digits. Five digits can encode up to
/// 99999; the value is reduced modulo 2^16, so a code of `hash + 65536`
/// also authenticates. The reduction mirrors how a 16-bit comparison on the
/// robot side behaves and is deliberate.
fn parse_access_code(code: &[u8]) -> Result<u16, WireError> {
    if code.is_empty() || code.len() > ACCESS_CODE_DIGITS {
        return Err(WireError::MalformedAccessCode);
    }
    if !code.iter().all(u8::is_ascii_digit) {
        return Err(WireError::MalformedAccessCode);
    }

    let value = code
        .iter()
        .fold(0u32, |acc, &digit| acc * 10 + u32::from(digit - b'0'));
    Ok(value as u16)
}
