//! The per-connection session driver.
//!
//! [`run`] is the crate's single entry point: hand it an opened byte-duplex
//! connection and it drives the whole conversation — login, orientation,
//! navigation, sweep, logout — to completion. The caller owns the socket
//! and closes it when `run` returns; there is nothing to clean up here.
//!
//! # Lifecycle
//!
//! ```text
//! AUTH → locating MOVE → [orientation MOVE unless already at the target] →
//!        navigate until at target →
//!        repeat: GET MESSAGE; advance one sweep step on empty → LOGOUT
//! ```
//!
//! Any fault ends the session: the one report line the taxonomy owes the
//! robot (if any) is sent best-effort, the error is returned, and the
//! connection drops. Success returns the secret; emitting it is the
//! caller's concern.

use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tracing::info;

use crate::auth;
use crate::channel::Channel;
use crate::error::SessionError;
use crate::nav::Navigator;
use drover_proto::ServerCommand;

/// Run one robot session to completion and return the secret it found.
///
/// Strictly sequential: every await is a protocol read or write on this
/// connection. The function never blocks on anything else, so one task (or
/// thread) per connection is all the concurrency the caller needs.
///
/// # Errors
///
/// The fault that ended the session, after its report line (if the taxonomy
/// assigns one) has been sent. Transport errors during the report itself
/// are ignored; the session is already lost.
pub async fn run<S>(connection: S) -> Result<Vec<u8>, SessionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (read_half, write_half) = tokio::io::split(connection);
    let mut channel = Channel::new(BufReader::new(read_half), write_half);

    match drive(&mut channel).await {
        Ok(secret) => Ok(secret),
        Err(error) => {
            if let Some(report) = error.report() {
                let _ = channel.send(report).await;
            }
            Err(error)
        },
    }
}

async fn drive<R, W>(channel: &mut Channel<R, W>) -> Result<Vec<u8>, SessionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    auth::authenticate(channel).await?;

    let secret = Navigator::new(channel).run().await?;

    // No acknowledgement is awaited; the connection drops right after.
    channel.send(ServerCommand::Logout).await?;
    info!(bytes = secret.len(), "secret retrieved, robot logged out");
    Ok(secret)
}
