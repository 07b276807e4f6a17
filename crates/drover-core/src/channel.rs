//! Message layer: length table and the recharging sub-protocol.
//!
//! [`Channel`] wraps the frame reader/writer pair and is the only interface
//! the authenticator and navigator see. On top of raw framing it applies:
//!
//! - the per-kind read bound from [`MessageKind::max_payload`]
//! - the recharging pause: at any message boundary the robot may announce
//!   `RECHARGING`, after which exactly one `FULL POWER` must follow within
//!   five seconds before the expected message is read again
//!
//! Reads are strictly serialized, so the no-sends-while-recharging rule
//! holds by construction: control never returns to a caller while a pause
//! is open.

use std::time::Duration;

use drover_proto::{MessageKind, ServerCommand, FULL_POWER, RECHARGING};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::error::SessionError;
use crate::framing::{FrameReader, FrameWriter};

/// Window for an ordinary read.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Window for the `FULL POWER` notice closing a recharging pause.
pub const RECHARGING_TIMEOUT: Duration = Duration::from_secs(5);

/// Framed, bounded, pause-aware conversation with one robot.
#[derive(Debug)]
pub struct Channel<R, W> {
    reader: FrameReader<R>,
    writer: FrameWriter<W>,
}

impl<R, W> Channel<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Build a channel over the two halves of a connection.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: FrameReader::new(reader),
            writer: FrameWriter::new(writer),
        }
    }

    /// Send one command line.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; a short write is fatal.
    pub async fn send(&mut self, command: ServerCommand) -> Result<(), SessionError> {
        debug!(line = command.line(), "to robot");
        self.writer.write_frame(command.line().as_bytes()).await
    }

    /// Send a bare decimal line (the login hash).
    pub async fn send_digits(&mut self, value: u16) -> Result<(), SessionError> {
        let line = value.to_string();
        debug!(line = %line, "to robot");
        self.writer.write_frame(line.as_bytes()).await
    }

    /// Receive the next expected message of the given kind.
    ///
    /// Transparently consumes any number of recharging pauses first; the
    /// payload returned is always a real message. A pause that closes with
    /// anything but `FULL POWER` is a logic fault. A size violation during
    /// the pause is still a syntax fault: the bound is checked by the frame
    /// reader before this layer ever compares payloads.
    ///
    /// # Errors
    ///
    /// All frame-reader errors, plus [`SessionError::Logic`] on a broken
    /// pause.
    pub async fn recv(&mut self, kind: MessageKind) -> Result<Vec<u8>, SessionError> {
        loop {
            let payload = self
                .reader
                .read_frame(kind.max_payload(), READ_TIMEOUT)
                .await?;
            if payload != RECHARGING {
                debug!(msg = %String::from_utf8_lossy(&payload), "from robot");
                return Ok(payload);
            }

            debug!("robot recharging");
            let notice = self
                .reader
                .read_frame(MessageKind::PowerNotice.max_payload(), RECHARGING_TIMEOUT)
                .await?;
            if notice != FULL_POWER {
                return Err(SessionError::Logic("recharging pause broken"));
            }
            debug!("robot back at full power");
        }
    }
}
