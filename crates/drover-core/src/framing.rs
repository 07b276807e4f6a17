//! Byte-level framing: terminator scanning, size bounds, read timeout.
//!
//! Messages are terminated by the two-byte sequence `\a\b`. Neither byte is
//! escaped in payloads; the reader distinguishes a real terminator from a
//! literal `\a` or `\b` with one byte of lookahead:
//!
//! ```text
//! state  | `\a`              | `\b`           | other
//! -------+-------------------+----------------+---------------------
//! OPEN   | arm               | push `\b`      | push byte
//! ARMED  | push `\a`, stay   | end of message | push `\a`, push byte
//! ```
//!
//! In a run of `\a` bytes the last one stays armed and the earlier ones are
//! literal payload, so `\a\a\b` decodes as the one-byte payload `\a`. The
//! writer never emits `\a\b` inside a payload, which keeps the pair
//! consistent.
//!
//! # Size bound
//!
//! `read_frame` counts every byte consumed, terminator included, and fails
//! as soon as the message can no longer terminate within
//! `max_payload + 2` bytes: after `max_payload + 1` bytes with no `\a`
//! armed, or after `max_payload + 2` bytes without completion.
//!
//! # Timeout
//!
//! Each single-byte read is bounded by the caller's timeout, the async
//! analogue of a per-recv `SO_RCVTIMEO`. A partial message is discarded on
//! timeout; nothing is retained across calls.

use std::io;
use std::time::Duration;

use bytes::BytesMut;
use drover_proto::{TERMINATOR, TERM_FIRST, TERM_SECOND};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::SessionError;

/// Reads terminator-delimited messages from the robot.
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Wrap a byte source.
    ///
    /// The source is read one byte at a time; hand over something buffered
    /// (`tokio::io::BufReader`) when the underlying reads are syscalls.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read one message of at most `max_payload` bytes.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Syntax`] when the message cannot terminate within
    ///   the bound
    /// - [`SessionError::Timeout`] when a single read exceeds `timeout`
    /// - [`SessionError::Disconnected`] when the peer closes mid-message
    /// - [`SessionError::Io`] on transport failure
    pub async fn read_frame(
        &mut self,
        max_payload: usize,
        timeout: Duration,
    ) -> Result<Vec<u8>, SessionError> {
        let mut payload = Vec::with_capacity(max_payload.min(128));
        let mut consumed = 0usize;
        let mut armed = false;

        loop {
            let byte = self.next_byte(timeout).await?;
            consumed += 1;

            match byte {
                TERM_FIRST => {
                    if armed {
                        payload.push(TERM_FIRST);
                    } else {
                        armed = true;
                    }
                },
                TERM_SECOND => {
                    if armed {
                        return Ok(payload);
                    }
                    payload.push(TERM_SECOND);
                },
                other => {
                    if armed {
                        armed = false;
                        payload.push(TERM_FIRST);
                    }
                    payload.push(other);
                },
            }

            let doomed = (consumed == max_payload + 1 && !armed)
                || consumed == max_payload + TERMINATOR.len();
            if doomed {
                return Err(SessionError::Syntax("message exceeds size bound"));
            }
        }
    }

    async fn next_byte(&mut self, timeout: Duration) -> Result<u8, SessionError> {
        match tokio::time::timeout(timeout, self.inner.read_u8()).await {
            Err(_elapsed) => Err(SessionError::Timeout(timeout)),
            Ok(Err(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                Err(SessionError::Disconnected)
            },
            Ok(Err(err)) => Err(err.into()),
            Ok(Ok(byte)) => Ok(byte),
        }
    }
}

/// Writes terminator-delimited messages to the robot.
#[derive(Debug)]
pub struct FrameWriter<W> {
    inner: W,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    /// Wrap a byte sink.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Send one payload, appending the terminator.
    ///
    /// The payload and terminator are written as a single buffer so the
    /// frame is never interleaved with anything else.
    ///
    /// # Errors
    ///
    /// Any write or flush failure is fatal to the session.
    pub async fn write_frame(&mut self, payload: &[u8]) -> Result<(), SessionError> {
        debug_assert!(
            !payload.windows(TERMINATOR.len()).any(|pair| pair == TERMINATOR),
            "payload must not contain the terminator sequence"
        );

        let mut frame = BytesMut::with_capacity(payload.len() + TERMINATOR.len());
        frame.extend_from_slice(payload);
        frame.extend_from_slice(&TERMINATOR);

        self.inner.write_all(&frame).await?;
        self.inner.flush().await?;
        Ok(())
    }
}
