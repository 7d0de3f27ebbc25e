use std::io::{self, ErrorKind, Read};
use std::mem::ManuallyDrop;
use std::ptr;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::codec::{FrameHeader, HEADER_SIZE};
use crate::error::{DemuxError, IntoInnerError, Result};
use crate::message::LogMessage;

/// Configuration for a [`LogReader`].
#[derive(Debug, Clone, Copy)]
pub struct ReaderConfig {
    /// Reject frames declaring more payload than this. Default: no limit.
    pub max_payload_size: Option<u32>,
    /// Drain the source when a reader is dropped without `close()`. Default: true.
    pub drain_on_drop: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_payload_size: None,
            drain_on_drop: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    /// Source ended cleanly at a header boundary.
    Ended,
    /// A read failed; framing is lost.
    Failed,
    Closed,
}

/// Splits a multiplexed attach/log stream into [`LogMessage`]s.
///
/// Reads are forward-only and blocking: one header, then exactly its payload,
/// per call. Nothing beyond the current frame is buffered.
///
/// The source may be a pooled connection, so it must be drained before it is
/// released. Call [`close`](Self::close) (or use [`scope`](Self::scope)) when
/// done; dropping an unclosed reader logs a warning and drains as a fallback.
pub struct LogReader<R: Read> {
    inner: R,
    config: ReaderConfig,
    state: State,
    messages_read: u64,
}

impl<R: Read> LogReader<R> {
    /// Create a new log reader with default configuration.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, ReaderConfig::default())
    }

    /// Create a new log reader with explicit configuration.
    pub fn with_config(inner: R, config: ReaderConfig) -> Self {
        Self {
            inner,
            config,
            state: State::Open,
            messages_read: 0,
        }
    }

    /// Run `f` with a reader over `inner`, closing it on every exit path.
    ///
    /// An error from `f` takes precedence over an error from closing.
    pub fn scope<T, F>(inner: R, f: F) -> Result<T>
    where
        F: FnOnce(&mut LogReader<R>) -> Result<T>,
    {
        Self::scope_with_config(inner, ReaderConfig::default(), f)
    }

    /// [`scope`](Self::scope) with explicit configuration.
    pub fn scope_with_config<T, F>(inner: R, config: ReaderConfig, f: F) -> Result<T>
    where
        F: FnOnce(&mut LogReader<R>) -> Result<T>,
    {
        let mut reader = Self::with_config(inner, config);
        let result = f(&mut reader);
        let closed = reader.close();
        let value = result?;
        closed?;
        Ok(value)
    }

    /// Read the next message (blocking).
    ///
    /// Returns `Ok(None)` once the source is exhausted at a frame boundary.
    /// A source that ends inside a frame yields
    /// [`DemuxError::TruncatedHeader`] or [`DemuxError::TruncatedPayload`];
    /// after any error the reader only returns [`DemuxError::Failed`].
    pub fn next_message(&mut self) -> Result<Option<LogMessage>> {
        match self.state {
            State::Open => {}
            State::Ended | State::Closed => return Ok(None),
            State::Failed => return Err(DemuxError::Failed),
        }
        match read_frame(&mut self.inner, &self.config) {
            Ok(Some(message)) => {
                self.messages_read += 1;
                trace!(
                    channel = %message.channel(),
                    size = message.len(),
                    "decoded frame"
                );
                Ok(Some(message))
            }
            Ok(None) => {
                self.state = State::Ended;
                debug!(messages = self.messages_read, "log stream ended");
                Ok(None)
            }
            Err(err) => {
                self.state = State::Failed;
                Err(err)
            }
        }
    }

    /// Drain the rest of the source and mark the reader closed.
    ///
    /// Idempotent. After end of stream the source is already exhausted and is
    /// not read again. Messages already returned stay valid.
    pub fn close(&mut self) -> Result<()> {
        let previous = std::mem::replace(&mut self.state, State::Closed);
        match previous {
            State::Closed | State::Ended => return Ok(()),
            State::Open | State::Failed => {}
        }

        let drained = io::copy(&mut self.inner, &mut io::sink())?;
        debug!(
            drained,
            messages = self.messages_read,
            "log stream closed"
        );
        Ok(())
    }

    /// Close the reader and hand the exhausted source back.
    ///
    /// If draining fails the source is still returned, inside the error.
    pub fn into_inner(self) -> std::result::Result<R, IntoInnerError<R>> {
        let mut this = ManuallyDrop::new(self);
        let closed = this.close();
        // SAFETY: `this` is never dropped, so `inner` is moved out exactly
        // once. The remaining fields are `Copy` and need no drop.
        let source = unsafe { ptr::read(&this.inner) };
        match closed {
            Ok(()) => Ok(source),
            Err(error) => Err(IntoInnerError::new(source, error)),
        }
    }

    /// Returns true once [`close`](Self::close) has run, whether or not the
    /// drain succeeded.
    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    /// Number of messages returned so far.
    pub fn messages_read(&self) -> u64 {
        self.messages_read
    }

    /// Current reader configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

impl<R: Read> Iterator for LogReader<R> {
    type Item = Result<LogMessage>;

    /// Yields messages until end of stream, or until the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Failed {
            return None;
        }
        self.next_message().transpose()
    }
}

impl<R: Read> Drop for LogReader<R> {
    fn drop(&mut self) {
        if matches!(self.state, State::Closed | State::Ended) {
            return;
        }
        warn!(
            messages = self.messages_read,
            drain = self.config.drain_on_drop,
            "log reader dropped without close"
        );
        if !self.config.drain_on_drop {
            return;
        }
        if let Err(err) = self.close() {
            warn!(error = %err, "failed to drain log stream on drop");
        }
    }
}

fn read_frame<R: Read>(inner: &mut R, config: &ReaderConfig) -> Result<Option<LogMessage>> {
    let mut header = [0u8; HEADER_SIZE];
    let received = read_full(inner, &mut header)?;
    if received == 0 {
        return Ok(None);
    }
    if received < HEADER_SIZE {
        return Err(DemuxError::TruncatedHeader { received });
    }

    let header = FrameHeader::decode(&header);
    let expected = header.payload_len;
    if let Some(max) = config.max_payload_size {
        if expected > max {
            return Err(DemuxError::PayloadTooLarge {
                size: expected,
                max,
            });
        }
    }

    // Grows with delivered bytes; the declared length is never trusted for allocation.
    let mut payload = Vec::new();
    (&mut *inner)
        .take(u64::from(expected))
        .read_to_end(&mut payload)?;
    if (payload.len() as u64) < u64::from(expected) {
        return Err(DemuxError::TruncatedPayload {
            expected,
            received: payload.len(),
        });
    }

    Ok(Some(LogMessage::new(header.channel, Bytes::from(payload))))
}

/// Fill `buf` unless the source ends first; returns the bytes read.
fn read_full<R: Read>(inner: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match inner.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(DemuxError::Io(err)),
        }
    }
    Ok(filled)
}
