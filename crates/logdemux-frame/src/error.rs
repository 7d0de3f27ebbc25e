/// Errors that can occur while demultiplexing a log stream.
#[derive(Debug, thiserror::Error)]
pub enum DemuxError {
    /// The source ended part-way through a frame header.
    #[error("truncated frame header ({received} of 8 bytes)")]
    TruncatedHeader { received: usize },

    /// The source ended before the declared payload was delivered.
    #[error("truncated frame payload ({received} of {expected} bytes)")]
    TruncatedPayload { expected: u32, received: usize },

    /// The declared payload exceeds the configured limit.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: u32, max: u32 },

    /// An I/O error occurred on the underlying source.
    #[error("log stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A previous read already failed; framing can no longer be trusted.
    #[error("log stream unusable after an earlier failure")]
    Failed,
}

impl DemuxError {
    /// Returns true if the source ended in the middle of a frame.
    pub fn is_truncated(&self) -> bool {
        matches!(
            self,
            DemuxError::TruncatedHeader { .. } | DemuxError::TruncatedPayload { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DemuxError>;

/// Returned by [`LogReader::into_inner`](crate::LogReader::into_inner) when
/// draining fails. Carries the source so it can still be discarded or reset.
pub struct IntoInnerError<R> {
    source: R,
    error: DemuxError,
}

impl<R> IntoInnerError<R> {
    pub(crate) fn new(source: R, error: DemuxError) -> Self {
        Self { source, error }
    }

    /// The error that stopped the drain.
    pub fn error(&self) -> &DemuxError {
        &self.error
    }

    /// Give up on the error and take the source.
    pub fn into_inner(self) -> R {
        self.source
    }

    pub fn into_parts(self) -> (DemuxError, R) {
        (self.error, self.source)
    }
}

impl<R> std::fmt::Debug for IntoInnerError<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntoInnerError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<R> std::fmt::Display for IntoInnerError<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to drain log stream: {}", self.error)
    }
}

impl<R> std::error::Error for IntoInnerError<R> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

