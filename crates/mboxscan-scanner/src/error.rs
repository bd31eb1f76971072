use std::sync::Arc;

/// Errors that stop a [`Scanner`](crate::Scanner).
///
/// Every variant is terminal: once the scanner records one, it is kept as the
/// sticky error and no further tokens are produced. Cloning is cheap, so a
/// caller can hand the error on while the scanner keeps its own copy.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScanError {
    /// The source ended before the split function could find a complete token.
    #[error("unexpected end of stream (expected a separator, got EOF)")]
    UnexpectedEndOfStream,

    /// A single token does not fit in the configured maximum buffer size.
    #[error("token too large (exceeds {max} bytes)")]
    TokenTooLarge { max: usize },

    /// The source kept returning zero bytes without signalling end of stream.
    #[error("source made no progress after {attempts} consecutive empty reads")]
    NoProgress { attempts: usize },

    /// The source reported a read failure.
    #[error("source I/O error: {0}")]
    Io(#[source] Arc<std::io::Error>),

    /// The split function kept yielding tokens at end of stream without consuming input.
    #[error(
        "split function returned {attempts} empty results without progressing at end of stream"
    )]
    BoundaryContractViolation { attempts: usize },

    /// The split function asked to consume more bytes than it was given.
    #[error("split function advanced {advance} bytes with only {available} buffered")]
    AdvanceTooFar { advance: usize, available: usize },

    /// The source reported reading more bytes than the region it was handed.
    #[error("source returned invalid read count {count} for a {capacity}-byte region")]
    BadReadCount { count: usize, capacity: usize },

    /// A caller-supplied split function failed.
    #[error("split error: {0}")]
    Split(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl ScanError {
    /// Wrap a custom split-function error.
    pub fn split(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Split(Arc::from(err.into()))
    }
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
