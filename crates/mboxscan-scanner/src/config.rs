/// Default maximum token size: 4 MiB.
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 4 * 1024 * 1024;

/// Buffer size allocated on the first read.
pub const INITIAL_BUFFER_SIZE: usize = 4 * 1024;

/// Upper bound on a single read from the source.
pub const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Zero-byte reads tolerated before the source is declared stuck.
pub const MAX_CONSECUTIVE_EMPTY_READS: usize = 100;

/// Non-progressing tokens at end of stream tolerated before the split function is declared broken.
pub const MAX_CONSECUTIVE_EMPTY_TOKENS: usize = 100;

/// Configuration for a [`Scanner`](crate::Scanner).
///
/// The buffer holds at most `max_token_size + lookahead` bytes. Lookahead is
/// room for the split function to see past the end of a token, e.g. the next
/// delimiter, without that delimiter counting against the token ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Ceiling for a single token. Default: 4 MiB.
    pub max_token_size: usize,
    /// Extra buffer beyond `max_token_size` for boundary detection. Default: 0.
    pub lookahead: usize,
    /// Size of the first allocation. Clamped to the buffer limit.
    pub initial_buffer_size: usize,
    /// Largest region handed to the source in one read.
    pub read_chunk_size: usize,
    /// Consecutive zero-byte reads before [`ScanError::NoProgress`](crate::ScanError::NoProgress).
    pub max_empty_reads: usize,
    /// Consecutive non-progressing tokens at EOF before
    /// [`ScanError::BoundaryContractViolation`](crate::ScanError::BoundaryContractViolation).
    pub max_empty_tokens: usize,
}

impl ScannerConfig {
    /// Default configuration with an explicit token ceiling.
    pub fn with_max_token_size(max_token_size: usize) -> Self {
        Self {
            max_token_size,
            ..Self::default()
        }
    }

    /// Builder-style setter for [`lookahead`](Self::lookahead).
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Largest number of unconsumed bytes the scanner will buffer.
    pub fn buffer_limit(&self) -> usize {
        self.max_token_size.saturating_add(self.lookahead)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_token_size: DEFAULT_MAX_TOKEN_SIZE,
            lookahead: 0,
            initial_buffer_size: INITIAL_BUFFER_SIZE,
            read_chunk_size: READ_CHUNK_SIZE,
            max_empty_reads: MAX_CONSECUTIVE_EMPTY_READS,
            max_empty_tokens: MAX_CONSECUTIVE_EMPTY_TOKENS,
        }
    }
}
