use std::io::Read;

use bytes::Bytes;
use mboxscan_scanner::{
    ByteSource, ReaderSource, Result, ScanError, Scanner, ScannerConfig, DEFAULT_MAX_TOKEN_SIZE,
};
use tracing::trace;

use crate::message::Message;
use crate::separator::MAX_SEPARATOR_LEN;
use crate::splitter::MessageSplitter;

/// Configuration for an [`MboxReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MboxConfig {
    /// Largest message, its own separator line included. Default: 4 MiB.
    ///
    /// The reader buffers up to [`MAX_SEPARATOR_LEN`] bytes more so it can see
    /// the separator that ends a message of exactly this size.
    pub max_message_size: usize,
}

impl Default for MboxConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_TOKEN_SIZE,
        }
    }
}

impl From<MboxConfig> for ScannerConfig {
    fn from(config: MboxConfig) -> Self {
        ScannerConfig::with_max_token_size(config.max_message_size)
            .with_lookahead(MAX_SEPARATOR_LEN)
    }
}

/// Iterates over the messages of an mbox stream.
///
/// Each message is copied out of the scan buffer, so it stays valid after the
/// reader moves on. The first error is yielded once and ends the iteration;
/// the scanner keeps it as [`last_error`](Scanner::last_error).
pub struct MboxReader<S> {
    scanner: Scanner<S, MessageSplitter>,
    index: usize,
    reported: bool,
}

impl<R: Read> MboxReader<ReaderSource<R>> {
    /// Read messages from any [`Read`] stream with default configuration.
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReaderSource::new(reader))
    }
}

impl<S: ByteSource> MboxReader<S> {
    /// Read messages from a byte source with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, MboxConfig::default())
    }

    /// Read messages from a byte source with explicit configuration.
    pub fn with_config(source: S, config: MboxConfig) -> Self {
        Self::with_scanner_config(source, config.into())
    }

    /// Read messages with full control over the scanner.
    pub fn with_scanner_config(source: S, config: ScannerConfig) -> Self {
        Self {
            scanner: Scanner::with_config(source, MessageSplitter, config),
            index: 0,
            reported: false,
        }
    }

    /// Read the next message.
    ///
    /// Returns `Ok(None)` at a clean end of stream.
    pub fn read_message(&mut self) -> Result<Option<Message>> {
        if self.scanner.advance() {
            let raw = Bytes::copy_from_slice(self.scanner.token());
            let message = Message::new(self.index, self.scanner.token_offset(), raw);
            trace!(
                index = message.index(),
                offset = message.offset(),
                len = message.len(),
                "message"
            );
            self.index += 1;
            return Ok(Some(message));
        }
        match self.scanner.last_error() {
            Some(err) if !self.reported => {
                self.reported = true;
                Err(err.clone())
            }
            _ => Ok(None),
        }
    }

    /// Number of messages read so far.
    pub fn messages_read(&self) -> usize {
        self.index
    }

    /// Borrow the underlying scanner.
    pub fn scanner(&self) -> &Scanner<S, MessageSplitter> {
        &self.scanner
    }

    /// Mutably borrow the underlying scanner, e.g. to read tokens without copying.
    pub fn scanner_mut(&mut self) -> &mut Scanner<S, MessageSplitter> {
        &mut self.scanner
    }

    /// Consume the reader and return the byte source.
    pub fn into_inner(self) -> S {
        self.scanner.into_inner()
    }
}

impl<S: ByteSource> Iterator for MboxReader<S> {
    type Item = std::result::Result<Message, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_message().transpose()
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for MboxReader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MboxReader")
            .field("scanner", &self.scanner)
            .field("index", &self.index)
            .field("reported", &self.reported)
            .finish()
    }
}
