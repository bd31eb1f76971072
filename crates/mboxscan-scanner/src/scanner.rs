use std::io::Read;
use std::ops::Range;

use tracing::{debug, trace, warn};

use crate::buffer::Buffer;
use crate::config::ScannerConfig;
use crate::error::ScanError;
use crate::source::{ByteSource, ReaderSource, SourceState};
use crate::split::{ScanLines, Split};

/// Outcome of one split call.
enum Step {
    Token { final_token: bool },
    Skipped,
    NeedMore,
}

/// Pull-based tokenizer over a [`ByteSource`].
///
/// Call [`advance`](Self::advance) until it returns `false`, reading each
/// token with [`token`](Self::token). When scanning stops,
/// [`last_error`](Self::last_error) tells a clean end of stream apart from a
/// failure.
///
/// ```
/// use mboxscan_scanner::{ReaderSource, Scanner};
///
/// let mut scanner = Scanner::new(ReaderSource::new(&b"one\ntwo\n"[..]));
/// let mut lines = Vec::new();
/// while scanner.advance() {
///     lines.push(scanner.token().to_vec());
/// }
/// assert!(scanner.last_error().is_none());
/// assert_eq!(lines, [b"one".to_vec(), b"two".to_vec()]);
/// ```
pub struct Scanner<S, F = ScanLines> {
    source: S,
    split: F,
    config: ScannerConfig,
    buffer: Buffer,
    token: Range<usize>,
    token_offset: u64,
    eof: bool,
    done: bool,
    err: Option<ScanError>,
    pending: Option<std::io::Error>,
    empty_reads: usize,
    empty_tokens: usize,
}

impl<S: ByteSource> Scanner<S, ScanLines> {
    /// Create a line scanner with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_split(source, ScanLines)
    }
}

impl<R: Read, F: Split> Scanner<ReaderSource<R>, F> {
    /// Create a scanner over any [`Read`] stream.
    pub fn from_reader(reader: R, split: F) -> Self {
        Self::with_split(ReaderSource::new(reader), split)
    }
}

impl<S: ByteSource, F: Split> Scanner<S, F> {
    /// Create a scanner with an explicit split function and default configuration.
    pub fn with_split(source: S, split: F) -> Self {
        Self::with_config(source, split, ScannerConfig::default())
    }

    /// Create a scanner with explicit split function and configuration.
    pub fn with_config(source: S, split: F, config: ScannerConfig) -> Self {
        Self {
            source,
            split,
            config,
            buffer: Buffer::new(config.buffer_limit()),
            token: 0..0,
            token_offset: 0,
            eof: false,
            done: false,
            err: None,
            pending: None,
            empty_reads: 0,
            empty_tokens: 0,
        }
    }

    /// Produce the next token.
    ///
    /// Returns `false` once scanning has permanently stopped, either at a
    /// clean end of stream or on a sticky error.
    pub fn advance(&mut self) -> bool {
        self.token = 0..0;
        if self.done {
            return false;
        }

        loop {
            if !self.buffer.is_empty() || self.eof {
                match self.try_split() {
                    Ok(Step::Token { final_token }) => {
                        if final_token {
                            self.done = true;
                        }
                        return true;
                    }
                    Ok(Step::Skipped) => continue,
                    Ok(Step::NeedMore) if self.eof => {
                        self.done = true;
                        return false;
                    }
                    Ok(Step::NeedMore) => {}
                    Err(err) => return self.fail(err),
                }
            }

            if let Some(err) = self.pending.take() {
                return self.fail(ScanError::from(err));
            }

            if let Err(err) = self.fill() {
                return self.fail(err);
            }
        }
    }

    /// The most recent token. Empty after `advance` returns `false`.
    pub fn token(&self) -> &[u8] {
        self.buffer.slice(self.token.clone())
    }

    /// Stream offset of the first byte of the most recent token.
    pub fn token_offset(&self) -> u64 {
        self.token_offset
    }

    /// The sticky error, if scanning stopped on one.
    pub fn last_error(&self) -> Option<&ScanError> {
        self.err.as_ref()
    }

    /// True once `advance` can no longer return `true`.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Current buffer allocation.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Current scanner configuration.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the underlying source.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consume the scanner and return the source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Run the split function once over the unconsumed bytes.
    fn try_split(&mut self) -> Result<Step, ScanError> {
        let available = self.buffer.len();
        let decision = self.split.split(self.buffer.data(), self.eof)?;

        if decision.advance > available {
            return Err(ScanError::AdvanceTooFar {
                advance: decision.advance,
                available,
            });
        }
        if let Some(token) = &decision.token {
            if token.start > token.end || token.end > available {
                return Err(ScanError::AdvanceTooFar {
                    advance: token.end,
                    available,
                });
            }
            // Only reachable with lookahead: the buffer may hold more than one token's worth.
            if token.len() > self.config.max_token_size {
                return Err(ScanError::TokenTooLarge {
                    max: self.config.max_token_size,
                });
            }
        }

        let base = self.buffer.start();
        self.buffer.consume(decision.advance);

        let Some(token) = decision.token else {
            if decision.advance == 0 {
                return Ok(Step::NeedMore);
            }
            self.empty_tokens = 0;
            return Ok(Step::Skipped);
        };

        if self.eof && decision.advance == 0 {
            self.empty_tokens += 1;
            if self.empty_tokens > self.config.max_empty_tokens {
                return Err(ScanError::BoundaryContractViolation {
                    attempts: self.empty_tokens,
                });
            }
        } else {
            self.empty_tokens = 0;
        }

        self.token = base + token.start..base + token.end;
        self.token_offset = self.buffer.stream_offset(base + token.start);
        Ok(Step::Token {
            final_token: decision.final_token,
        })
    }

    /// Read one chunk from the source into the buffer.
    fn fill(&mut self) -> Result<(), ScanError> {
        let max = self.config.max_token_size;
        let fill = if self.buffer.make_room(self.config.initial_buffer_size) {
            let spare = self.buffer.spare_mut(self.config.read_chunk_size.max(1));
            let capacity = spare.len();
            let fill = self.source.read_chunk(spare);
            if fill.len > capacity {
                return Err(ScanError::BadReadCount {
                    count: fill.len,
                    capacity,
                });
            }
            self.buffer.commit(fill.len);
            fill
        } else {
            // Full at the ceiling: the token fits only if the source is already done.
            let mut probe = [0u8; 1];
            let fill = self.source.read_chunk(&mut probe);
            if fill.len > probe.len() {
                return Err(ScanError::BadReadCount {
                    count: fill.len,
                    capacity: probe.len(),
                });
            }
            if fill.len > 0 {
                return Err(ScanError::TokenTooLarge { max });
            }
            fill
        };

        trace!(len = fill.len, buffered = self.buffer.len(), "read chunk");

        match fill.state {
            SourceState::Open if fill.len == 0 => {
                self.empty_reads += 1;
                if self.empty_reads > self.config.max_empty_reads {
                    return Err(ScanError::NoProgress {
                        attempts: self.empty_reads,
                    });
                }
            }
            SourceState::Open => self.empty_reads = 0,
            SourceState::Exhausted => {
                debug!(buffered = self.buffer.len(), "source exhausted");
                self.empty_reads = 0;
                self.eof = true;
            }
            SourceState::Failed(err) => {
                debug!(error = %err, buffered = self.buffer.len(), "source read failed");
                self.empty_reads = 0;
                self.pending = Some(err);
            }
        }
        Ok(())
    }

    fn fail(&mut self, err: ScanError) -> bool {
        warn!(error = %err, "scanner stopped");
        if self.err.is_none() {
            self.err = Some(err);
        }
        self.done = true;
        self.token = 0..0;
        false
    }
}

impl<S: std::fmt::Debug, F> std::fmt::Debug for Scanner<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("source", &self.source)
            .field("config", &self.config)
            .field("buffered", &self.buffer.len())
            .field("eof", &self.eof)
            .field("done", &self.done)
            .field("err", &self.err)
            .finish()
    }
}
