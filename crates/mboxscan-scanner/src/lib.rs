//! Bounded-memory incremental tokenizer.
//!
//! This is the format-agnostic layer of mboxscan. A [`Scanner`] owns a
//! growable buffer, pulls bytes from a [`ByteSource`] in bounded chunks and
//! asks a pluggable [`Split`] implementation where the next token ends:
//! - The buffer grows geometrically up to [`ScannerConfig::max_token_size`]
//! - Sources that never make progress are detected and reported
//! - Errors are sticky: once recorded, no further tokens are produced
//!
//! Tokens are borrowed from the scanner's buffer and cannot outlive the next
//! call to [`Scanner::advance`]. Copy them out if they need to persist.

pub mod buffer;
pub mod config;
pub mod error;
pub mod scanner;
pub mod source;
pub mod split;

pub use config::{
    ScannerConfig, DEFAULT_MAX_TOKEN_SIZE, INITIAL_BUFFER_SIZE, MAX_CONSECUTIVE_EMPTY_READS,
    MAX_CONSECUTIVE_EMPTY_TOKENS, READ_CHUNK_SIZE,
};
pub use error::{Result, ScanError};
pub use scanner::Scanner;
pub use source::{ByteSource, Fill, ReaderSource, SourceState};
pub use split::{Decision, ScanLines, Split};
