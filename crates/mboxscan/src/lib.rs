//! Streaming, bounded-memory splitting of mbox archives into messages.
//!
//! mboxscan reads an mbox stream incrementally and yields one message at a
//! time, recognizing RFC 4155 separator lines (`From <addr-spec> <ctime>`)
//! without ever holding more than one message in memory.
//!
//! # Crate Structure
//!
//! - [`scanner`]: format-agnostic incremental tokenizer with a pluggable split function
//! - [`mbox`]: separator grammar, message splitter and owned-message reader
//!
//! ```
//! use mboxscan::mbox::MboxReader;
//!
//! let archive = b"From a@b Mon Apr 20 02:27:10 2015\nSubject: hi\n\nbody\n";
//! let messages: Vec<_> = MboxReader::from_reader(&archive[..])
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(messages.len(), 1);
//! assert_eq!(messages[0].content().as_ref(), b"Subject: hi\n\nbody\n");
//! ```

/// Re-export tokenizer types.
pub mod scanner {
    pub use mboxscan_scanner::*;
}

/// Re-export mbox types.
pub mod mbox {
    pub use mboxscan_mbox::*;
}
