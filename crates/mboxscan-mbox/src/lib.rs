//! RFC 4155 "default" mbox splitting.
//!
//! Every message in an mbox archive starts with a separator line:
//!
//! ```text
//! From <addr-spec> <Www Mmm DD HH:MM:SS YYYY><LF | CRLF>
//! ```
//!
//! [`find_separator`] recognizes that line byte-exactly, skipping incidental
//! `From ` occurrences inside message bodies. [`MessageSplitter`] plugs the
//! grammar into a [`Scanner`](mboxscan_scanner::Scanner), and [`MboxReader`]
//! wraps the scanner into an iterator of owned [`Message`]s.

pub mod addr;
pub mod message;
pub mod reader;
pub mod separator;
pub mod splitter;
pub mod timestamp;

pub use message::Message;
pub use reader::{MboxConfig, MboxReader};
pub use separator::{find_separator, Separator, MAX_SEPARATOR_LEN, SEPARATOR_PREFIX};
pub use splitter::MessageSplitter;

pub use mboxscan_scanner::{Result, ScanError};
