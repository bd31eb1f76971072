use bytes::Bytes;
use chrono::NaiveDateTime;

use crate::separator::{find_separator, Separator};
use crate::timestamp::parse_ctime;

/// One message copied out of an mbox stream.
///
/// Holds the separator line and everything up to the next separator.
/// [`content`](Self::content) is what a message parser expects: the RFC 2822
/// headers and body without the mbox envelope line.
#[derive(Debug, Clone)]
pub struct Message {
    index: usize,
    offset: u64,
    raw: Bytes,
    separator: Option<Separator>,
}

impl Message {
    /// Wrap raw message bytes that start with a separator line.
    pub fn new(index: usize, offset: u64, raw: impl Into<Bytes>) -> Self {
        let raw = raw.into();
        let separator = find_separator(&raw).filter(|sep| sep.start == 0);
        Self {
            index,
            offset,
            raw,
            separator,
        }
    }

    /// Zero-based position of the message in the archive.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Byte offset of the separator line in the archive.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Size in bytes, separator line included.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True for a zero-length message.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The whole message, separator line included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Take the raw bytes.
    pub fn into_bytes(self) -> Bytes {
        self.raw
    }

    /// The separator line without its EOL marker.
    pub fn separator_line(&self) -> &[u8] {
        match &self.separator {
            Some(sep) => &self.raw[..sep.timestamp.end],
            None => &[],
        }
    }

    /// Headers and body following the separator line.
    pub fn content(&self) -> Bytes {
        let start = self.separator.as_ref().map_or(0, Separator::end);
        self.raw.slice(start..)
    }

    /// Envelope sender from the separator line.
    pub fn sender(&self) -> Option<&[u8]> {
        let sep = self.separator.as_ref()?;
        Some(&self.raw[sep.sender.clone()])
    }

    /// Envelope date from the separator line.
    pub fn date(&self) -> Option<NaiveDateTime> {
        let sep = self.separator.as_ref()?;
        parse_ctime(&self.raw[sep.timestamp.clone()])
    }
}
