use std::ops::Range;

use crate::addr::is_addr_spec;
use crate::timestamp::{is_ctime, CTIME_LEN};

/// Literal that opens every separator line.
pub const SEPARATOR_PREFIX: &[u8; 5] = b"From ";

/// Longest `addr-spec` an SMTP path can carry (RFC 5321 section 4.5.3.1.3).
pub const MAX_ADDR_SPEC_LEN: usize = 254;

/// Longest separator line, CRLF included, with an address of at most
/// [`MAX_ADDR_SPEC_LEN`] bytes.
pub const MAX_SEPARATOR_LEN: usize =
    SEPARATOR_PREFIX.len() + MAX_ADDR_SPEC_LEN + 1 + CTIME_LEN + 2;

/// A recognized separator line, relative to the searched data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    /// Offset of the `F` in `From `.
    pub start: usize,
    /// Length through the end of the EOL marker (LF or CRLF).
    pub len: usize,
    /// The envelope sender (`addr-spec`).
    pub sender: Range<usize>,
    /// The ctime timestamp, without EOL.
    pub timestamp: Range<usize>,
}

impl Separator {
    /// Offset just past the EOL marker.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Width of the EOL marker: 1 for LF, 2 for CRLF.
    pub fn eol_len(&self) -> usize {
        self.end() - self.timestamp.end
    }
}

/// Find the left-most RFC 4155 separator line in `data`.
///
/// A candidate with an invalid address or timestamp is skipped and the search
/// resumes just past the address. A candidate with no space after the address,
/// or no LF after it, ends the search with `None`.
pub fn find_separator(data: &[u8]) -> Option<Separator> {
    let mut offset = 0;
    loop {
        let span = &data[offset..];

        let start = span
            .windows(SEPARATOR_PREFIX.len())
            .position(|window| window == SEPARATOR_PREFIX)?;
        let addr_start = start + SEPARATOR_PREFIX.len();
        let addr_end = addr_start + span[addr_start..].iter().position(|&b| b == b' ')?;
        let time_start = addr_end + 1;

        if !is_addr_spec(&span[addr_start..addr_end]) {
            offset += time_start;
            continue;
        }

        let lf = time_start + span[time_start..].iter().position(|&b| b == b'\n')?;
        let time_end = if span[lf - 1] == b'\r' { lf - 1 } else { lf };

        if !is_ctime(&span[time_start..time_end]) {
            offset += time_start;
            continue;
        }

        return Some(Separator {
            start: offset + start,
            len: lf + 1 - start,
            sender: offset + addr_start..offset + addr_end,
            timestamp: offset + time_start..offset + time_end,
        });
    }
}
