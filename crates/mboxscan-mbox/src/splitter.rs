use mboxscan_scanner::{Decision, Result, ScanError, Split};
use tracing::debug;

use crate::separator::find_separator;

/// Splits an mbox stream into messages.
///
/// Each token runs from a separator line up to, but not including, the next
/// separator line, or to the end of the stream. Bytes before the first
/// recognized separator are consumed and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageSplitter;

impl Split for MessageSplitter {
    fn split(&mut self, data: &[u8], at_eof: bool) -> Result<Decision> {
        if at_eof && data.is_empty() {
            return Ok(Decision::need_more());
        }

        let Some(separator) = find_separator(data) else {
            if at_eof {
                return Err(ScanError::UnexpectedEndOfStream);
            }
            return Ok(Decision::need_more());
        };

        let body_start = separator.end();
        let end = match find_separator(&data[body_start..]) {
            Some(next) => body_start + next.start,
            None if at_eof => data.len(),
            None => return Ok(Decision::need_more()),
        };

        if separator.start > 0 {
            debug!(bytes = separator.start, "dropping bytes before separator");
        }
        Ok(Decision::token(end, separator.start..end))
    }
}
