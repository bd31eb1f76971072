use std::ops::Range;

use crate::error::Result;

/// What a split function decided about the buffered bytes.
///
/// `token` is a range into the slice the split function was given. A decision
/// with no token and `advance == 0` asks for more data, or ends the scan
/// cleanly when the source is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decision {
    /// Bytes to consume from the front of the buffered data.
    pub advance: usize,
    /// Token to yield, relative to the buffered data.
    pub token: Option<Range<usize>>,
    /// Stop scanning after yielding `token`.
    pub final_token: bool,
}

impl Decision {
    /// Nothing can be decided yet (or, at end of stream, nothing is left).
    pub fn need_more() -> Self {
        Self::default()
    }

    /// Consume `advance` bytes without yielding a token.
    pub fn skip(advance: usize) -> Self {
        Self {
            advance,
            ..Self::default()
        }
    }

    /// Consume `advance` bytes and yield `token`.
    pub fn token(advance: usize, token: Range<usize>) -> Self {
        Self {
            advance,
            token: Some(token),
            final_token: false,
        }
    }

    /// Consume `advance` bytes, yield `token`, then stop without error.
    pub fn final_token(advance: usize, token: Range<usize>) -> Self {
        Self {
            advance,
            token: Some(token),
            final_token: true,
        }
    }
}

/// A pluggable boundary function.
///
/// Given the unconsumed bytes and whether the source is exhausted, decide how
/// many bytes to consume and which of them form the next token.
pub trait Split {
    /// Decide where the next token ends.
    fn split(&mut self, data: &[u8], at_eof: bool) -> Result<Decision>;
}

impl<F> Split for F
where
    F: FnMut(&[u8], bool) -> Result<Decision>,
{
    fn split(&mut self, data: &[u8], at_eof: bool) -> Result<Decision> {
        self(data, at_eof)
    }
}

/// Splits on LF, dropping an optional trailing CR. A final unterminated line
/// is yielded at end of stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanLines;

impl Split for ScanLines {
    fn split(&mut self, data: &[u8], at_eof: bool) -> Result<Decision> {
        if at_eof && data.is_empty() {
            return Ok(Decision::need_more());
        }
        if let Some(i) = data.iter().position(|&b| b == b'\n') {
            return Ok(Decision::token(i + 1, 0..drop_cr(data, i)));
        }
        if at_eof {
            return Ok(Decision::token(data.len(), 0..drop_cr(data, data.len())));
        }
        Ok(Decision::need_more())
    }
}

fn drop_cr(data: &[u8], end: usize) -> usize {
    if end > 0 && data[end - 1] == b'\r' {
        end - 1
    } else {
        end
    }
}
