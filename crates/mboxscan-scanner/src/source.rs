use std::io::{ErrorKind, Read};

/// State of a [`ByteSource`] after a read.
#[derive(Debug)]
pub enum SourceState {
    /// More data may follow.
    Open,
    /// The source will never deliver more bytes. Bytes returned with this
    /// state are still valid.
    Exhausted,
    /// The read failed. Bytes returned with this state are still valid.
    Failed(std::io::Error),
}

/// Result of one [`ByteSource::read_chunk`] call.
#[derive(Debug)]
pub struct Fill {
    /// Number of bytes written to the front of the region.
    pub len: usize,
    /// What the source knows about its future.
    pub state: SourceState,
}

impl Fill {
    /// `len` bytes were read and more may follow.
    pub fn open(len: usize) -> Self {
        Self {
            len,
            state: SourceState::Open,
        }
    }

    /// `len` trailing bytes were read and the source is done.
    pub fn exhausted(len: usize) -> Self {
        Self {
            len,
            state: SourceState::Exhausted,
        }
    }

    /// `len` bytes were read before the source failed.
    pub fn failed(len: usize, err: std::io::Error) -> Self {
        Self {
            len,
            state: SourceState::Failed(err),
        }
    }
}

/// Anything that can be read incrementally in bounded chunks.
///
/// Implementations must tolerate small regions: the scanner never assumes a
/// minimum read size, and probes with a single byte when its buffer is full.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes into the front of `buf`.
    fn read_chunk(&mut self, buf: &mut [u8]) -> Fill;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_chunk(&mut self, buf: &mut [u8]) -> Fill {
        (**self).read_chunk(buf)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> Fill {
        (**self).read_chunk(buf)
    }
}

/// Adapts any [`Read`] stream into a [`ByteSource`].
///
/// `Ok(0)` on a non-empty region means end of stream. Interrupted reads are
/// retried; every other error is reported as [`SourceState::Failed`].
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Borrow the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrow the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consume the adapter and return the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> Fill {
        if buf.is_empty() {
            return Fill::open(0);
        }
        loop {
            match self.inner.read(buf) {
                Ok(0) => return Fill::exhausted(0),
                Ok(n) => return Fill::open(n),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Fill::failed(0, err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reader_source_reports_exhaustion() {
        let mut source = ReaderSource::new(Cursor::new(b"abc".to_vec()));
        let mut buf = [0u8; 8];

        let fill = source.read_chunk(&mut buf);
        assert_eq!(fill.len, 3);
        assert!(matches!(fill.state, SourceState::Open));
        assert_eq!(&buf[..3], b"abc");

        let fill = source.read_chunk(&mut buf);
        assert_eq!(fill.len, 0);
        assert!(matches!(fill.state, SourceState::Exhausted));
    }

    #[test]
    fn reader_source_empty_region_is_not_eof() {
        let mut source = ReaderSource::new(Cursor::new(b"abc".to_vec()));
        let fill = source.read_chunk(&mut []);
        assert_eq!(fill.len, 0);
        assert!(matches!(fill.state, SourceState::Open));
    }

    #[test]
    fn reader_source_retries_interrupted() {
        let mut source = ReaderSource::new(InterruptedOnce {
            interrupted: false,
            data: Cursor::new(b"ok".to_vec()),
        });
        let mut buf = [0u8; 4];
        let fill = source.read_chunk(&mut buf);
        assert_eq!(fill.len, 2);
        assert!(source.get_ref().interrupted);
    }

    #[test]
    fn reader_source_reports_failure() {
        let mut source = ReaderSource::new(AlwaysFails);
        let mut buf = [0u8; 4];
        let fill = source.read_chunk(&mut buf);
        assert_eq!(fill.len, 0);
        assert!(
            matches!(fill.state, SourceState::Failed(ref e) if e.kind() == ErrorKind::UnexpectedEof)
        );
    }

    struct InterruptedOnce {
        interrupted: bool,
        data: Cursor<Vec<u8>>,
    }

    impl Read for InterruptedOnce {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.read(buf)
        }
    }

    struct AlwaysFails;

    impl Read for AlwaysFails {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::UnexpectedEof))
        }
    }
}
