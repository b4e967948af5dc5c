use std::{
    fmt,
    io::{Cursor, ErrorKind, Read},
};

use bytes::{Bytes, BytesMut};

use crate::error::NetResult;

/// Readable body of an in-flight response.
///
/// Dropping the body releases the underlying connection.
pub struct Body {
    reader: Box<dyn Read + Send>,
}

impl Body {
    pub fn new<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    pub fn from_bytes<B: Into<Bytes>>(bytes: B) -> Self {
        Self::new(Cursor::new(bytes.into()))
    }

    pub fn empty() -> Self {
        Self::from_bytes(Bytes::new())
    }

    /// Turn the body into a chunk iterator yielding at most `chunk_size` bytes per item.
    ///
    /// Chunks are as large as whatever the source delivers in one read, so a
    /// slow socket produces short chunks.
    pub fn into_chunks(self, chunk_size: usize) -> ByteChunks {
        let chunk_size = chunk_size.max(1);
        ByteChunks {
            reader: self.reader,
            chunk_size,
            scratch: Vec::new(),
            done: false,
        }
    }

    /// Drain the rest of the body.
    pub fn read_to_end(self) -> NetResult<Bytes> {
        self.into_chunks(DRAIN_CHUNK_SIZE).drain()
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").finish_non_exhaustive()
    }
}

const DRAIN_CHUNK_SIZE: usize = 64 * 1024;

/// Lazy, finite sequence of byte fragments pulled from a [`Body`].
///
/// Ends at the first zero-length read and stays ended after yielding an error.
pub struct ByteChunks {
    reader: Box<dyn Read + Send>,
    chunk_size: usize,
    scratch: Vec<u8>,
    done: bool,
}

impl ByteChunks {
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn is_exhausted(&self) -> bool {
        self.done
    }

    /// Concatenate every remaining chunk.
    pub fn drain(&mut self) -> NetResult<Bytes> {
        let mut out = BytesMut::new();
        for chunk in self.by_ref() {
            out.extend_from_slice(&chunk?);
        }
        Ok(out.freeze())
    }
}

impl Iterator for ByteChunks {
    type Item = NetResult<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.scratch.resize(self.chunk_size, 0);
        loop {
            match self.reader.read(&mut self.scratch) {
                Ok(0) => {
                    self.done = true;
                    self.scratch = Vec::new();
                    return None;
                }
                Ok(n) => return Some(Ok(Bytes::copy_from_slice(&self.scratch[..n]))),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

impl fmt::Debug for ByteChunks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteChunks")
            .field("chunk_size", &self.chunk_size)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::NetError;

    /// Reader that hands out at most `step` bytes per call, interrupting once first.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
        interrupted: bool,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[rstest]
    #[case::larger_than_source(1024, vec![b"abcdefghij".as_slice()])]
    #[case::exact(5, vec![b"abcde".as_slice(), b"fghij".as_slice()])]
    #[case::uneven(4, vec![b"abcd".as_slice(), b"efgh".as_slice(), b"ij".as_slice()])]
    fn test_chunks_respect_chunk_size(#[case] chunk_size: usize, #[case] expected: Vec<&[u8]>) {
        let chunks: Vec<Bytes> = Body::from_bytes(&b"abcdefghij"[..])
            .into_chunks(chunk_size)
            .collect::<NetResult<_>>()
            .unwrap();

        assert_eq!(chunks, expected);
    }

    #[test]
    fn test_chunks_follow_source_delivery_and_skip_interrupts() {
        let body = Body::new(Trickle {
            data: b"abcdefghij".to_vec(),
            pos: 0,
            step: 3,
            interrupted: false,
        });

        let sizes: Vec<usize> = body
            .into_chunks(128)
            .map(|c| c.unwrap().len())
            .collect();

        assert_eq!(sizes, vec![3, 3, 3, 1]);
    }

    #[test]
    fn test_chunks_fuse_after_error() {
        let mut chunks = Body::new(Failing).into_chunks(16);

        assert!(matches!(chunks.next(), Some(Err(NetError::Body(_)))));
        assert!(chunks.is_exhausted());
        assert!(chunks.next().is_none());
    }

    #[test]
    fn test_read_to_end() {
        let bytes = Body::from_bytes(vec![7u8; 200_000]).read_to_end().unwrap();
        assert_eq!(bytes.len(), 200_000);
        assert!(Body::empty().read_to_end().unwrap().is_empty());
    }

    #[test]
    fn test_zero_chunk_size_is_raised_to_one() {
        let chunks = Body::from_bytes(&b"ab"[..]).into_chunks(0);
        assert_eq!(chunks.chunk_size(), 1);
        assert_eq!(chunks.count(), 2);
    }
}
