use std::io::{BufRead, Seek};

use bytes::Bytes;

use crate::{
    error::{StreamError, StreamResult},
    whence::Whence,
};

/// File-like read-only byte stream.
///
/// Every implementor is also `BufRead + Seek`, so decoders and archive readers
/// can sit directly on top of a boxed `dyn StreamReader`.
pub trait StreamReader: BufRead + Seek {
    /// Read up to `limit` bytes, or everything that remains when `limit` is `None`.
    ///
    /// A short (or empty) result means the end of the resource was reached.
    /// Draining with `None` holds the whole remainder in memory.
    fn read_bytes(&mut self, limit: Option<usize>) -> StreamResult<Bytes>;

    /// Read up to `buf.len()` bytes into `buf`. `Ok(0)` signals end of stream.
    fn read_into(&mut self, buf: &mut [u8]) -> StreamResult<usize> {
        let data = self.read_bytes(Some(buf.len()))?;
        buf[..data.len()].copy_from_slice(&data);
        Ok(data.len())
    }

    /// Move the read position and return it.
    fn seek_to(&mut self, offset: i64, whence: Whence) -> StreamResult<u64>;

    /// [`seek_to`](Self::seek_to) with a numeric whence (0 start, 1 current, 2 end).
    fn seek_whence(&mut self, offset: i64, whence: i32) -> StreamResult<u64> {
        let whence = Whence::try_from(whence)?;
        self.seek_to(offset, whence)
    }

    fn tell(&self) -> StreamResult<u64>;

    fn seekable(&self) -> bool;

    fn readable(&self) -> bool {
        true
    }

    fn truncate(&mut self, _size: Option<u64>) -> StreamResult<u64> {
        Err(StreamError::Unsupported("truncate"))
    }

    fn write(&mut self, _data: &[u8]) -> StreamResult<usize> {
        Err(StreamError::Unsupported("write"))
    }

    /// Drop the underlying handle. Reads afterwards return empty (lenient) or
    /// [`StreamError::Closed`].
    fn close(&mut self);

    fn closed(&self) -> bool;
}
