//! A reader that hands out data in small steps, like a slow socket.

use std::io::{self, Read};

use bytes::Bytes;

/// Yields at most `step` bytes per `read` call, optionally failing once
/// `fail_after` bytes have been delivered.
#[derive(Clone, Debug)]
pub struct TrickleReader {
    data: Bytes,
    pos: usize,
    step: usize,
    fail_after: Option<usize>,
}

impl TrickleReader {
    #[must_use]
    pub fn new<B: Into<Bytes>>(data: B, step: usize) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            step: step.max(1),
            fail_after: None,
        }
    }

    /// Return `ConnectionReset` on every read after `n` bytes.
    #[must_use]
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut end = self.data.len();
        if let Some(limit) = self.fail_after {
            if self.pos >= limit {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
            }
            end = end.min(limit);
        }

        let n = buf.len().min(self.step).min(end - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
