//! Chunk-buffered reading shared by both reader flavours.
//!
//! Invariant: `buf` followed by whatever the active chunk source has not yet
//! yielded is exactly the resource from `position` to its end.

use bytes::{Buf, Bytes, BytesMut};
use remio_net::{Body, ByteChunks, NetResult};
use tracing::{trace, warn};

use crate::{
    error::{StreamError, StreamResult},
    options::ReaderOptions,
};

/// Live handle. The chunk iterator is only built on the first pull.
struct Active {
    pending: Option<Body>,
    chunks: Option<ByteChunks>,
}

impl Active {
    fn new(body: Body) -> Self {
        Self {
            pending: Some(body),
            chunks: None,
        }
    }

    fn chunks(&mut self, chunk_size: usize) -> &mut ByteChunks {
        let pending = &mut self.pending;
        self.chunks.get_or_insert_with(|| {
            pending
                .take()
                .unwrap_or_else(Body::empty)
                .into_chunks(chunk_size)
        })
    }
}

enum HandleState {
    Active(Active),
    /// The last re-request failed; no handle until the next successful seek.
    Broken,
    Closed,
}

pub(crate) struct ChunkBuffer {
    state: HandleState,
    buf: BytesMut,
    position: u64,
    chunk_size: usize,
    lenient_eof: bool,
}

impl ChunkBuffer {
    pub(crate) fn new(body: Body, options: &ReaderOptions) -> Self {
        Self {
            state: HandleState::Active(Active::new(body)),
            buf: BytesMut::new(),
            position: 0,
            chunk_size: options.chunk_size(),
            lenient_eof: options.lenient_eof,
        }
    }

    pub(crate) fn position(&self) -> u64 {
        self.position
    }

    pub(crate) fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn is_broken(&self) -> bool {
        matches!(self.state, HandleState::Broken)
    }

    pub(crate) fn is_closed(&self) -> bool {
        matches!(self.state, HandleState::Closed)
    }

    /// Install a freshly opened body positioned at `position`.
    pub(crate) fn replace(&mut self, body: Body, position: u64) {
        self.buf.clear();
        self.state = HandleState::Active(Active::new(body));
        self.position = position;
    }

    pub(crate) fn mark_broken(&mut self, position: u64) {
        self.buf.clear();
        self.state = HandleState::Broken;
        self.position = position;
    }

    pub(crate) fn close(&mut self) {
        self.buf.clear();
        self.state = HandleState::Closed;
    }

    /// Read up to `limit` bytes; `None` drains the rest of the resource.
    ///
    /// A result shorter than `limit` means the resource ended.
    pub(crate) fn read(&mut self, limit: Option<usize>) -> StreamResult<Bytes> {
        if limit == Some(0) {
            return Ok(Bytes::new());
        }

        let lenient = self.lenient_eof;
        let chunks = match &mut self.state {
            HandleState::Active(active) => active.chunks(self.chunk_size),
            HandleState::Broken => return unavailable(lenient, StreamError::Broken),
            HandleState::Closed => return unavailable(lenient, StreamError::Closed),
        };

        let result = match limit {
            None => drain(&mut self.buf, chunks),
            Some(n) => fill(&mut self.buf, chunks, n),
        };

        match result {
            Ok(bytes) => {
                self.position += bytes.len() as u64;
                Ok(bytes)
            }
            Err(e) => {
                warn!(position = self.position, error = %e, "body read failed, stream broken");
                self.mark_broken(self.position);
                Err(e.into())
            }
        }
    }

    /// Expose buffered bytes, pulling one chunk if the buffer is empty.
    pub(crate) fn fill_buf(&mut self) -> StreamResult<&[u8]> {
        let lenient = self.lenient_eof;
        let chunks = match &mut self.state {
            HandleState::Active(active) => active.chunks(self.chunk_size),
            HandleState::Broken => {
                return unavailable(lenient, StreamError::Broken).map(|_| &[][..]);
            }
            HandleState::Closed => {
                return unavailable(lenient, StreamError::Closed).map(|_| &[][..]);
            }
        };

        if self.buf.is_empty() {
            match chunks.next() {
                Some(Ok(chunk)) => self.buf.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    warn!(position = self.position, error = %e, "body read failed, stream broken");
                    self.mark_broken(self.position);
                    return Err(e.into());
                }
                None => {}
            }
        }
        Ok(&self.buf[..])
    }

    pub(crate) fn consume(&mut self, amt: usize) {
        let amt = amt.min(self.buf.len());
        self.buf.advance(amt);
        self.position += amt as u64;
    }
}

fn unavailable(lenient: bool, error: StreamError) -> StreamResult<Bytes> {
    if lenient {
        trace!(%error, "read without a live handle, returning empty");
        Ok(Bytes::new())
    } else {
        Err(error)
    }
}

fn fill(buf: &mut BytesMut, chunks: &mut ByteChunks, n: usize) -> NetResult<Bytes> {
    while buf.len() < n {
        match chunks.next() {
            Some(chunk) => {
                let chunk = chunk?;
                trace!(len = chunk.len(), buffered = buf.len(), wanted = n, "chunk pulled");
                buf.extend_from_slice(&chunk);
            }
            // Ran out of data early: hand back whatever is left.
            None => return Ok(buf.split().freeze()),
        }
    }
    Ok(buf.split_to(n).freeze())
}

fn drain(buf: &mut BytesMut, chunks: &mut ByteChunks) -> NetResult<Bytes> {
    for chunk in chunks {
        buf.extend_from_slice(&chunk?);
    }
    Ok(buf.split().freeze())
}
