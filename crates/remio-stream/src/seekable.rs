use std::io::{BufRead, Read, Seek, SeekFrom};

use bytes::Bytes;
use remio_net::{Auth, Body, HttpClient, Net, NetOptions};
use tracing::{debug, warn};
use url::Url;

use crate::{
    buffer::ChunkBuffer,
    error::{StreamError, StreamResult},
    options::ReaderOptions,
    provider::{Handle, HandleProvider, NetProvider},
    reader::StreamReader,
    whence::{Whence, split_seek_from},
};

/// What the initial response said about the resource. Fixed for the reader's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub content_length: Option<u64>,
    /// Known length and `Accept-Ranges: bytes`.
    pub seekable: bool,
}

impl Capabilities {
    pub fn probe(handle: &Handle) -> Self {
        Self {
            content_length: handle.content_length,
            seekable: handle.content_length.is_some() && handle.accepts_ranges,
        }
    }
}

/// Buffered reader that seeks by re-requesting the resource from the new offset.
///
/// Construction always issues one real request, even if nothing is ever read:
/// capabilities come from that response's headers.
pub struct SeekableStreamReader<P = NetProvider<HttpClient>> {
    provider: P,
    inner: ChunkBuffer,
    capabilities: Capabilities,
}

impl SeekableStreamReader {
    /// Open `url` with a default [`HttpClient`].
    ///
    /// # Errors
    ///
    /// [`StreamError::Net`] if the client cannot be built, the request fails,
    /// or the response status is not a success.
    pub fn open(url: Url, auth: Auth, options: ReaderOptions) -> StreamResult<Self> {
        Self::open_with(HttpClient::new(NetOptions::default())?, url, auth, options)
    }
}

impl<N: Net> SeekableStreamReader<NetProvider<N>> {
    /// Open `url` through a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// [`StreamError::Net`] if the request fails or the status is not a success.
    pub fn open_with(net: N, url: Url, auth: Auth, options: ReaderOptions) -> StreamResult<Self> {
        let provider = NetProvider::new(net, url, auth)
            .with_headers(options.headers.clone().unwrap_or_default());
        Self::with_provider(provider, options)
    }
}

impl<P: HandleProvider> SeekableStreamReader<P> {
    /// Open, inspect, finalize. The order is fixed: capabilities only exist once
    /// the first response is in.
    ///
    /// # Errors
    ///
    /// Whatever the provider returns from its initial open.
    pub fn with_provider(mut provider: P, options: ReaderOptions) -> StreamResult<Self> {
        let handle = provider.open_at(None)?;
        let capabilities = Capabilities::probe(&handle);
        debug!(
            content_length = ?capabilities.content_length,
            seekable = capabilities.seekable,
            "seekable reader opened"
        );

        Ok(Self {
            provider,
            inner: ChunkBuffer::new(handle.body, &options),
            capabilities,
        })
    }

    pub fn content_length(&self) -> Option<u64> {
        self.capabilities.content_length
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The reader lost its handle on a failed seek and has not recovered yet.
    pub fn is_broken(&self) -> bool {
        self.inner.is_broken()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn target(&self, offset: i64, whence: Whence, length: u64) -> u64 {
        let base = match whence {
            Whence::Start => 0,
            Whence::Current => i128::from(self.inner.position()),
            Whence::End => i128::from(length),
        };
        let clamped = (base + i128::from(offset)).clamp(0, i128::from(length));
        u64::try_from(clamped).unwrap_or(length)
    }
}

impl<P: HandleProvider> StreamReader for SeekableStreamReader<P> {
    fn read_bytes(&mut self, limit: Option<usize>) -> StreamResult<Bytes> {
        self.inner.read(limit)
    }

    /// Out-of-range targets are clamped into `[0, content_length]`.
    fn seek_to(&mut self, offset: i64, whence: Whence) -> StreamResult<u64> {
        debug!(offset, ?whence, "seek");
        let length = match self.capabilities {
            Capabilities {
                seekable: true,
                content_length: Some(length),
            } => length,
            _ => return Err(StreamError::NotSeekable),
        };
        if self.inner.is_closed() {
            return Err(StreamError::Closed);
        }

        let current = self.inner.position();
        let target = self.target(offset, whence, length);

        if target == current && !self.inner.is_broken() {
            return Ok(target);
        }

        if target == length {
            // Nothing left to fetch; servers answer `bytes=<len>-` with 416.
            self.inner.replace(Body::empty(), target);
            debug!(target, "seeked to end");
            return Ok(target);
        }

        match self.provider.open_at(Some(target)) {
            Ok(handle) => {
                self.inner.replace(handle.body, target);
                debug!(target, "re-requested at new position");
                Ok(target)
            }
            Err(e) => {
                warn!(target, error = %e, "re-request failed, stream broken");
                self.inner.mark_broken(target);
                Err(e)
            }
        }
    }

    fn tell(&self) -> StreamResult<u64> {
        Ok(self.inner.position())
    }

    fn seekable(&self) -> bool {
        self.capabilities.seekable
    }

    fn close(&mut self) {
        debug!("seekable reader closed");
        self.inner.close();
    }

    fn closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl<P: HandleProvider> Read for SeekableStreamReader<P> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(self.read_into(buf)?)
    }
}

impl<P: HandleProvider> BufRead for SeekableStreamReader<P> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        Ok(self.inner.fill_buf()?)
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}

impl<P: HandleProvider> Seek for SeekableStreamReader<P> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        let (offset, whence) = split_seek_from(pos);
        Ok(self.seek_to(offset, whence)?)
    }

    fn stream_position(&mut self) -> std::io::Result<u64> {
        Ok(self.inner.position())
    }
}

impl<P> std::fmt::Debug for SeekableStreamReader<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeekableStreamReader")
            .field("capabilities", &self.capabilities)
            .field("position", &self.inner.position())
            .field("buffered", &self.inner.buffered())
            .field("broken", &self.inner.is_broken())
            .field("closed", &self.inner.is_closed())
            .finish_non_exhaustive()
    }
}
