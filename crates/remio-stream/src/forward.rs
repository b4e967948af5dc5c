use std::io::{BufRead, Read, Seek, SeekFrom};

use bytes::Bytes;
use remio_net::{Auth, HttpClient, Net, NetOptions};
use tracing::debug;
use url::Url;

use crate::{
    buffer::ChunkBuffer,
    error::{StreamError, StreamResult},
    options::ReaderOptions,
    provider::{HandleProvider, NetProvider},
    reader::StreamReader,
    whence::Whence,
};

/// Sequential buffered reader over a single response. Cannot seek.
pub struct ForwardOnlyStreamReader {
    inner: ChunkBuffer,
}

impl ForwardOnlyStreamReader {
    /// Open `url` with a default [`HttpClient`].
    ///
    /// # Errors
    ///
    /// [`StreamError::Net`] if the client cannot be built, the request fails,
    /// or the response status is not a success.
    pub fn open(url: Url, auth: Auth, options: ReaderOptions) -> StreamResult<Self> {
        Self::open_with(HttpClient::new(NetOptions::default())?, url, auth, options)
    }

    /// Open `url` through a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// [`StreamError::Net`] if the request fails or the status is not a success.
    pub fn open_with<N: Net>(
        net: N,
        url: Url,
        auth: Auth,
        options: ReaderOptions,
    ) -> StreamResult<Self> {
        let provider = NetProvider::new(net, url, auth)
            .with_headers(options.headers.clone().unwrap_or_default());
        Self::with_provider(provider, options)
    }

    /// Open the provider once, from the beginning. The provider is not kept.
    ///
    /// # Errors
    ///
    /// Whatever the provider returns from its initial open.
    pub fn with_provider<P: HandleProvider>(
        mut provider: P,
        options: ReaderOptions,
    ) -> StreamResult<Self> {
        let handle = provider.open_at(None)?;
        debug!(content_length = ?handle.content_length, "forward-only reader opened");
        Ok(Self {
            inner: ChunkBuffer::new(handle.body, &options),
        })
    }
}

impl StreamReader for ForwardOnlyStreamReader {
    fn read_bytes(&mut self, limit: Option<usize>) -> StreamResult<Bytes> {
        self.inner.read(limit)
    }

    fn seek_to(&mut self, _offset: i64, _whence: Whence) -> StreamResult<u64> {
        Err(StreamError::NotSeekable)
    }

    fn tell(&self) -> StreamResult<u64> {
        Err(StreamError::Unsupported("tell"))
    }

    fn seekable(&self) -> bool {
        false
    }

    fn close(&mut self) {
        debug!("forward-only reader closed");
        self.inner.close();
    }

    fn closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl Read for ForwardOnlyStreamReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(self.read_into(buf)?)
    }
}

impl BufRead for ForwardOnlyStreamReader {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        Ok(self.inner.fill_buf()?)
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}

impl Seek for ForwardOnlyStreamReader {
    fn seek(&mut self, _pos: SeekFrom) -> std::io::Result<u64> {
        Err(StreamError::NotSeekable.into())
    }
}

impl std::fmt::Debug for ForwardOnlyStreamReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwardOnlyStreamReader")
            .field("position", &self.inner.position())
            .field("buffered", &self.inner.buffered())
            .field("closed", &self.inner.is_closed())
            .finish()
    }
}
