use remio_net::Headers;

/// Default chunk size pulled from a response body: 128 KiB.
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Reader configuration.
#[derive(Clone, Debug)]
pub struct ReaderOptions {
    /// Maximum size of each chunk pulled from the response body.
    /// Zero means [`DEFAULT_BUFFER_SIZE`].
    pub buffer_size: usize,
    /// Return empty reads instead of [`StreamError::Broken`](crate::StreamError::Broken) /
    /// [`StreamError::Closed`](crate::StreamError::Closed) once the handle is gone.
    ///
    /// Consumers that iterate until an empty read never see an error mid-stream
    /// with this on, at the cost of hiding a failed re-request.
    pub lenient_eof: bool,
    /// Extra headers sent with every request.
    pub headers: Option<Headers>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            lenient_eof: false,
            headers: None,
        }
    }
}

impl ReaderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set chunk size in bytes. Zero falls back to [`DEFAULT_BUFFER_SIZE`].
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = if size == 0 { DEFAULT_BUFFER_SIZE } else { size };
        self
    }

    /// Chunk size the readers actually use.
    pub fn chunk_size(&self) -> usize {
        if self.buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            self.buffer_size
        }
    }

    #[must_use]
    pub fn with_lenient_eof(mut self, lenient: bool) -> Self {
        self.lenient_eof = lenient;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }
}
