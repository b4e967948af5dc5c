//! Handle providers: how a reader (re)opens its underlying byte source.

use std::{
    fs::File,
    io::{Seek, SeekFrom},
    path::{Path, PathBuf},
};

use remio_net::{Auth, Body, Headers, Net, RangeSpec};
use tracing::debug;
use url::Url;

use crate::error::StreamResult;

/// An opened byte source plus what it told us about itself.
#[derive(Debug)]
pub struct Handle {
    /// Total length reported by the source, if any.
    pub content_length: Option<u64>,
    /// Whether the source advertised byte-range support.
    pub accepts_ranges: bool,
    pub body: Body,
}

impl Handle {
    pub fn new(body: Body) -> Self {
        Self {
            content_length: None,
            accepts_ranges: false,
            body,
        }
    }

    #[must_use]
    pub fn with_content_length(mut self, length: Option<u64>) -> Self {
        self.content_length = length;
        self
    }

    #[must_use]
    pub fn with_accepts_ranges(mut self, accepts: bool) -> Self {
        self.accepts_ranges = accepts;
        self
    }
}

/// Opens a fresh [`Handle`], either from the beginning or from a byte offset.
#[cfg_attr(test, mockall::automock)]
pub trait HandleProvider: Send {
    /// `None` issues a plain request; `Some(offset)` asks for the suffix from `offset`.
    fn open_at(&mut self, offset: Option<u64>) -> StreamResult<Handle>;
}

impl<P: HandleProvider + ?Sized> HandleProvider for Box<P> {
    fn open_at(&mut self, offset: Option<u64>) -> StreamResult<Handle> {
        (**self).open_at(offset)
    }
}

/// Provider issuing GET requests through a [`Net`] transport.
///
/// Every request carries `Accept-Encoding: identity` so that the byte counts
/// match `Content-Length`.
pub struct NetProvider<N> {
    net: N,
    url: Url,
    auth: Auth,
    headers: Headers,
}

impl<N: Net> NetProvider<N> {
    pub fn new(net: N, url: Url, auth: Auth) -> Self {
        Self {
            net,
            url,
            auth,
            headers: Headers::new(),
        }
    }

    /// Extra headers for every request. `Accept-Encoding` cannot be overridden.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn net(&self) -> &N {
        &self.net
    }

    fn request_headers(&self) -> Headers {
        let mut headers = self.headers.clone();
        headers.insert("accept-encoding", "identity");
        headers
    }
}

impl<N: Net> HandleProvider for NetProvider<N> {
    fn open_at(&mut self, offset: Option<u64>) -> StreamResult<Handle> {
        let headers = Some(self.request_headers());
        let response = match offset {
            None => self.net.get(&self.url, &self.auth, headers),
            Some(start) => {
                self.net
                    .get_range(&self.url, &self.auth, RangeSpec::from_start(start), headers)
            }
        }?
        .error_for_status()?;

        debug!(
            url = %self.url,
            status = response.status,
            ?offset,
            content_length = ?response.content_length(),
            "response opened"
        );

        Ok(Handle {
            content_length: response.content_length(),
            accepts_ranges: response.accepts_byte_ranges(),
            body: response.body,
        })
    }
}

/// Provider reading a file on local disk. Always range-capable.
#[derive(Clone, Debug)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HandleProvider for FileProvider {
    fn open_at(&mut self, offset: Option<u64>) -> StreamResult<Handle> {
        let mut file = File::open(&self.path)?;
        let len = file.metadata()?.len();
        if let Some(start) = offset {
            file.seek(SeekFrom::Start(start))?;
        }
        debug!(path = %self.path.display(), len, ?offset, "file opened");

        Ok(Handle::new(Body::new(file))
            .with_content_length(Some(len))
            .with_accepts_ranges(true))
    }
}
