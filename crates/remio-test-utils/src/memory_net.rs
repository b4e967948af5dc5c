//! In-memory [`Net`] implementation for reader tests.

use bytes::Bytes;
use parking_lot::Mutex;
use remio_net::{Auth, Body, Headers, Net, NetResponse, NetResult};
use url::Url;

use crate::{range::parse_range, trickle::TrickleReader};

/// One request as seen by [`MemoryNet`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub url: Url,
    pub auth: Auth,
    pub headers: Headers,
}

impl RecordedRequest {
    pub fn range(&self) -> Option<&str> {
        self.headers.get("range")
    }
}

/// Serves one fixed resource and records every request.
///
/// By default it behaves like a well-behaved static file server: it sends
/// `Content-Length`, `Accept-Ranges: bytes`, and answers `Range` requests
/// with `206` (or `416` when the start is past the end).
pub struct MemoryNet {
    data: Bytes,
    chunk_size: Option<usize>,
    status: u16,
    content_length: bool,
    accept_ranges: Option<String>,
    range_status: Mutex<Option<u16>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MemoryNet {
    #[must_use]
    pub fn new<B: Into<Bytes>>(data: B) -> Self {
        Self {
            data: data.into(),
            chunk_size: None,
            status: 200,
            content_length: true,
            accept_ranges: Some("bytes".to_owned()),
            range_status: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Bodies yield at most `size` bytes per read.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size);
        self
    }

    /// Answer every request with `status` and an empty body.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn without_content_length(mut self) -> Self {
        self.content_length = false;
        self
    }

    /// `None` omits the header and makes the server ignore `Range`.
    #[must_use]
    pub fn with_accept_ranges(mut self, value: Option<&str>) -> Self {
        self.accept_ranges = value.map(str::to_owned);
        self
    }

    /// Make ranged requests fail with `status` from now on; `None` restores them.
    pub fn set_range_status(&self, status: Option<u16>) {
        *self.range_status.lock() = status;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn respond(&self, status: u16, url: &Url, data: Bytes, extra: Headers) -> NetResponse {
        let mut headers = extra;
        if self.content_length {
            headers.insert("content-length", data.len().to_string());
        }
        if let Some(value) = &self.accept_ranges {
            headers.insert("accept-ranges", value.clone());
        }
        let body = match self.chunk_size {
            Some(step) => Body::new(TrickleReader::new(data, step)),
            None => Body::from_bytes(data),
        };
        NetResponse::new(status, url.clone(), headers, body)
    }
}

impl Net for MemoryNet {
    fn get(&self, url: &Url, auth: &Auth, headers: Option<Headers>) -> NetResult<NetResponse> {
        let headers = headers.unwrap_or_default();
        let range = headers
            .get("range")
            .filter(|_| self.accept_ranges.is_some())
            .map(str::to_owned);
        self.requests.lock().push(RecordedRequest {
            url: url.clone(),
            auth: auth.clone(),
            headers,
        });

        if !(200..300).contains(&self.status) {
            return Ok(self.respond(self.status, url, Bytes::new(), Headers::new()));
        }

        let Some(range) = range else {
            return Ok(self.respond(200, url, self.data.clone(), Headers::new()));
        };

        if let Some(status) = *self.range_status.lock() {
            return Ok(self.respond(status, url, Bytes::new(), Headers::new()));
        }

        let len = self.data.len() as u64;
        let mut extra = Headers::new();
        match parse_range(&range, len) {
            Some((start, end)) => {
                extra.insert("content-range", format!("bytes {start}-{end}/{len}"));
                let slice = self.data.slice(start as usize..=end as usize);
                Ok(self.respond(206, url, slice, extra))
            }
            None => {
                extra.insert("content-range", format!("bytes */{len}"));
                Ok(self.respond(416, url, Bytes::new(), extra))
            }
        }
    }
}
