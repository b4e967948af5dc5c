use url::Url;

use crate::{
    body::Body,
    error::{NetError, NetResult},
    types::Headers,
};

/// A response whose headers have arrived and whose body is still on the wire.
#[derive(Debug)]
pub struct NetResponse {
    pub status: u16,
    pub reason: String,
    pub url: Url,
    pub headers: Headers,
    pub body: Body,
}

impl NetResponse {
    pub fn new(status: u16, url: Url, headers: Headers, body: Body) -> Self {
        Self {
            status,
            reason: String::new(),
            url,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn with_reason<S: Into<String>>(mut self, reason: S) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`NetError::HttpStatus`].
    ///
    /// # Errors
    ///
    /// Returns [`NetError::HttpStatus`] carrying status, reason and URL.
    pub fn error_for_status(self) -> NetResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(NetError::http_status(
                self.status,
                self.reason,
                self.url.to_string(),
            ))
        }
    }

    /// Value of `Content-Length`, if present and a non-negative integer.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get("content-length")
            .and_then(|v| v.trim().parse::<u64>().ok())
    }

    /// Whether the server advertised `Accept-Ranges: bytes`.
    pub fn accepts_byte_ranges(&self) -> bool {
        self.headers
            .get("accept-ranges")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("bytes"))
    }
}
