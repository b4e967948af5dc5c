use thiserror::Error;

/// Centralized error type for remio-net
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("HTTP {status} {reason} for URL: {url}")]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("Timeout")]
    Timeout,
}

impl NetError {
    /// Creates an HTTP status error
    pub fn http_status<R: Into<String>>(status: u16, reason: R, url: String) -> Self {
        Self::HttpStatus {
            status,
            reason: reason.into(),
            url,
        }
    }

    /// Creates an HTTP error from a generic string
    pub fn http<S: Into<String>>(msg: S) -> Self {
        Self::Http(msg.into())
    }

    /// Creates an HTTP error from a reqwest error
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error.to_string())
        }
    }

    /// Checks if this error indicates a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, NetError::Timeout)
    }

    /// Gets the HTTP status code if this is an HTTP status error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NetError {
    fn from(error: reqwest::Error) -> Self {
        Self::from_reqwest(error)
    }
}

impl From<std::io::Error> for NetError {
    fn from(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::TimedOut {
            Self::Timeout
        } else {
            Self::Body(error.to_string())
        }
    }
}

pub type NetResult<T> = Result<T, NetError>;
