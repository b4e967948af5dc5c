#![forbid(unsafe_code)]

use std::io::ErrorKind;

use remio_net::NetError;
use thiserror::Error;

/// Errors produced by `remio-stream` readers.
///
/// Notes:
/// - `Net` is a non-success response (or transport failure) on open or on a
///   seek-triggered re-request.
/// - `Broken` and `Closed` are only returned when `lenient_eof` is off; with it
///   on, reads in those states return empty instead.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("transport error: {0}")]
    Net(#[from] NetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid whence {0}, expected one of 0 (start), 1 (current), 2 (end)")]
    InvalidWhence(i32),

    #[error("stream is not seekable")]
    NotSeekable,

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("stream is broken: the last re-request failed")]
    Broken,

    #[error("stream is closed")]
    Closed,
}

impl StreamError {
    /// HTTP status of the failed request, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StreamError::Net(e) => e.status_code(),
            _ => None,
        }
    }
}

impl From<StreamError> for std::io::Error {
    fn from(error: StreamError) -> Self {
        let kind = match &error {
            StreamError::Io(e) => e.kind(),
            StreamError::Net(NetError::Timeout) => ErrorKind::TimedOut,
            StreamError::Net(_) => ErrorKind::Other,
            StreamError::InvalidWhence(_) => ErrorKind::InvalidInput,
            StreamError::NotSeekable | StreamError::Unsupported(_) => ErrorKind::Unsupported,
            StreamError::Broken | StreamError::Closed => ErrorKind::BrokenPipe,
        };
        match error {
            StreamError::Io(e) => e,
            other => std::io::Error::new(kind, other),
        }
    }
}

/// Result type for `remio-stream`.
pub type StreamResult<T> = Result<T, StreamError>;
