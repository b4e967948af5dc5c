use remio_net::NetError;
use remio_stream::StreamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemioError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Net(#[from] NetError),

    #[error("unsupported URI scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URI: {0}")]
    InvalidUri(String),
}

pub type RemioResult<T> = Result<T, RemioError>;
