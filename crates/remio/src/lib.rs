#![forbid(unsafe_code)]

//! # remio
//!
//! Facade over the remio crates: open a local path or an HTTP(S) URL and get
//! back a buffered, file-like reader.
//!
//! ```no_run
//! use std::io::Read;
//!
//! use remio::prelude::*;
//!
//! let mut reader = remio::open("https://example.com/archive.tar", OpenConfig::default())?;
//! reader.seek_to(-512, Whence::End)?;
//! let mut trailer = Vec::new();
//! reader.read_to_end(&mut trailer)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod net {
    pub use remio_net::*;
}

pub mod stream {
    pub use remio_stream::*;
}

mod config;
mod error;
mod open;
mod source_type;

pub use config::OpenConfig;
pub use error::{RemioError, RemioResult};
pub use open::{BoxedReader, open, open_url_with};
pub use source_type::SourceType;

pub mod prelude {
    pub use remio_net::{Auth, Headers, NetOptions};
    pub use remio_stream::{ReaderOptions, StreamError, StreamReader, Whence};

    pub use crate::{OpenConfig, RemioError, RemioResult, SourceType, open};
}
