#![forbid(unsafe_code)]

//! Buffered, optionally seekable readers over remote byte streams.
//!
//! [`ForwardOnlyStreamReader`] reads a response body once, front to back.
//! [`SeekableStreamReader`] also re-requests the resource from a new offset on
//! seek when the server advertised a length and byte-range support.
//! Both implement [`StreamReader`], which is `BufRead + Seek`, so they plug
//! into anything that consumes standard readers.

mod buffer;
mod error;
mod forward;
mod options;
mod provider;
mod reader;
mod seekable;
mod whence;

pub use error::{StreamError, StreamResult};
pub use forward::ForwardOnlyStreamReader;
pub use options::{DEFAULT_BUFFER_SIZE, ReaderOptions};
pub use provider::{FileProvider, Handle, HandleProvider, NetProvider};
pub use reader::StreamReader;
pub use seekable::{Capabilities, SeekableStreamReader};
pub use whence::Whence;
