#![forbid(unsafe_code)]

//! Blocking transport layer for remio readers.
//!
//! The readers in `remio-stream` treat the network as a black box that can
//! issue a GET (optionally with a `Range` header) and hand back a status,
//! response headers and a readable body. [`Net`] is that seam;
//! [`HttpClient`] is the `reqwest` implementation.

mod auth;
mod body;
mod client;
mod error;
mod response;
mod traits;
mod types;

pub use crate::{
    auth::{Auth, CredentialProvider},
    body::{Body, ByteChunks},
    client::HttpClient,
    error::{NetError, NetResult},
    response::NetResponse,
    traits::Net,
    types::{Headers, NetOptions, RangeSpec},
};
