//! All integration tests for remio
#![expect(
    clippy::unwrap_used,
    reason = "integration test crate, unwraps are acceptable in test code"
)]

mod common;
mod remio_facade;
mod remio_stream;
