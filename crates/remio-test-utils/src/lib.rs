#![forbid(unsafe_code)]
#![expect(
    clippy::expect_used,
    reason = "test utility crate, fixture setup failures should panic"
)]

//! Shared test utilities for the remio workspace.

pub mod http_server;
pub mod memory_net;
pub mod range;
pub mod trickle;

pub use http_server::{RangeServer, TestHttpServer};
pub use memory_net::{MemoryNet, RecordedRequest};
pub use range::parse_range;
pub use trickle::TrickleReader;
