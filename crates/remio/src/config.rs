//! Configuration for [`open`](crate::open).

use derive_setters::Setters;
use remio_net::{Auth, NetOptions};
use remio_stream::ReaderOptions;

/// Everything `open` needs besides the URI.
///
/// ```ignore
/// let config = OpenConfig::default()
///     .with_auth(Auth::bearer(token))
///     .with_seekable(false);
/// ```
#[derive(Clone, Debug, Setters)]
#[setters(prefix = "with_")]
pub struct OpenConfig {
    /// Credentials for HTTP sources. Ignored for local files.
    pub auth: Auth,
    /// HTTP client settings (timeouts, pooling, user agent).
    pub net: NetOptions,
    /// Buffering, EOF mode and extra request headers.
    pub reader: ReaderOptions,
    /// Use the seekable reader for HTTP sources. Local files are always seekable.
    pub seekable: bool,
}

impl Default for OpenConfig {
    fn default() -> Self {
        Self {
            auth: Auth::None,
            net: NetOptions::default(),
            reader: ReaderOptions::default(),
            seekable: true,
        }
    }
}
