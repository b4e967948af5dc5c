use remio_net::{HttpClient, Net};
use remio_stream::{FileProvider, ForwardOnlyStreamReader, SeekableStreamReader, StreamReader};
use tracing::debug;
use url::Url;

use crate::{config::OpenConfig, error::RemioResult, source_type::SourceType};

pub type BoxedReader = Box<dyn StreamReader + Send>;

/// Open `uri` for reading.
///
/// Local paths get a seekable reader over the file. HTTP(S) URLs get a
/// [`SeekableStreamReader`] or, with `config.seekable == false`, a
/// [`ForwardOnlyStreamReader`]. Either way the first request is made here.
///
/// # Errors
///
/// URI classification errors, HTTP client construction errors, and whatever
/// the initial open returns (I/O errors, transport errors, non-2xx status).
pub fn open(uri: &str, config: OpenConfig) -> RemioResult<BoxedReader> {
    match SourceType::detect(uri)? {
        SourceType::Local(path) => {
            debug!(path = %path.display(), "opening local file");
            let reader =
                SeekableStreamReader::with_provider(FileProvider::new(path), config.reader)?;
            Ok(Box::new(reader))
        }
        SourceType::Remote(url) => {
            let client = HttpClient::new(config.net.clone())?;
            open_url_with(client, url, config)
        }
    }
}

/// Open an HTTP(S) `url` through a caller-supplied transport.
///
/// # Errors
///
/// Whatever the initial request returns.
pub fn open_url_with<N: Net + 'static>(
    net: N,
    url: Url,
    config: OpenConfig,
) -> RemioResult<BoxedReader> {
    let OpenConfig {
        auth,
        reader,
        seekable,
        ..
    } = config;
    debug!(url = %url, seekable, "opening remote resource");

    if seekable {
        Ok(Box::new(SeekableStreamReader::open_with(net, url, auth, reader)?))
    } else {
        Ok(Box::new(ForwardOnlyStreamReader::open_with(net, url, auth, reader)?))
    }
}
