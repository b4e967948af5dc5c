//! URI dispatch.

use std::path::PathBuf;

use url::{ParseError, Url};

use crate::error::{RemioError, RemioResult};

/// Where a URI points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceType {
    /// `http://` or `https://` resource.
    Remote(Url),
    /// File on local disk, from a `file://` URL or a bare path.
    Local(PathBuf),
}

impl SourceType {
    /// Classify `uri`.
    ///
    /// - `http`/`https` URLs -> [`SourceType::Remote`]
    /// - `file://` URLs and anything that does not parse as a URL -> [`SourceType::Local`]
    /// - single-letter schemes are taken as Windows drive letters -> [`SourceType::Local`]
    ///
    /// # Errors
    ///
    /// [`RemioError::UnsupportedScheme`] for any other scheme, and
    /// [`RemioError::InvalidUri`] for empty input or a malformed URL.
    pub fn detect(uri: &str) -> RemioResult<Self> {
        let trimmed = uri.trim();
        if trimmed.is_empty() {
            return Err(RemioError::InvalidUri("empty URI".to_owned()));
        }

        match Url::parse(trimmed) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(Self::Local)
                    .map_err(|()| RemioError::InvalidUri(format!("invalid file URL: {trimmed}"))),
                scheme if scheme.len() == 1 => Ok(Self::Local(PathBuf::from(trimmed))),
                scheme => Err(RemioError::UnsupportedScheme(scheme.to_owned())),
            },
            Err(ParseError::RelativeUrlWithoutBase) => Ok(Self::Local(PathBuf::from(trimmed))),
            Err(e) => Err(RemioError::InvalidUri(format!("{trimmed}: {e}"))),
        }
    }
}
