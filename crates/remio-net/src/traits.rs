use url::Url;

use crate::{
    auth::Auth,
    error::NetResult,
    response::NetResponse,
    types::{Headers, RangeSpec},
};

/// Blocking GET transport.
///
/// Implementations return the response whatever its status; callers decide
/// what counts as failure via [`NetResponse::error_for_status`].
pub trait Net: Send + Sync {
    /// Issue a GET with the given headers and credentials.
    fn get(&self, url: &Url, auth: &Auth, headers: Option<Headers>) -> NetResult<NetResponse>;

    /// Issue a GET for a byte range of the resource.
    fn get_range(
        &self,
        url: &Url,
        auth: &Auth,
        range: RangeSpec,
        headers: Option<Headers>,
    ) -> NetResult<NetResponse> {
        let mut headers = headers.unwrap_or_default();
        headers.insert("range", range.to_header_value());
        self.get(url, auth, Some(headers))
    }
}

impl<N: Net + ?Sized> Net for &N {
    fn get(&self, url: &Url, auth: &Auth, headers: Option<Headers>) -> NetResult<NetResponse> {
        (**self).get(url, auth, headers)
    }
}

impl<N: Net + ?Sized> Net for std::sync::Arc<N> {
    fn get(&self, url: &Url, auth: &Auth, headers: Option<Headers>) -> NetResult<NetResponse> {
        (**self).get(url, auth, headers)
    }
}
