use reqwest::{
    blocking::{Client, RequestBuilder},
    header::AUTHORIZATION,
};
use tracing::{debug, trace};
use url::Url;

use crate::{
    auth::Auth,
    body::Body,
    error::{NetError, NetResult},
    response::NetResponse,
    traits::Net,
    types::{Headers, NetOptions},
};

/// Blocking HTTP client backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
    options: NetOptions,
}

impl HttpClient {
    /// # Errors
    ///
    /// Returns [`NetError::Http`] if the `reqwest` client cannot be built
    /// (e.g. TLS backend initialisation failure).
    pub fn new(options: NetOptions) -> NetResult<Self> {
        let mut builder = Client::builder()
            .use_rustls_tls()
            .timeout(options.request_timeout)
            .connect_timeout(options.connect_timeout)
            .pool_max_idle_per_host(options.pool_max_idle_per_host);
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let inner = builder.build().map_err(NetError::from)?;
        Ok(Self { inner, options })
    }

    pub fn options(&self) -> &NetOptions {
        &self.options
    }

    fn apply_headers(mut req: RequestBuilder, headers: Option<Headers>) -> RequestBuilder {
        if let Some(headers) = headers {
            for (k, v) in headers.iter() {
                req = req.header(k, v);
            }
        }
        req
    }

    fn apply_auth(req: RequestBuilder, auth: &Auth, url: &Url) -> NetResult<RequestBuilder> {
        Ok(match auth {
            Auth::None => req,
            Auth::Basic { username, password } => req.basic_auth(username, Some(password)),
            Auth::Bearer(token) => req.bearer_auth(token),
            Auth::Negotiate(token) => req.header(AUTHORIZATION, format!("Negotiate {token}")),
            Auth::Custom(provider) => req.header(AUTHORIZATION, provider.authorization(url)?),
        })
    }
}

impl Net for HttpClient {
    fn get(&self, url: &Url, auth: &Auth, headers: Option<Headers>) -> NetResult<NetResponse> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(NetError::InvalidUrl(format!("not an HTTP(S) URL: {url}")));
        }

        trace!(url = %url, ?headers, "GET");
        let req = self.inner.get(url.clone());
        let req = Self::apply_headers(req, headers);
        let req = Self::apply_auth(req, auth, url)?;

        let resp = req.send().map_err(NetError::from)?;
        let status = resp.status();

        let mut out = Headers::new();
        for (name, value) in resp.headers() {
            if let Ok(v) = value.to_str() {
                out.insert(name.as_str(), v);
            }
        }
        debug!(url = %url, status = status.as_u16(), "response received");

        let final_url = resp.url().clone();
        Ok(NetResponse::new(status.as_u16(), final_url, out, Body::new(resp))
            .with_reason(status.canonical_reason().unwrap_or_default()))
    }
}
