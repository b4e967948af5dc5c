//! Async HTTP test servers.

use std::{
    convert::Infallible,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use url::Url;

use crate::range::parse_range;

/// Lightweight HTTP test server wrapper.
pub struct TestHttpServer {
    base_url: Url,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestHttpServer {
    /// Spawn `router` on a random localhost port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind.
    pub async fn new(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test HTTP listener");
        let addr = listener
            .local_addr()
            .expect("read test listener local addr");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server = axum::serve(listener, router).with_graceful_shutdown(async {
            shutdown_rx.await.ok();
        });
        tokio::spawn(async move {
            server.await.expect("run test HTTP server");
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).expect("parse base URL"),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("join server URL path")
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Drop for TestHttpServer {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}

#[derive(Clone)]
struct Resource {
    data: Bytes,
    hits: Arc<AtomicUsize>,
    encodings: Arc<Mutex<Vec<Option<String>>>>,
}

/// Serves one payload under several server personalities.
///
/// | path          | behaviour                                              |
/// |---------------|--------------------------------------------------------|
/// | `/file`       | `Content-Length`, `Accept-Ranges: bytes`, honours `Range` |
/// | `/no-ranges`  | `Content-Length` only, ignores `Range`                 |
/// | `/chunked`    | chunked transfer, no `Content-Length`                  |
/// | `/flaky`      | like `/file` but every ranged request gets a 503       |
/// | `/missing`    | 404                                                    |
///
/// Sized bodies get `Content-Length` from the server itself.
pub struct RangeServer {
    server: TestHttpServer,
    hits: Arc<AtomicUsize>,
    encodings: Arc<Mutex<Vec<Option<String>>>>,
}

impl RangeServer {
    pub async fn new<B: Into<Bytes>>(data: B) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let encodings = Arc::new(Mutex::new(Vec::new()));
        let state = Resource {
            data: data.into(),
            hits: Arc::clone(&hits),
            encodings: Arc::clone(&encodings),
        };
        let router = Router::new()
            .route("/file", get(ranged))
            .route("/no-ranges", get(unranged))
            .route("/chunked", get(chunked))
            .route("/flaky", get(flaky))
            .route("/missing", get(missing))
            .with_state(state);

        Self {
            server: TestHttpServer::new(router).await,
            hits,
            encodings,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.server.url(path)
    }

    /// Requests served so far, across all routes.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// `Accept-Encoding` of every request so far, in arrival order.
    #[must_use]
    pub fn accept_encodings(&self) -> Vec<Option<String>> {
        self.encodings.lock().clone()
    }
}

fn observe(state: &Resource, request: &HeaderMap) -> HeaderMap {
    let encoding = request
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    state.encodings.lock().push(encoding);
    state.hits.fetch_add(1, Ordering::SeqCst);
    HeaderMap::new()
}

fn ranged_response(state: &Resource, request: &HeaderMap, mut out: HeaderMap) -> Response {
    let len = state.data.len() as u64;
    out.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));

    let Some(range) = request.get(header::RANGE).and_then(|v| v.to_str().ok()) else {
        return (StatusCode::OK, out, state.data.clone()).into_response();
    };

    match parse_range(range, len) {
        Some((start, end)) => {
            let slice = state.data.slice(start as usize..=end as usize);
            if let Ok(value) = HeaderValue::from_str(&format!("bytes {start}-{end}/{len}")) {
                out.insert(header::CONTENT_RANGE, value);
            }
            (StatusCode::PARTIAL_CONTENT, out, slice).into_response()
        }
        None => {
            if let Ok(value) = HeaderValue::from_str(&format!("bytes */{len}")) {
                out.insert(header::CONTENT_RANGE, value);
            }
            (StatusCode::RANGE_NOT_SATISFIABLE, out).into_response()
        }
    }
}

async fn ranged(State(state): State<Resource>, request: HeaderMap) -> Response {
    let out = observe(&state, &request);
    ranged_response(&state, &request, out)
}

async fn flaky(State(state): State<Resource>, request: HeaderMap) -> Response {
    let out = observe(&state, &request);
    if request.contains_key(header::RANGE) {
        return (StatusCode::SERVICE_UNAVAILABLE, out).into_response();
    }
    ranged_response(&state, &request, out)
}

async fn unranged(State(state): State<Resource>, request: HeaderMap) -> Response {
    let out = observe(&state, &request);
    (StatusCode::OK, out, state.data.clone()).into_response()
}

async fn chunked(State(state): State<Resource>, request: HeaderMap) -> Response {
    let out = observe(&state, &request);
    let pieces: Vec<Result<Bytes, Infallible>> = state
        .data
        .chunks(7)
        .map(|piece| Ok(Bytes::copy_from_slice(piece)))
        .collect();
    let body = Body::from_stream(futures::stream::iter(pieces));
    (StatusCode::OK, out, body).into_response()
}

async fn missing(State(state): State<Resource>, request: HeaderMap) -> Response {
    let out = observe(&state, &request);
    (StatusCode::NOT_FOUND, out, "not found").into_response()
}
