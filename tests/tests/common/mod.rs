use remio_test_utils::RangeServer;
use rstest::fixture;
use tracing_subscriber::EnvFilter;

pub(crate) const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[fixture]
pub(crate) async fn server() -> RangeServer {
    init_tracing();
    RangeServer::new(ALPHABET).await
}

/// The readers are blocking; keep them off the runtime thread serving HTTP.
pub(crate) async fn blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}
