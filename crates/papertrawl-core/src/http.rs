//! Blocking HTTP facade over a shared async client.
//!
//! reqwest is async; the pipeline is one sequential thread. A shared
//! tokio runtime services the requests and callers block on the result.

use std::sync::LazyLock;
use std::time::Duration;

/// Connect timeout. No read timeout is set: an efetch response for a
/// large batch can take arbitrarily long and the call blocks until done.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error from a failed HTTP exchange (connect failure or non-2xx status).
#[derive(Debug)]
pub struct HttpError {
    pub status: Option<u16>,
    pub message: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(s) => write!(f, "HTTP {s}: {}", self.message),
            None => write!(f, "HTTP error: {}", self.message),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET with query parameters, returning the response body.
///
/// A non-2xx status is an error. There is no retry: a failed call
/// propagates to the caller and ends the run.
pub fn get_text(url: &str, params: &[(&str, String)]) -> Result<String, HttpError> {
    SHARED_RUNTIME.handle().block_on(async {
        let resp = http_client()
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| HttpError::from_reqwest(&e))?
            .error_for_status()
            .map_err(|e| HttpError::from_reqwest(&e))?;
        resp.text().await.map_err(|e| HttpError::from_reqwest(&e))
    })
}
