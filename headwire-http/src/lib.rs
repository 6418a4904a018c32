//! Minimal HTTP page client with safe logging and browser-like defaults.
//!
//! - Fetches a page body as text with a hard per-request timeout
//! - Sends browser-like headers (many news origins reject bare clients)
//! - Optional TLS-verification bypass for origins with broken chains
//! - Single attempt per call: retry policy belongs to the caller, so
//!   attempt counting and backoff stay in one place
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), headwire_http::FetchError> {
//! let client = headwire_http::PageClient::new(false)?;
//! let url = url::Url::parse("https://example.com/article").unwrap();
//! let html = client.get_html(&url, None).await?;
//! # let _ = html; Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, and errors under the `fetch.http` target, keyed by a
//! per-request id.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

// Desktop Chrome profile; kept static so every fetch in a run presents the
// same identity.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,es;q=0.8";

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("client build failed: {0}")]
    Build(String),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(StatusCode),
    #[error("response body unreadable: {0}")]
    Body(String),
}

// ==============================
// Client
// ==============================

/// Shared page fetcher. Cheap to clone; the inner `reqwest::Client` pools
/// connections across concurrent fetches.
#[derive(Clone)]
pub struct PageClient {
    inner: Client,
    pub default_timeout: Duration,
}

impl PageClient {
    /// Construct a client with browser-like default headers.
    ///
    /// `accept_invalid_certs` disables TLS certificate verification, matching
    /// origins that serve articles behind misconfigured chains.
    pub fn new(accept_invalid_certs: bool) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );

        let inner = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(5))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| FetchError::Build(e.to_string()))?;

        Ok(Self {
            inner,
            default_timeout: Duration::from_secs(30),
        })
    }

    /// Override the default timeout returned by [`PageClient::new`].
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// GET `url` and return the response body as text.
    ///
    /// A 2xx status yields the body; any other status is reported as
    /// [`FetchError::Status`] so the caller can decide whether to try again.
    /// Timeouts cover the whole request including body read.
    pub async fn get_html(&self, url: &Url, timeout: Option<Duration>) -> Result<String, FetchError> {
        let timeout = timeout.unwrap_or(self.default_timeout);
        let req_id = request_id();

        tracing::debug!(
            target: "fetch.http",
            req_id = %req_id,
            host = url.host_str().unwrap_or("-"),
            path = url.path(),
            timeout_ms = timeout.as_millis() as u64,
            "http.request.start"
        );

        let t0 = std::time::Instant::now();
        let resp = self
            .inner
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| {
                let mapped = classify(err);
                tracing::warn!(
                    target: "fetch.http",
                    req_id = %req_id,
                    error = %mapped,
                    "http.network_error.send"
                );
                mapped
            })?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();

        if !status.is_success() {
            tracing::warn!(
                target: "fetch.http",
                req_id = %req_id,
                %status,
                duration_ms = t0.elapsed().as_millis() as u64,
                "http.error"
            );
            return Err(FetchError::Status(status));
        }

        // A body that dies mid-read is indistinguishable from a transport
        // failure upstream; surface it as such.
        let body = resp.text().await.map_err(|err| {
            let mapped = if err.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Body(err.to_string())
            };
            tracing::warn!(
                target: "fetch.http",
                req_id = %req_id,
                error = %mapped,
                "http.network_error.body"
            );
            mapped
        })?;

        tracing::debug!(
            target: "fetch.http",
            req_id = %req_id,
            %status,
            content_type = %content_type,
            body_len = body.len(),
            duration_ms = t0.elapsed().as_millis() as u64,
            "http.response"
        );
        tracing::trace!(
            target: "fetch.http",
            req_id = %req_id,
            body_snippet = %snip(&body),
            "http.response.body_snippet"
        );

        Ok(body)
    }
}

// ==============================
// Helpers
// ==============================

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(err.to_string())
    }
}

fn request_id() -> String {
    format!(
        "r{:x}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    )
}

fn snip(body: &str) -> String {
    let mut snip: String = body.chars().take(500).collect();
    if body.len() > snip.len() {
        snip.push_str("...");
    }
    snip
}
