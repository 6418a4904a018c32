use headwire_http::FetchError;
use thiserror::Error;

/// Transient failures of a single extraction attempt.
///
/// Every variant here is retryable; a fetch that succeeded but found no
/// title is `Ok(TitleOutcome::NotFound)` and is never retried. The split
/// keeps structural no-title pages from being mistaken for flaky origins.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The fetch or browser navigation exceeded its hard timeout.
    #[error("attempt timed out")]
    Timeout,

    /// The origin answered with a non-2xx status.
    #[error("origin returned status {0}")]
    Status(u16),

    /// Connection-level failure, or a body that died mid-read.
    #[error("network failure: {0}")]
    Network(String),

    /// The browser session could not be created or driven.
    #[error("browser failure: {0}")]
    Browser(String),
}

impl From<FetchError> for ExtractError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => Self::Timeout,
            FetchError::Status(status) => Self::Status(status.as_u16()),
            FetchError::Build(msg) | FetchError::Network(msg) | FetchError::Body(msg) => {
                Self::Network(msg)
            }
        }
    }
}
