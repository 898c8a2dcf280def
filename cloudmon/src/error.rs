//! Error taxonomy for a single fetch against the metrics service.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid payload: {0}")]
    Invalid(String),
}
