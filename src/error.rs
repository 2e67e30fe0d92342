use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while talking to the proxy or loading the catalog.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("proxy answered with status {0}")]
    Status(StatusCode),

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot read catalog: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChatError>;
