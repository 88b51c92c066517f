//! CMS client error types

use thiserror::Error;

/// Errors produced by the upstream CMS client.
#[derive(Error, Debug)]
pub enum CmsError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Configuration(String),
    /// The CMS answered with a non-success status code.
    #[error("CMS returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),
    /// The request never completed (DNS, connect, read failure).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type CmsResult<T> = Result<T, CmsError>;
