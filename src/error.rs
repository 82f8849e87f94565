//! Unified error types.

use thiserror::Error;

/// Top-level crate error.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Malformed response body: {0}")]
    Decode(String),
}

/// Why a table or chart request produced nothing to display.
///
/// The three kinds drive different UI: `Network` and `Server` show an error
/// banner, `Empty` resets the page counters and shows an informational
/// message.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{0}")]
    Network(#[from] HttpError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Empty(String),
}

/// Discriminant of [`FetchError`], cheap to copy into results and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Network,
    Server,
    Empty,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::Server(_) => FetchErrorKind::Server,
            FetchError::Empty(_) => FetchErrorKind::Empty,
        }
    }

    /// `Empty` is informational; the other kinds are failures.
    pub fn is_failure(&self) -> bool {
        !matches!(self, FetchError::Empty(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Network(HttpError::Decode(e.to_string()))
    }
}
