//! HTTP layer — the [`Transport`] seam and its `reqwest` implementation.

#[cfg(feature = "http")]
pub mod client;

#[cfg(feature = "http")]
pub use client::ExtDataHttp;

use crate::error::HttpError;
use crate::shared::Query;

/// Caching directive for a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    #[default]
    Default,
    /// Bypass intermediate caches (`Cache-Control: no-cache`).
    NoStore,
}

/// Fetches a route and returns the raw response body.
///
/// Decoding happens in the view pipeline so that an undecodable body and a
/// failed request are reported the same way.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, path: &str, query: &Query, cache: CachePolicy) -> Result<String, HttpError>;
}
