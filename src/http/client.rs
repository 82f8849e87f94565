//! Low-level HTTP client — `ExtDataHttp`.
//!
//! Returns response bodies as text; the view pipeline owns decoding.

use crate::error::HttpError;
use crate::http::{CachePolicy, Transport};
use crate::shared::Query;

use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// HTTP client for the exchange and mempool data routes.
#[derive(Debug, Clone)]
pub struct ExtDataHttp {
    base_url: String,
    client: Client,
}

impl ExtDataHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` with `query`.
    pub fn url_for(&self, path: &str, query: &Query) -> String {
        format!("{}{}", self.base_url, query.to_url(path))
    }

    async fn do_request(&self, url: &str, cache: CachePolicy) -> Result<String, HttpError> {
        let mut req = self.client.get(url);
        if cache == CachePolicy::NoStore {
            req = req.header("Cache-Control", "no-cache");
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.text().await?);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Transport for ExtDataHttp {
    async fn get(&self, path: &str, query: &Query, cache: CachePolicy) -> Result<String, HttpError> {
        let url = self.url_for(path, query);
        tracing::debug!(url = %url, ?cache, "GET");
        self.do_request(&url, cache).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_trims_slash() {
        let http = ExtDataHttp::new("http://localhost:7770/").unwrap();
        assert_eq!(http.base_url(), "http://localhost:7770");

        let mut q = Query::new();
        q.set("page", 2).set("viewOption", "table");
        assert_eq!(
            http.url_for("/getmempool", &q),
            "http://localhost:7770/getmempool?page=2&viewOption=table"
        );
    }
}
