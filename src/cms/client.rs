//! microCMS list API client
//!
//! Issues authenticated GET requests against a named content collection and
//! hands the JSON body back untouched. The proxy layer decides what to do
//! with it; this client only interprets the status class.

use hyper::body::Bytes;

use super::error::{CmsError, CmsResult};
use crate::config::CmsConfig;

/// Header carrying the API key, as defined by the microCMS content API.
const API_KEY_HEADER: &str = "X-MICROCMS-API-KEY";

const USER_AGENT: &str = concat!("kuraweb/", env!("CARGO_PKG_VERSION"));

/// Client for the microCMS content listing API.
///
/// Holds the API origin and the secret key; both are injected at
/// construction so request handling never touches the process environment.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CmsClient {
    /// Create a client for the given API origin, e.g.
    /// `https://example.microcms.io`.
    ///
    /// No request timeout is configured: a hung upstream holds only the
    /// request that hit it, and the inbound connection timeout still
    /// bounds the caller.
    pub fn new(base_url: &str, api_key: &str) -> CmsResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CmsError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build a client from the `[cms]` configuration section.
    ///
    /// Returns `None` when no API key is configured; the proxy endpoints
    /// then answer with a configuration error instead of calling out.
    pub fn from_config(cfg: &CmsConfig) -> CmsResult<Option<Self>> {
        let Some(api_key) = cfg.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };

        let base_url = cfg
            .base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.microcms.io", cfg.service_id));

        Self::new(&base_url, api_key).map(Some)
    }

    /// Fetch a collection listing limited to `limit` entries.
    ///
    /// Returns the response body verbatim on a 2xx status. A non-success
    /// status becomes `CmsError::UpstreamStatus`; a failed network call
    /// becomes `CmsError::Transport`. A single attempt, no retries.
    pub async fn fetch_list(&self, collection: &str, limit: u32) -> CmsResult<Bytes> {
        let url = format!("{}/api/v1/{collection}", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("limit", limit)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::UpstreamStatus(status));
        }

        Ok(response.bytes().await?)
    }
}
