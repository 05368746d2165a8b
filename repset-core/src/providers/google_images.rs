use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use repset_model::NormalizedTitle;

use super::ImageSearchPort;

/// Google Custom Search v1 endpoint.
pub const GOOGLE_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

const RESULT_LIMIT: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: String,
}

impl SearchResponse {
    fn into_links(self) -> Vec<String> {
        self.items.into_iter().map(|item| item.link).collect()
    }
}

fn build_query(title: &NormalizedTitle) -> String {
    format!("{} exercise gif", title.as_str())
}

/// Image search backed by the Google Custom Search API.
///
/// One outbound request per call, no retry; callers cache results in the
/// document store. Non-success statuses and result-free responses come back
/// as an empty list, matching the upstream contract.
pub struct GoogleImageProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    cx: String,
}

impl fmt::Debug for GoogleImageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleImageProvider")
            .field("endpoint", &self.endpoint)
            .field("cx", &self.cx)
            .finish_non_exhaustive()
    }
}

impl GoogleImageProvider {
    pub fn new(api_key: String, cx: String) -> Self {
        Self::with_endpoint(api_key, cx, GOOGLE_SEARCH_ENDPOINT)
    }

    /// Point the provider at a non-default endpoint (test servers, proxies).
    pub fn with_endpoint(api_key: String, cx: String, endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            cx,
        }
    }
}

#[async_trait]
impl ImageSearchPort for GoogleImageProvider {
    async fn search_gifs(&self, title: &NormalizedTitle) -> Result<Vec<String>, ProviderError> {
        let query = build_query(title);
        let num = RESULT_LIMIT.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx.as_str()),
                ("q", query.as_str()),
                ("searchType", "image"),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), %title, "image search returned non-success status");
            return Ok(Vec::new());
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.into_links())
    }
}
