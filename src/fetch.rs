use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::ViewerError;

/// Fetches raw document bodies by collection-relative path.
///
/// The production implementation is [`HttpFetcher`]; tests substitute
/// in-memory implementations.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String, ViewerError>;
}

/// HTTP fetcher for a statically served collection.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("recipebook/0.3")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Append a cache-busting query parameter so no intermediate cache is
    /// trusted between us and the document files.
    fn cache_bust(path: &str) -> String {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}cb={stamp}")
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<String, ViewerError> {
        let relative = Self::cache_bust(path.trim_start_matches('/'));
        let url = format!("{}/{}", self.base_url, relative);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ViewerError::StatusError {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Parse a fetched body into a typed document, keeping the path in the error
/// so failures point at the offending file.
pub(crate) fn parse_document<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ViewerError> {
    serde_json::from_str(body).map_err(|source| ViewerError::ParseError {
        path: path.to_string(),
        source,
    })
}
