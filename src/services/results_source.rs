use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::StatusCode;
use url::Url;

#[cfg(test)]
use mockall::automock;

use crate::models::email_result::ResultSet;

/// Why a single read of the results resource did not yield results.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("results not ready (HTTP {0})")]
    NotReady(StatusCode),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed results: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The resource the search backend publishes its ranked results to.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResultsSource: Send + Sync {
    /// Reads the current results. With `fresh`, no cached copy may be served.
    async fn fetch(&self, fresh: bool) -> Result<ResultSet, FetchError>;
}

/// Reads `search_results.json` over HTTP.
pub struct HttpResultsSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpResultsSource {
    pub fn new(url: Url) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(HttpResultsSource { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL for one read; fresh reads carry a timestamp so no cache can
    /// answer them.
    pub fn request_url(&self, fresh: bool) -> Url {
        let mut url = self.url.clone();
        if fresh {
            url.query_pairs_mut()
                .append_pair("t", &Utc::now().timestamp_millis().to_string());
        }
        url
    }
}

#[async_trait]
impl ResultsSource for HttpResultsSource {
    async fn fetch(&self, fresh: bool) -> Result<ResultSet, FetchError> {
        let url = self.request_url(fresh);
        debug!("Fetching results from {}", url);

        let mut request = self.client.get(url);
        if fresh {
            request = request
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(FetchError::NotReady(response.status()));
        }

        let body = response.text().await?;
        let results: ResultSet = serde_json::from_str(&body)?;
        Ok(results)
    }
}
