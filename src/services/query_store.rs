use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, info};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use url::Url;

#[cfg(test)]
use mockall::automock;

use crate::config;
use crate::models::query::Query;
use crate::models::search_error::SearchError;

const COMMIT_MESSAGE: &str = "docs: update search query [skip ci]";
const GITHUB_JSON: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("inbox-search/", env!("CARGO_PKG_VERSION"));

/// Body of a content-API "update file" request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentUpdate {
    pub message: String,
    /// Base64 of the UTF-8 query text.
    pub content: String,
    /// Current version of the file; `None` creates it.
    pub sha: Option<String>,
    pub branch: String,
}

impl ContentUpdate {
    pub fn for_query(query: &Query, sha: Option<String>, branch: &str) -> Self {
        ContentUpdate {
            message: COMMIT_MESSAGE.to_string(),
            content: STANDARD.encode(query.as_str().as_bytes()),
            sha,
            branch: branch.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    sha: Option<String>,
}

/// The hosted repository the query file lives in.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Version id of the file at `path`, or `None` when it cannot be read.
    async fn current_sha(&self, path: &str) -> Result<Option<String>, SearchError>;
}

pub struct GitHubContentStore {
    client: reqwest::Client,
    contents_url: Url,
}

impl GitHubContentStore {
    pub fn new(contents_url: Url) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(GitHubContentStore {
            client,
            contents_url,
        })
    }
}

#[async_trait]
impl ContentStore for GitHubContentStore {
    async fn current_sha(&self, path: &str) -> Result<Option<String>, SearchError> {
        let url = config::join_segments(&self.contents_url, &[path])
            .map_err(|e| SearchError::InvalidUrl(e.to_string()))?;
        debug!("Reading file info from {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await?;
        if !response.status().is_success() {
            debug!("No file info for {} (HTTP {})", path, response.status());
            return Ok(None);
        }

        let body = response.text().await?;
        let info: FileInfo = serde_json::from_str(&body)?;
        Ok(info.sha)
    }
}

/// Prepares the write of a query to the repository. Sending the update
/// needs a token that only a server-side proxy may hold, so the prepared
/// request is returned instead of sent.
pub struct QueryPublisher {
    store: Arc<dyn ContentStore>,
    branch: String,
}

impl QueryPublisher {
    pub fn new(store: Arc<dyn ContentStore>, branch: &str) -> Self {
        QueryPublisher {
            store,
            branch: branch.to_string(),
        }
    }

    pub async fn prepare(&self, query: &Query) -> Result<ContentUpdate, SearchError> {
        let sha = self.store.current_sha(config::QUERY_PATH).await?;
        let update = ContentUpdate::for_query(query, sha, &self.branch);
        info!(
            "Prepared update of {} on {} (sha {:?}); write requires an authenticated backend",
            config::QUERY_PATH,
            update.branch,
            update.sha
        );
        Ok(update)
    }
}
