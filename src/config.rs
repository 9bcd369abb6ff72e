use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use url::Url;

use crate::services::retry_policy::RetryPolicy;
use crate::services::search_orchestrator::SearchMode;

pub fn init_logging() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
}

pub const GITHUB_USERNAME: &str = "nzioker";
pub const REPO_NAME: &str = "ai-email-assistant";
pub const BRANCH: &str = "main";
pub const WORKFLOW_FILE: &str = "search.yml";

const API_ROOT: &str = "https://api.github.com";
const RAW_ROOT: &str = "https://raw.githubusercontent.com";

pub const RESULTS_PATH: &str = "data/search_results.json";
pub const QUERY_PATH: &str = "data/user_query.txt";

pub const POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const MAX_POLL_ATTEMPTS: u32 = 20;
pub const STATIC_DELAY: Duration = Duration::from_secs(1);

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the server and the search backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub workflow_file: String,
    pub mode: SearchMode,
    pub api_base: Url,
    pub raw_base: Url,
    pub poll_interval: Duration,
    pub max_attempts: u32,
    pub static_delay: Duration,
    pub host: String,
    pub port: u16,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            owner: GITHUB_USERNAME.to_string(),
            repo: REPO_NAME.to_string(),
            branch: BRANCH.to_string(),
            workflow_file: WORKFLOW_FILE.to_string(),
            mode: SearchMode::Polling,
            api_base: Url::parse(API_ROOT).expect("API_ROOT is a valid URL"),
            raw_base: Url::parse(RAW_ROOT).expect("RAW_ROOT is a valid URL"),
            poll_interval: POLL_INTERVAL,
            max_attempts: MAX_POLL_ATTEMPTS,
            static_delay: STATIC_DELAY,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl SearchConfig {
    /// Reads overrides from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup("INBOX_SEARCH_MODE") {
            config.mode = mode
                .parse()
                .map_err(|e| anyhow!("INBOX_SEARCH_MODE: {}", e))?;
        }
        if let Some(host) = lookup("INBOX_SEARCH_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("INBOX_SEARCH_PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("INBOX_SEARCH_PORT is not a port number: {}", port))?;
        }
        if let Some(base) = lookup("INBOX_SEARCH_RAW_BASE") {
            config.raw_base = Url::parse(&base)
                .with_context(|| format!("INBOX_SEARCH_RAW_BASE is not a URL: {}", base))?;
        }
        if let Some(base) = lookup("INBOX_SEARCH_API_BASE") {
            config.api_base = Url::parse(&base)
                .with_context(|| format!("INBOX_SEARCH_API_BASE is not a URL: {}", base))?;
        }

        Ok(config)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            interval: self.poll_interval,
            max_attempts: self.max_attempts,
            fresh_reads: true,
        }
    }

    /// `{raw_base}/{owner}/{repo}/{branch}/data/search_results.json`
    pub fn results_url(&self) -> Result<Url> {
        join_segments(
            &self.raw_base,
            &[&self.owner, &self.repo, &self.branch, RESULTS_PATH],
        )
    }

    /// `{api_base}/repos/{owner}/{repo}/contents`
    pub fn contents_api_url(&self) -> Result<Url> {
        join_segments(&self.api_base, &["repos", &self.owner, &self.repo, "contents"])
    }

    /// `{api_base}/repos/{owner}/{repo}/actions/workflows/{workflow}/dispatches`
    pub fn workflow_dispatch_url(&self) -> Result<Url> {
        join_segments(
            &self.api_base,
            &[
                "repos",
                &self.owner,
                &self.repo,
                "actions",
                "workflows",
                &self.workflow_file,
                "dispatches",
            ],
        )
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Appends `segments` (each may itself contain `/`) to the path of `base`.
pub fn join_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| anyhow!("{} cannot be used as a base URL", base))?;
        path.pop_if_empty();
        for segment in segments {
            for part in segment.split('/').filter(|p| !p.is_empty()) {
                path.push(part);
            }
        }
    }
    Ok(url)
}
