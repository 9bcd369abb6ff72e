use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::config::SearchConfig;
use crate::models::page_elements::{ResultsArea, SearchGuard};
use crate::models::query::Query;
use crate::models::search_error::SearchError;
use crate::services::query_store::{ContentStore, GitHubContentStore, QueryPublisher};
use crate::services::result_renderer::{ResultOrigin, ResultRenderer};
use crate::services::results_source::{HttpResultsSource, ResultsSource};
use crate::services::retry_policy::{poll_until_ready, RetryPolicy};
use crate::services::sample_data::SAMPLE_RESULTS;
use crate::services::status_reporter::StatusReporter;
use crate::services::workflow_trigger::WorkflowTrigger;

/// Which search flow a page runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Publish the query, trigger the workflow, poll for its output.
    Polling,
    /// Show the fixed sample set after a short delay.
    Static,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polling" => Ok(SearchMode::Polling),
            "static" => Ok(SearchMode::Static),
            other => Err(format!("unknown search mode '{}' (expected polling or static)", other)),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Polling => f.write_str("polling"),
            SearchMode::Static => f.write_str("static"),
        }
    }
}

/// External collaborators shared by every page session.
#[derive(Clone)]
pub struct SearchBackend {
    pub mode: SearchMode,
    pub policy: RetryPolicy,
    pub static_delay: Duration,
    pub branch: String,
    pub source: Arc<dyn ResultsSource>,
    pub store: Arc<dyn ContentStore>,
    pub trigger: WorkflowTrigger,
}

impl SearchBackend {
    pub fn from_config(config: &SearchConfig) -> anyhow::Result<Self> {
        let source = HttpResultsSource::new(config.results_url()?)?;
        let store = GitHubContentStore::new(config.contents_api_url()?)?;
        let trigger = WorkflowTrigger::new(config.workflow_dispatch_url()?, &config.branch);

        Ok(SearchBackend {
            mode: config.mode,
            policy: config.retry_policy(),
            static_delay: config.static_delay,
            branch: config.branch.clone(),
            source: Arc::new(source),
            store: Arc::new(store),
            trigger,
        })
    }
}

/// Runs one search for a page and reports every transition.
#[derive(Clone)]
pub struct SearchOrchestrator {
    backend: SearchBackend,
    results: ResultsArea,
    status: StatusReporter,
    renderer: ResultRenderer,
}

impl SearchOrchestrator {
    pub fn new(
        backend: SearchBackend,
        results: ResultsArea,
        status: StatusReporter,
        renderer: ResultRenderer,
    ) -> Self {
        SearchOrchestrator {
            backend,
            results,
            status,
            renderer,
        }
    }

    /// Runs the search to completion. `guard` keeps the search button
    /// disabled until this returns, however it returns.
    pub async fn run(&self, query: Query, guard: SearchGuard) {
        info!("Starting {} search for \"{}\"", self.backend.mode, query);
        self.results.clear();

        let outcome = match self.backend.mode {
            SearchMode::Polling => self.run_polling(&query).await,
            SearchMode::Static => self.run_static(&query).await,
        };

        if let Err(e) = outcome {
            match &e {
                SearchError::Timeout { attempts } => {
                    error!("Search timed out after {} attempts", attempts)
                }
                other => error!("Search failed: {:?}", other),
            }
            self.status.error(format!("Error: {}", e));
        }
        drop(guard);
    }

    async fn run_polling(&self, query: &Query) -> Result<(), SearchError> {
        self.status
            .busy("Writing query to repository and triggering search...");

        let publisher = QueryPublisher::new(self.backend.store.clone(), &self.backend.branch);
        publisher.prepare(query).await?;
        self.status
            .info(format!("Query ready: \"{}\" (Write requires auth setup)", query));

        self.backend.trigger.trigger();
        self.status.info("Triggering search engine... (setup in progress)");

        self.status.busy("AI model is searching your emails...");
        let status = self.status.clone();
        let results = poll_until_ready(
            &self.backend.policy,
            self.backend.source.as_ref(),
            move |_, waited| status.busy(format!("Still searching... ({}s)", waited.as_secs())),
        )
        .await?;

        self.renderer.display(&results, query, ResultOrigin::Backend);
        self.status
            .completed(format!("Search completed! Found {} emails.", results.len()));
        Ok(())
    }

    async fn run_static(&self, query: &Query) -> Result<(), SearchError> {
        self.status.busy("Searching your virtual inbox...");
        sleep(self.backend.static_delay).await;
        self.renderer
            .display(SAMPLE_RESULTS.as_slice(), query, ResultOrigin::Sample);
        Ok(())
    }
}
