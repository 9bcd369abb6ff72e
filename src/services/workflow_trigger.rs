use log::info;
use serde::Serialize;
use url::Url;

/// Body of a workflow-dispatch request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchRequest {
    #[serde(rename = "ref")]
    pub git_ref: String,
}

/// Starts the out-of-band search workflow. A dispatch needs a repo-scoped
/// token, which cannot live in this process, so the request is built and
/// logged but not sent.
#[derive(Debug, Clone)]
pub struct WorkflowTrigger {
    dispatch_url: Url,
    git_ref: String,
}

impl WorkflowTrigger {
    pub fn new(dispatch_url: Url, branch: &str) -> Self {
        WorkflowTrigger {
            dispatch_url,
            git_ref: branch.to_string(),
        }
    }

    pub fn dispatch_url(&self) -> &Url {
        &self.dispatch_url
    }

    pub fn trigger(&self) -> DispatchRequest {
        let request = DispatchRequest {
            git_ref: self.git_ref.clone(),
        };
        info!(
            "Workflow dispatch to {} for ref {} is pending backend setup",
            self.dispatch_url, request.git_ref
        );
        request
    }
}
