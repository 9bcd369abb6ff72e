use std::time::Duration;

use crate::models::page_elements::{
    ButtonLabel, QueryInput, ResultsArea, SearchButton, StatusArea, DEFAULT_QUERY,
};
use crate::models::status::StatusMessage;
use crate::services::input_controller::InputController;
use crate::services::result_renderer::ResultRenderer;
use crate::services::search_orchestrator::{SearchBackend, SearchOrchestrator};
use crate::services::status_reporter::StatusReporter;
use crate::views::html::Element;

/// One visitor's page: its slots and the components wired to them.
#[derive(Clone)]
pub struct PageSession {
    pub query_input: QueryInput,
    pub search_button: SearchButton,
    pub status_area: StatusArea,
    pub results_area: ResultsArea,
    pub controller: InputController,
    /// Reload period while a search is in flight.
    refresh_interval: Duration,
}

/// Point-in-time view of a page, used for rendering.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub query: String,
    pub search_enabled: bool,
    pub button_label: ButtonLabel,
    pub status: Option<StatusMessage>,
    pub results: Option<Element>,
    pub scroll_into_view: bool,
    /// When the page should reload itself to pick up progress.
    pub refresh_after: Option<Duration>,
}

impl PageSnapshot {
    /// How a page looks before any search has run.
    pub fn idle() -> Self {
        PageSnapshot {
            query: DEFAULT_QUERY.to_string(),
            search_enabled: true,
            button_label: ButtonLabel::Idle,
            status: None,
            results: None,
            scroll_into_view: false,
            refresh_after: None,
        }
    }
}

impl PageSession {
    pub fn open(backend: &SearchBackend) -> Self {
        let query_input = QueryInput::default();
        let search_button = SearchButton::default();
        let status_area = StatusArea::default();
        let results_area = ResultsArea::default();

        let status = StatusReporter::new(status_area.clone());
        let renderer = ResultRenderer::new(results_area.clone(), status.clone());
        let orchestrator =
            SearchOrchestrator::new(backend.clone(), results_area.clone(), status.clone(), renderer);
        let controller = InputController::new(
            query_input.clone(),
            search_button.clone(),
            status,
            orchestrator,
        );

        PageSession {
            query_input,
            search_button,
            status_area,
            results_area,
            controller,
            refresh_interval: backend.policy.interval,
        }
    }

    /// Captures the page. Consumes a pending scroll request.
    pub fn snapshot(&self) -> PageSnapshot {
        let search_enabled = !self.search_button.is_disabled();
        let refresh_after = if search_enabled {
            self.status_area
                .dismissal_due_in()
                .map(|due| Duration::from_secs(due.as_secs_f64().ceil() as u64))
        } else {
            Some(self.refresh_interval)
        };

        PageSnapshot {
            query: self.query_input.value(),
            search_enabled,
            button_label: self.search_button.label(),
            status: self.status_area.visible(),
            results: self.results_area.fragment(),
            scroll_into_view: self.results_area.take_scroll_request(),
            refresh_after,
        }
    }
}
