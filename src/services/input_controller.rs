use log::debug;

use crate::models::page_elements::{QueryInput, SearchButton, SearchGuard};
use crate::models::query::Query;
use crate::services::search_orchestrator::SearchOrchestrator;
use crate::services::status_reporter::StatusReporter;

pub const ENTER_KEY: &str = "Enter";

/// Turns button clicks and Enter presses into searches.
#[derive(Clone)]
pub struct InputController {
    input: QueryInput,
    button: SearchButton,
    status: StatusReporter,
    orchestrator: SearchOrchestrator,
}

/// A search that has claimed the button and is ready to run.
pub struct PendingSearch {
    query: Query,
    guard: SearchGuard,
    orchestrator: SearchOrchestrator,
}

impl PendingSearch {
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub async fn run(self) {
        self.orchestrator.run(self.query, self.guard).await;
    }
}

impl InputController {
    pub fn new(
        input: QueryInput,
        button: SearchButton,
        status: StatusReporter,
        orchestrator: SearchOrchestrator,
    ) -> Self {
        InputController {
            input,
            button,
            status,
            orchestrator,
        }
    }

    pub fn on_click(&self) -> Option<PendingSearch> {
        self.activate()
    }

    pub fn on_key(&self, key: &str) -> Option<PendingSearch> {
        if key == ENTER_KEY {
            self.activate()
        } else {
            None
        }
    }

    /// Validates the current input and claims the button. The button is
    /// disabled before this returns, so a second activation is ignored
    /// until the returned search finishes.
    fn activate(&self) -> Option<PendingSearch> {
        if self.button.is_disabled() {
            debug!("Search already in flight; ignoring activation");
            return None;
        }

        let query = match Query::parse(&self.input.value()) {
            Ok(query) => query,
            Err(e) => {
                self.status.error(e.to_string());
                return None;
            }
        };

        let guard = self.button.press()?;
        Some(PendingSearch {
            query,
            guard,
            orchestrator: self.orchestrator.clone(),
        })
    }
}
