use crate::models::page_session_manager::PageSessionManager;
use crate::services::search_orchestrator::SearchBackend;

#[derive(Clone)]
pub struct AppState {
    pub backend: SearchBackend,
    pub sessions: PageSessionManager,
}

impl AppState {
    pub fn new(backend: SearchBackend) -> Self {
        AppState {
            backend,
            sessions: PageSessionManager::new(),
        }
    }
}
