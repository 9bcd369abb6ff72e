use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::debug;
use tokio::time::Instant;

use crate::models::page_session::PageSession;
use crate::services::search_orchestrator::SearchBackend;

/// Pages untouched for this long are dropped.
pub const DEFAULT_IDLE_LIMIT: Duration = Duration::from_secs(30 * 60);

struct Entry {
    page: PageSession,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct PageSessionManager {
    sessions: Arc<Mutex<HashMap<String, Entry>>>,
    idle_limit: Duration,
}

impl Default for PageSessionManager {
    fn default() -> Self {
        Self::with_idle_limit(DEFAULT_IDLE_LIMIT)
    }
}

impl PageSessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_limit(idle_limit: Duration) -> Self {
        PageSessionManager {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_limit,
        }
    }

    /// Retrieves a session if it exists
    pub fn get(&self, session_id: &str) -> Option<PageSession> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.get_mut(session_id).map(|entry| {
            entry.last_seen = Instant::now();
            entry.page.clone()
        })
    }

    /// Returns the session for `session_id`, opening a fresh page on first use.
    /// Idle pages are evicted before a new one is opened.
    pub fn get_or_open(&self, session_id: &str, backend: &SearchBackend) -> PageSession {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        if !sessions.contains_key(session_id) {
            let before = sessions.len();
            sessions.retain(|_, entry| {
                entry.page.search_button.is_disabled()
                    || now.saturating_duration_since(entry.last_seen) < self.idle_limit
            });
            if sessions.len() < before {
                debug!("Evicted {} idle page sessions", before - sessions.len());
            }
        }

        let entry = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Entry {
                page: PageSession::open(backend),
                last_seen: now,
            });
        entry.last_seen = now;
        entry.page.clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
