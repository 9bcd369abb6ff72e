use std::sync::Arc;
use std::time::Duration;

use inbox_search::models::page_elements::ButtonLabel;
use inbox_search::models::page_session::PageSession;
use inbox_search::models::status::{Severity, StatusMessage};
use inbox_search::services::search_orchestrator::SearchMode;

use super::{backend, ranked_results, CountingStore, ScriptedSource};

fn polling_page(source: &Arc<ScriptedSource>, store: &Arc<CountingStore>) -> PageSession {
    PageSession::open(&backend(SearchMode::Polling, source.clone(), store.clone()))
}

#[tokio::test(start_paused = true)]
async fn polling_search_renders_results_once_backend_publishes() {
    let source = Arc::new(ScriptedSource::not_ready_then(5, ranked_results()));
    let store = Arc::new(CountingStore::default());
    let page = polling_page(&source, &store);

    page.query_input.set_value("budget review");
    let pending = page.controller.on_click().expect("search should start");
    pending.run().await;

    assert_eq!(source.calls(), 6, "polling must stop at the first ready read");
    assert_eq!(store.calls(), 1);

    let snapshot = page.snapshot();
    assert!(snapshot.search_enabled);
    assert_eq!(snapshot.button_label, ButtonLabel::Idle);
    assert!(snapshot.scroll_into_view);

    let html = snapshot.results.expect("results mounted").render();
    let first = html.find("Q3 Budget Review").unwrap();
    let second = html.find("Sprint notes").unwrap();
    assert!(first < second, "ranking must be preserved");
    assert!(html.contains("Relevance: 93%"));
    assert!(html.contains("Relevance: 61%"));

    let status = snapshot.status.unwrap();
    assert_eq!(status.severity, Severity::Success);
    assert_eq!(status.text, "Search completed! Found 2 emails.");
}

#[tokio::test(start_paused = true)]
async fn polling_gives_up_after_twenty_attempts() {
    let source = Arc::new(ScriptedSource::never_ready());
    let store = Arc::new(CountingStore::default());
    let page = polling_page(&source, &store);

    let started = tokio::time::Instant::now();
    page.controller.on_click().unwrap().run().await;

    assert_eq!(source.calls(), 20);
    assert_eq!(started.elapsed(), Duration::from_secs(60));

    let snapshot = page.snapshot();
    assert!(snapshot.search_enabled);
    assert!(snapshot.results.is_none());
    assert_eq!(
        snapshot.status,
        Some(StatusMessage::error(
            "Error: Search timeout. The AI engine might be taking longer than expected."
        ))
    );
}

#[tokio::test(start_paused = true)]
async fn blank_query_never_reaches_the_backend() {
    let source = Arc::new(ScriptedSource::never_ready());
    let store = Arc::new(CountingStore::default());
    let page = polling_page(&source, &store);

    page.query_input.set_value("    ");
    assert!(page.controller.on_key("Enter").is_none());

    assert_eq!(source.calls(), 0);
    assert_eq!(store.calls(), 0);
    let snapshot = page.snapshot();
    assert!(snapshot.search_enabled);
    assert_eq!(
        snapshot.status,
        Some(StatusMessage::error("Please enter a search query."))
    );
}

#[tokio::test(start_paused = true)]
async fn second_activation_is_ignored_while_a_search_is_in_flight() {
    let source = Arc::new(ScriptedSource::not_ready_then(2, ranked_results()));
    let store = Arc::new(CountingStore::default());
    let page = polling_page(&source, &store);

    let pending = page.controller.on_click().unwrap();
    let handle = tokio::spawn(pending.run());

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(page.controller.on_click().is_none());
    assert!(page.controller.on_key("Enter").is_none());

    let busy = page.snapshot();
    assert!(!busy.search_enabled);
    assert_eq!(busy.button_label, ButtonLabel::Processing);
    assert_eq!(busy.refresh_after, Some(Duration::from_secs(3)));
    let status = busy.status.unwrap();
    assert!(status.is_busy());
    assert_eq!(status.text, "Still searching... (3s)");

    handle.await.unwrap();
    assert_eq!(source.calls(), 3);
    assert!(!page.search_button.is_disabled());
}

#[tokio::test(start_paused = true)]
async fn static_search_uses_sample_inbox_and_echoes_query() {
    let source = Arc::new(ScriptedSource::never_ready());
    let store = Arc::new(CountingStore::default());
    let page = PageSession::open(&backend(SearchMode::Static, source.clone(), store.clone()));

    page.query_input.set_value("receipts from my dentist");
    page.controller.on_key("Enter").unwrap().run().await;

    assert_eq!(source.calls(), 0);
    assert_eq!(store.calls(), 0);

    let snapshot = page.snapshot();
    let html = snapshot.results.unwrap().render();
    assert!(html.contains("Weekly Budget Update"));
    assert!(html.contains("Design Mockups Feedback"));
    assert!(html.contains("Meeting Notes: Project Sync"));
    assert!(html.contains("Matched your query: \"receipts from my dentist\""));
    assert!(snapshot.scroll_into_view);
    assert!(!page.snapshot().scroll_into_view, "scroll is requested once");
}

#[tokio::test(start_paused = true)]
async fn completion_status_hides_itself() {
    let source = Arc::new(ScriptedSource::not_ready_then(0, ranked_results()));
    let store = Arc::new(CountingStore::default());
    let page = polling_page(&source, &store);

    page.controller.on_click().unwrap().run().await;
    let snapshot = page.snapshot();
    assert_eq!(snapshot.status.map(|s| s.severity), Some(Severity::Success));
    assert_eq!(snapshot.refresh_after, Some(Duration::from_secs(5)));

    tokio::time::advance(Duration::from_secs(5)).await;
    let snapshot = page.snapshot();
    assert!(snapshot.status.is_none());
    assert!(snapshot.results.is_some(), "results stay after the banner hides");
    assert!(snapshot.refresh_after.is_none());
}

#[tokio::test]
async fn sessions_keep_their_own_page_state() {
    use inbox_search::models::page_session_manager::PageSessionManager;

    let source = Arc::new(ScriptedSource::never_ready());
    let store = Arc::new(CountingStore::default());
    let backend = backend(SearchMode::Static, source, store);
    let sessions = PageSessionManager::new();
    assert!(sessions.is_empty());

    let first = sessions.get_or_open("a", &backend);
    first.query_input.set_value("travel receipts");
    let again = sessions.get_or_open("a", &backend);
    let other = sessions.get_or_open("b", &backend);

    assert_eq!(again.query_input.value(), "travel receipts");
    assert_eq!(other.query_input.value(), "budget meeting notes from last week");
    assert_eq!(sessions.len(), 2);
    assert!(sessions.get("missing").is_none());
    assert!(sessions.get("b").is_some());
}

#[tokio::test(start_paused = true)]
async fn idle_sessions_are_evicted_when_new_ones_open() {
    use inbox_search::models::page_session_manager::PageSessionManager;

    let source = Arc::new(ScriptedSource::never_ready());
    let store = Arc::new(CountingStore::default());
    let mut backend = backend(SearchMode::Polling, source, store);
    backend.policy.max_attempts = 100;
    let sessions = PageSessionManager::with_idle_limit(Duration::from_secs(60));

    sessions.get_or_open("stale", &backend);
    let busy = sessions.get_or_open("busy", &backend);
    let search = busy.controller.on_click().unwrap();
    let handle = tokio::spawn(search.run());
    sessions.get_or_open("recent", &backend);

    tokio::time::advance(Duration::from_secs(45)).await;
    assert!(sessions.get("recent").is_some(), "reads keep a session alive");

    tokio::time::advance(Duration::from_secs(30)).await;
    sessions.get_or_open("newcomer", &backend);

    assert!(sessions.get("stale").is_none());
    assert!(sessions.get("busy").is_some(), "a page with a search in flight is kept");
    assert!(sessions.get("recent").is_some());
    assert_eq!(sessions.len(), 3);

    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn page_refreshes_at_the_configured_poll_interval() {
    let source = Arc::new(ScriptedSource::never_ready());
    let store = Arc::new(CountingStore::default());
    let mut backend = backend(SearchMode::Polling, source, store);
    backend.policy.interval = Duration::from_secs(1);
    backend.policy.max_attempts = 2;
    let page = PageSession::open(&backend);

    let handle = tokio::spawn(page.controller.on_click().unwrap().run());
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(page.snapshot().refresh_after, Some(Duration::from_secs(1)));

    handle.await.unwrap();
    assert!(page.snapshot().search_enabled);
}
