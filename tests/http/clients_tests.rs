use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::header;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use reqwest::StatusCode;
use url::Url;

use inbox_search::config::{join_segments, QUERY_PATH, RESULTS_PATH};
use inbox_search::services::query_store::{ContentStore, GitHubContentStore};
use inbox_search::services::results_source::{FetchError, HttpResultsSource, ResultsSource};

const READY_BODY: &str = r#"[
  {"sender": "cfo@company.com", "subject": "Q3 Budget Review", "body": "Numbers attached.", "similarity_score": 0.93},
  {"sender": "pm@company.com", "subject": "Sprint notes", "body": "Line items.", "similarity_score": 0.61, "extra": 1}
]"#;

#[derive(Debug, Clone)]
struct Seen {
    path: String,
    query: String,
    cache_control: Option<String>,
    pragma: Option<String>,
    accept: Option<String>,
    user_agent: Option<String>,
}

#[derive(Clone, Default)]
struct Received(Arc<Mutex<Vec<Seen>>>);

impl Received {
    fn all(&self) -> Vec<Seen> {
        self.0.lock().unwrap().clone()
    }
}

fn header_value(req: &HttpRequest, name: header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn upstream(req: HttpRequest, received: web::Data<Received>) -> HttpResponse {
    received.0.lock().unwrap().push(Seen {
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        cache_control: header_value(&req, header::CACHE_CONTROL),
        pragma: header_value(&req, header::PRAGMA),
        accept: header_value(&req, header::ACCEPT),
        user_agent: header_value(&req, header::USER_AGENT),
    });

    let path = req.path();
    if path.starts_with("/ready/") {
        HttpResponse::Ok()
            .content_type("application/json")
            .body(READY_BODY)
    } else if path.starts_with("/broken/") {
        HttpResponse::Ok().body("[{\"sender\": ")
    } else if path == "/repos/o/r/contents/data/user_query.txt" {
        HttpResponse::Ok().json(serde_json::json!({ "sha": "3f2a9c", "path": QUERY_PATH }))
    } else {
        HttpResponse::NotFound().finish()
    }
}

/// Serves canned responses on an ephemeral local port.
fn start_upstream() -> (Url, Received, ServerHandle) {
    let received = Received::default();
    let data = web::Data::new(received.clone());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(upstream))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (Url::parse(&format!("http://{}/", addr)).unwrap(), received, handle)
}

fn results_source(base: &Url, prefix: &str) -> HttpResultsSource {
    HttpResultsSource::new(join_segments(base, &[prefix, RESULTS_PATH]).unwrap()).unwrap()
}

#[actix_web::test]
async fn fresh_reads_parse_results_and_bypass_caches() {
    let (base, received, handle) = start_upstream();
    let source = results_source(&base, "ready");

    let first = source.fetch(true).await.unwrap();
    let second = source.fetch(true).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].subject, "Q3 Budget Review");
    assert_eq!(first[1].relevance_percent(), 61);
    assert_eq!(second, first);

    let seen = received.all();
    assert_eq!(seen.len(), 2);
    for read in &seen {
        assert_eq!(read.path, "/ready/data/search_results.json");
        assert!(read.query.starts_with("t="), "cache buster on every read: {:?}", read);
        assert_eq!(read.cache_control.as_deref(), Some("no-cache"));
        assert_eq!(read.pragma.as_deref(), Some("no-cache"));
    }

    handle.stop(true).await;
}

#[actix_web::test]
async fn plain_reads_send_no_cache_directives() {
    let (base, received, handle) = start_upstream();
    results_source(&base, "ready").fetch(false).await.unwrap();

    let seen = received.all();
    assert_eq!(seen[0].query, "");
    assert!(seen[0].cache_control.is_none());

    handle.stop(true).await;
}

#[actix_web::test]
async fn missing_results_are_not_ready() {
    let (base, _received, handle) = start_upstream();
    let err = results_source(&base, "missing").fetch(true).await.unwrap_err();
    assert!(matches!(err, FetchError::NotReady(StatusCode::NOT_FOUND)), "{:?}", err);

    handle.stop(true).await;
}

#[actix_web::test]
async fn truncated_results_body_is_a_parse_error() {
    let (base, _received, handle) = start_upstream();
    let err = results_source(&base, "broken").fetch(true).await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)), "{:?}", err);

    handle.stop(true).await;
}

#[actix_web::test]
async fn content_store_reads_current_version() {
    let (base, received, handle) = start_upstream();
    let store = GitHubContentStore::new(join_segments(&base, &["repos", "o", "r", "contents"]).unwrap()).unwrap();

    assert_eq!(store.current_sha(QUERY_PATH).await.unwrap().as_deref(), Some("3f2a9c"));
    assert_eq!(store.current_sha("data/absent.txt").await.unwrap(), None);

    let seen = received.all();
    assert_eq!(seen[0].path, "/repos/o/r/contents/data/user_query.txt");
    assert_eq!(seen[0].accept.as_deref(), Some("application/vnd.github.v3+json"));
    assert!(seen[0]
        .user_agent
        .as_deref()
        .is_some_and(|ua| ua.starts_with("inbox-search/")));
    assert_eq!(seen[1].path, "/repos/o/r/contents/data/absent.txt");

    handle.stop(true).await;
}
