use actix_session::Session;
use actix_web::{web, HttpResponse};
use log::{error, info};
use uuid::Uuid;

use crate::models::page_session::{PageSession, PageSnapshot};
use crate::routes::app_state::AppState;
use crate::views::page::{render_page, PageView};

const SESSION_KEY: &str = "page_session_id";

/// The caller's page session if the cookie names a live one.
pub fn existing_page(data: &web::Data<AppState>, session: &Session) -> Option<PageSession> {
    match session.get::<String>(SESSION_KEY) {
        Ok(Some(id)) => data.sessions.get(&id),
        Ok(None) => None,
        Err(e) => {
            error!("Unreadable page session cookie: {:?}", e);
            None
        }
    }
}

/// The caller's page session, opened on first visit.
pub fn current_page(data: &web::Data<AppState>, session: &Session) -> PageSession {
    let session_id = match session.get::<String>(SESSION_KEY) {
        Ok(Some(id)) => id,
        Ok(None) | Err(_) => {
            let id = Uuid::new_v4().to_string();
            if let Err(e) = session.insert(SESSION_KEY, id.clone()) {
                error!("Failed to store page session id in cookie: {:?}", e);
            } else {
                info!("Opened page session {}", id);
            }
            id
        }
    };
    data.sessions.get_or_open(&session_id, &data.backend)
}

pub async fn render_index(data: web::Data<AppState>, session: Session) -> HttpResponse {
    let page = current_page(&data, &session);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&page.snapshot()))
}

/// Never opens a session; without one the idle page is reported.
pub async fn page_view(data: web::Data<AppState>, session: Session) -> HttpResponse {
    let snapshot = match existing_page(&data, &session) {
        Some(page) => page.snapshot(),
        None => PageSnapshot::idle(),
    };
    HttpResponse::Ok().json(PageView::from(&snapshot))
}
