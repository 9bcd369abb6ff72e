use actix_session::Session;
use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};
use log::info;
use serde::Deserialize;

use crate::handlers::page_handler::current_page;
use crate::routes::app_state::AppState;
use crate::services::input_controller::PendingSearch;
use crate::views::page::PageView;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    /// Key that triggered the search; absent for button clicks.
    pub key: Option<String>,
}

/// Spawns an accepted search. Returns whether one was started.
fn start(pending: Option<PendingSearch>) -> bool {
    match pending {
        Some(search) => {
            info!("Dispatching search for \"{}\"", search.query());
            tokio::spawn(search.run());
            true
        }
        None => false,
    }
}

pub async fn submit_form(
    data: web::Data<AppState>,
    session: Session,
    form: web::Form<SearchForm>,
) -> HttpResponse {
    let page = current_page(&data, &session);
    page.query_input.set_value(&form.query);
    start(page.controller.on_click());

    HttpResponse::SeeOther()
        .append_header((LOCATION, "/"))
        .finish()
}

pub async fn submit_json(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<SearchRequest>,
) -> HttpResponse {
    let page = current_page(&data, &session);
    page.query_input.set_value(&req_body.query);

    let pending = match req_body.key.as_deref() {
        Some(key) => page.controller.on_key(key),
        None => page.controller.on_click(),
    };
    let started = start(pending);

    let view = PageView::from(&page.snapshot());
    if started {
        HttpResponse::Accepted().json(view)
    } else {
        HttpResponse::Ok().json(view)
    }
}
