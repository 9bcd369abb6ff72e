use actix_session::Session;
use actix_web::{post, web, Responder};

use crate::handlers::search_handler::{SearchForm, SearchRequest};
use crate::routes::app_state::AppState;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(search_form).service(search_api);
}

#[post("/search")]
async fn search_form(
    data: web::Data<AppState>,
    session: Session,
    form: web::Form<SearchForm>,
) -> impl Responder {
    crate::handlers::search_handler::submit_form(data, session, form).await
}

#[post("/api/search")]
async fn search_api(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<SearchRequest>,
) -> impl Responder {
    crate::handlers::search_handler::submit_json(data, session, req_body).await
}
