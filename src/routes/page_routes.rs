use actix_session::Session;
use actix_web::{get, web, Responder};

use crate::routes::app_state::AppState;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(view);
}

#[get("/")]
async fn index(data: web::Data<AppState>, session: Session) -> impl Responder {
    crate::handlers::page_handler::render_index(data, session).await
}

#[get("/api/view")]
async fn view(data: web::Data<AppState>, session: Session) -> impl Responder {
    crate::handlers::page_handler::page_view(data, session).await
}
