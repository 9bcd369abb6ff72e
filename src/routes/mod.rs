use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::web;

pub mod app_state;
pub mod page_routes;
pub mod search_routes;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(page_routes::init_routes)
        .configure(search_routes::init_routes);
}

/// Cookie session carrying the page-session id. The page is served over
/// plain HTTP on localhost, so the cookie is not marked secure.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .build()
}
