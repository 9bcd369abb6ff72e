use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;

use inbox_search::config::{self, SearchConfig};
use inbox_search::routes::{self, app_state::AppState};
use inbox_search::services::search_orchestrator::SearchBackend;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    config::init_logging();

    let search_config = SearchConfig::from_env()?;
    let backend = SearchBackend::from_config(&search_config)?;
    info!(
        "Search mode {}; results read from {}",
        search_config.mode,
        search_config.results_url()?
    );

    let state = web::Data::new(AppState::new(backend));
    let key = Key::generate();

    info!("Starting server on http://{}", search_config.bind_address());
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(routes::session_middleware(key.clone()))
            .app_data(state.clone())
            .configure(routes::init_routes)
            .service(Files::new("/static", "./static"))
    })
    .bind((search_config.host.as_str(), search_config.port))?
    .run()
    .await?;

    Ok(())
}
