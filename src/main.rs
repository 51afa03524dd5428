mod config;
mod error;
mod handlers;
mod models;
mod services;
mod store;
mod validation;

use config::Config;
use ntex::web;
use ntex_cors::Cors;
use std::sync::Arc;
use store::ScoreStore;

#[ntex::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(Config::from_env());

    let store = match ScoreStore::open(&config.scores_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "Failed to open score store");
            return Err(std::io::Error::other(e));
        }
    };

    tracing::info!("Scores stored in {}", store.path().display());
    tracing::info!("Flashcard server starting on {}:{}", config.host, config.port);

    let bind = (config.host.clone(), config.port);
    web::HttpServer::new(move || {
        web::App::new()
            .state(store.clone())
            .state(config.clone())
            .wrap(
                Cors::new()
                    .allowed_origin("*")
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type", "Authorization"])
                    .max_age(3600)
                    .finish(),
            )
            // Health check
            .route("/api/health", web::get().to(health))
            // Scores and deck catalog
            .service(
                web::resource("/")
                    .route(web::get().to(handlers::actions::get_action))
                    .route(web::post().to(handlers::actions::post_action)),
            )
            // Deck content
            .route("/api/deck", web::get().to(handlers::decks::get_deck))
            .route("/api/announce", web::get().to(handlers::decks::announce))
            // Mascots
            .route("/api/mascots", web::get().to(handlers::mascots::list_mascots))
            .route("/mascots/{folder}", web::get().to(handlers::mascots::get_mascot_settings))
            .route(
                "/mascot-media/{mascot}/{path}*",
                web::get().to(handlers::mascots::get_mascot_media),
            )
    })
    .bind(bind)?
    .run()
    .await
}

async fn health() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
