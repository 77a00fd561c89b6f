use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::configuration::Settings;
use crate::server::{
    handlers::{
        health::health_check,
        ingest::load_data,
        recipes::{list_recipes, search_recipes},
        shell::shell,
    },
    services::cache::ResponseCache,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub cache: ResponseCache,
    pub recipes_file: PathBuf,
}

pub fn configure_app(pool: SqlitePool, settings: &Settings) -> Router {
    let state = AppState {
        pool,
        cache: ResponseCache::new(Duration::from_secs(settings.cache.ttl_seconds)),
        recipes_file: PathBuf::from(&settings.content.recipes_file),
    };

    app_router(state, &settings.content.static_dir)
}

async fn log_request(request: Request, next: Next) -> Response {
    info!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}

fn app_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(shell))
        .route("/health", get(health_check))
        .route("/api/recipes", get(list_recipes))
        .route("/api/recipes/search", get(search_recipes))
        .route("/load_data", get(load_data))
        // A /contact route rendering contact.html was reserved but never
        // wired up. Left unregistered; navigating there is a 404.
        // .route("/contact", get(contact))
        // Embedded documents and anything else in the static directory.
        // Unknown paths fall through to 404.
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
