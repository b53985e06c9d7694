pub mod user_router;
pub mod gift_router;
pub mod announcement_router;
pub mod exchange_date_router;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::app::app::AppServices;
use crate::config::upload_conf::UPLOAD_URL_PREFIX;

pub const WELCOME_MESSAGE: &str = "Welcome to the Gift Exchange Platform API";

/// Every resource router, the static upload directory and the shared layers.
pub fn create_router(services: &AppServices, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(|| async { WELCOME_MESSAGE }))
        .route("/health", get(|| async { "OK" }))
        .merge(user_router::user_router(services.user_service.clone()))
        .merge(announcement_router::announcement_router(services.announcement_service.clone()))
        .merge(gift_router::gift_router(services.gift_service.clone()))
        .merge(exchange_date_router::exchange_date_router(services.exchange_date_service.clone()))
        .nest_service(UPLOAD_URL_PREFIX, ServeDir::new(services.gift_service.uploads.dir()))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
