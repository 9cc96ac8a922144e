pub mod config;
pub mod db;
pub mod errors;
pub mod messages;
pub mod models;
pub mod routes;
pub mod swagger;
pub mod test_utils;
pub mod utils;


use axum::{http::StatusCode, Json, Router};
use config::Config;
use db::StudentStore;
use messages::Messages;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudentStore>,
    pub messages: Arc<Messages>,
    pub config: Config,
}

/// Health check endpoint for monitoring
pub async fn health_check() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(serde_json::json!({"status": "ok"})))
}

/// Build the full application router with the student routes mounted under
/// the configured prefix.
pub fn create_app(state: Arc<AppState>) -> Router {
    let students = routes::students::router();
    let prefix = state.config.route_prefix.clone();

    let router = Router::new()
        .route("/api/health", axum::routing::get(health_check))
        .merge(swagger::create_openapi_router());

    let router = if prefix.is_empty() {
        router.merge(students)
    } else {
        router.nest(&prefix, students)
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
