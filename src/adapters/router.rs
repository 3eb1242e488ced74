use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::adapters::{
    controllers::{file_controller::FileController, health_controller::HealthController},
    state::AppState,
};

pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<_> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_router(app_state: AppState, max_upload_bytes: usize, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(HealthController::health_check))
        .route(
            "/files",
            get(FileController::list_files).post(FileController::upload_file),
        )
        .route("/files/{id}", get(FileController::get_file))
        .route("/files/{id}/download", get(FileController::download_file))
        .route("/files/{id}/view", get(FileController::view_file))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
