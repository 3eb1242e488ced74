use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use crate::{adapters::state::AppState, application::error::ApplicationError};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
}

pub struct HealthController;

impl HealthController {
    /// GET /health
    pub async fn health_check(
        State(app_state): State<AppState>,
    ) -> Result<Json<HealthResponse>, ApplicationError> {
        debug!("Health check requested");

        app_state.file_record_repository.ping().await?;

        Ok(Json(HealthResponse {
            status: "healthy".to_string(),
            storage: app_state.storage_service.provider().to_string(),
        }))
    }
}
