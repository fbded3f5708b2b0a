use axum::{extract::State, routing::get, Json, Router};
use tracing::info;

use crate::models::{AppState, HealthResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        api_key_configured: state.config.llm.api_key_configured(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    info!(
        api_key_configured = response.api_key_configured,
        "Health check request"
    );
    Json(response)
}
