use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::dashboard::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok", or "degraded" when no API key is configured)
    pub status: String,
    /// API version
    pub version: String,
    /// Whether an OpenWeatherMap API key is configured
    pub api_key_configured: bool,
}

/// Health check endpoint.
///
/// Returns the API status and version. Without an API key every fetch is
/// skipped, so the service reports "degraded" (still 200).
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let key_ok = state.client.has_api_key();

    Json(HealthResponse {
        status: if key_ok {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_key_configured: key_ok,
    })
}
