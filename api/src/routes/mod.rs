pub mod dashboard;
pub mod health;
pub mod weather;

use axum::{routing::get, Router};

use dashboard::AppState;

/// All API routes, sharing one [`AppState`].
pub(crate) fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route(
            "/api/v1/dashboard/latest",
            get(dashboard::get_latest_dashboard),
        )
        .route("/api/v1/weather", get(weather::get_compact_weather))
        .route("/api/v1/outlook", get(weather::get_outlook))
        .with_state(state)
}
