//! Dashboard HTTP endpoints.
//!
//! - GET /api/v1/dashboard?city=NAME | ?lat=LAT&lon=LON
//! - GET /api/v1/dashboard/latest

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::Json;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{AppError, ErrorResponse};
use crate::services::dashboard::{run_chain, Dashboard, DashboardStore};
use crate::services::location::{LocationParams, LocationQuery};
use crate::services::openweather::OwmClient;
use crate::services::presentation::{bind_dashboard, DashboardView};

/// Header set when a later search published before this one finished.
pub const SUPERSEDED_HEADER: &str = "x-dashboard-superseded";

/// Shared application state for all endpoints.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) client: OwmClient,
    pub(crate) store: DashboardStore,
    pub(crate) config: Arc<AppConfig>,
}

/// Search for a place and build its dashboard.
///
/// Runs current weather first, then forecast and air quality for the
/// resolved coordinates. Provider failures leave their sections empty; the
/// response is still 200. When current weather itself fails the response is
/// empty and the latest dashboard is left as it was. Otherwise the result
/// becomes the latest dashboard unless a search that started later has
/// already finished, in which case the `X-Dashboard-Superseded: true`
/// header is set.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    params(LocationParams),
    responses(
        (status = 200, description = "Dashboard for the requested place", body = DashboardView,
         headers(
             ("X-Dashboard-Superseded" = String, description = "Set to 'true' when a newer search already replaced the latest dashboard")
         )),
        (status = 400, description = "No usable location given or malformed query", body = ErrorResponse),
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    params: Result<Query<LocationParams>, QueryRejection>,
) -> Result<(HeaderMap, Json<DashboardView>), AppError> {
    let Query(params) = params?;
    let query = LocationQuery::from_params(&params)?;

    let ticket = state.store.begin();
    let mut headers = HeaderMap::new();

    let Some(dashboard) = run_chain(&state.client, &query, state.config.alerts_enabled).await
    else {
        tracing::info!("Search for {:?} produced no dashboard, keeping the latest", query);
        let view = bind_dashboard(&Dashboard::default(), &state.config.map_tile_url);
        return Ok((headers, Json(view)));
    };

    let view = bind_dashboard(&dashboard, &state.config.map_tile_url);
    if !state.store.publish(ticket, dashboard).await {
        headers.insert(SUPERSEDED_HEADER, HeaderValue::from_static("true"));
    }

    Ok((headers, Json(view)))
}

/// The most recently published dashboard.
///
/// Before any search completes every section is empty and the
/// recommendation panels show their placeholders.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/latest",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Latest dashboard", body = DashboardView),
    )
)]
pub async fn get_latest_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    let dashboard = state.store.latest().await;
    Json(bind_dashboard(&dashboard, &state.config.map_tile_url))
}
