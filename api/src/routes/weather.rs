//! Compact widget and one-call outlook endpoints.
//!
//! - GET /api/v1/weather?city=NAME
//! - GET /api/v1/outlook?lat=LAT&lon=LON

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::dashboard::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::services::location::{validate_coordinates, LocationQuery};
use crate::services::presentation::{bind_compact, bind_outlook, CompactWeather, OutlookView};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompactQuery {
    /// City name; the configured default city when omitted
    pub city: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OutlookQuery {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

/// Compact widget response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompactResponse {
    /// The city that was searched
    pub city: String,
    /// Null when the provider could not be reached or answered unusably
    pub weather: Option<CompactWeather>,
}

/// Current conditions for the compact widget.
#[utoipa::path(
    get,
    path = "/api/v1/weather",
    tag = "Weather",
    params(CompactQuery),
    responses(
        (status = 200, description = "Compact current conditions", body = CompactResponse),
        (status = 400, description = "Empty city name", body = ErrorResponse),
    )
)]
pub async fn get_compact_weather(
    State(state): State<AppState>,
    params: Result<Query<CompactQuery>, QueryRejection>,
) -> Result<Json<CompactResponse>, AppError> {
    let Query(params) = params?;
    let city = match params.city {
        Some(city) => city.trim().to_string(),
        None => state.config.default_city.clone(),
    };
    if city.is_empty() {
        return Err(AppError::BadRequest("city must not be empty".to_string()));
    }

    let weather = match state
        .client
        .current_weather(&LocationQuery::City(city.clone()))
        .await
    {
        Ok(current) => Some(bind_compact(&current)),
        Err(e) => {
            tracing::warn!("Compact weather for '{}' unavailable: {}", city, e);
            None
        }
    };

    Ok(Json(CompactResponse { city, weather }))
}

/// Daily outlook and severe-weather alerts from the one-call endpoint.
#[utoipa::path(
    get,
    path = "/api/v1/outlook",
    tag = "Weather",
    params(OutlookQuery),
    responses(
        (status = 200, description = "Five daily cards and alerts", body = OutlookView),
        (status = 400, description = "Missing, malformed or out-of-range coordinates", body = ErrorResponse),
    )
)]
pub async fn get_outlook(
    State(state): State<AppState>,
    params: Result<Query<OutlookQuery>, QueryRejection>,
) -> Result<Json<OutlookView>, AppError> {
    let Query(params) = params?;
    let coord = validate_coordinates(params.lat, params.lon)?;

    let outlook = match state.client.outlook(coord).await {
        Ok(outlook) => Some(outlook),
        Err(e) => {
            tracing::warn!("Outlook for ({}, {}) unavailable: {}", coord.lat, coord.lon, e);
            None
        }
    };

    Ok(Json(bind_outlook(outlook.as_ref())))
}
