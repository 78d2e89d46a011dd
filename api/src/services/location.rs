//! Location resolution for incoming dashboard requests.
//!
//! A request names a place either by free text (geocoded by the provider)
//! or by device coordinates obtained by the browser shell.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::Coordinates;

/// Where the acquisition chain should look.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-text city name, passed through to the provider untouched.
    City(String),
    /// Device position.
    Coordinates(Coordinates),
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("either `city` or both `lat` and `lon` are required")]
    Missing,

    #[error("city must not be empty")]
    EmptyCity,

    #[error("`lat` and `lon` must be given together")]
    PartialCoordinates,

    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),
}

/// Raw query parameters naming a location.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocationParams {
    /// City name (e.g. "London"); takes precedence over coordinates
    pub city: Option<String>,
    /// Latitude in degrees (from device geolocation)
    pub lat: Option<f64>,
    /// Longitude in degrees (from device geolocation)
    pub lon: Option<f64>,
}

impl LocationQuery {
    /// Resolve request parameters into a query.
    ///
    /// A denied geolocation prompt leaves the shell with nothing to send, so
    /// it lands on [`LocationError::Missing`]; there is no fallback place.
    pub fn from_params(params: &LocationParams) -> Result<Self, LocationError> {
        if let Some(city) = &params.city {
            let city = city.trim();
            if city.is_empty() {
                return Err(LocationError::EmptyCity);
            }
            return Ok(Self::City(city.to_string()));
        }

        match (params.lat, params.lon) {
            (Some(lat), Some(lon)) => Ok(Self::Coordinates(validate_coordinates(lat, lon)?)),
            (None, None) => Err(LocationError::Missing),
            _ => Err(LocationError::PartialCoordinates),
        }
    }
}

/// Check that a coordinate pair lies on the globe.
///
/// NaN fails both range checks, so it is rejected as out of range.
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<Coordinates, LocationError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(LocationError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(LocationError::LongitudeOutOfRange(lon));
    }
    Ok(Coordinates { lat, lon })
}
