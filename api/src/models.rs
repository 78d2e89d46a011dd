//! Domain entities reshaped from OpenWeatherMap responses.
//!
//! These hold provider values as delivered (Kelvin temperatures, Unix-second
//! timestamps). Conversion to display units happens in the presentation
//! binder, never here.

use serde::Serialize;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// The top-level condition reported by the provider (`weather[0]`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    /// Category such as "Rain" or "Clouds"
    pub category: String,
    pub description: String,
    /// Provider icon code, e.g. "10d"
    pub icon: String,
}

/// Current conditions for a place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub place_name: String,
    pub country: Option<String>,
    pub coord: Coordinates,
    pub temperature_k: f64,
    pub feels_like_k: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    /// Wind speed as reported (m/s with the default unit system)
    pub wind_speed: f64,
    /// Visibility in metres, absent for some stations
    pub visibility_m: Option<f64>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    /// Observation time (Unix seconds)
    pub observed_at: i64,
    /// Shift from UTC in seconds for the place
    pub utc_offset_secs: i32,
    pub condition: Condition,
}

/// One point of the 3-hour forecast series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Unix seconds
    pub timestamp: i64,
    pub temperature_k: f64,
    pub temp_max_k: f64,
    pub temp_min_k: f64,
    pub condition: Condition,
}

/// A daily entry from the one-call endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOutlook {
    pub timestamp: i64,
    pub temp_day_k: f64,
    pub temp_max_k: f64,
    pub temp_min_k: f64,
    pub condition: Condition,
}

/// A severe-weather alert issued for the queried location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub event: String,
    pub description: String,
    pub sender: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// Daily outlook and alerts returned together by the one-call endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Outlook {
    pub utc_offset_secs: i32,
    pub daily: Vec<DailyOutlook>,
    pub alerts: Vec<Alert>,
}
