//! OpenWeatherMap 2.5 client.
//!
//! Covers the four endpoints the dashboard reads: current weather, 5-day /
//! 3-hour forecast, air pollution and one-call.
//! See: https://openweathermap.org/api

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;

use crate::models::{
    Alert, Condition, Coordinates, CurrentConditions, DailyOutlook, ForecastPoint, Outlook,
};
use crate::services::location::LocationQuery;

/// Provider endpoints, relative to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Weather,
    Forecast,
    AirPollution,
    OneCall,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Weather => "weather",
            Endpoint::Forecast => "forecast",
            Endpoint::AirPollution => "air_pollution",
            Endpoint::OneCall => "onecall",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// Why a provider call produced no data.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("OpenWeatherMap API key is not configured")]
    MissingApiKey,

    #[error("OpenWeatherMap {endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenWeatherMap {endpoint} returned HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("OpenWeatherMap {endpoint} response structure error: {message}")]
    Malformed { endpoint: Endpoint, message: String },
}

impl AcquisitionError {
    fn malformed(endpoint: Endpoint, message: impl Into<String>) -> Self {
        AcquisitionError::Malformed {
            endpoint,
            message: message.into(),
        }
    }
}

/// Client for the OpenWeatherMap REST API.
#[derive(Debug, Clone)]
pub struct OwmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

// --- OpenWeatherMap JSON response types ---

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    coord: OwmCoord,
    weather: Vec<OwmCondition>,
    main: OwmCurrentMain,
    visibility: Option<f64>,
    wind: OwmWind,
    dt: i64,
    #[serde(default)]
    sys: OwmSys,
    #[serde(default)]
    timezone: i32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentMain {
    temp: f64,
    feels_like: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwmSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwmForecast {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmForecastMain,
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwmAirPollution {
    list: Vec<OwmAirPollutionItem>,
}

#[derive(Debug, Deserialize)]
struct OwmAirPollutionItem {
    main: OwmAqi,
}

#[derive(Debug, Deserialize)]
struct OwmAqi {
    aqi: i64,
}

#[derive(Debug, Deserialize)]
struct OwmOneCall {
    #[serde(default)]
    timezone_offset: i32,
    #[serde(default)]
    daily: Vec<OwmDaily>,
    alerts: Option<Vec<OwmAlert>>,
}

#[derive(Debug, Deserialize)]
struct OwmDaily {
    dt: i64,
    temp: OwmDailyTemp,
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmDailyTemp {
    day: f64,
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct OwmAlert {
    sender_name: Option<String>,
    event: String,
    start: Option<i64>,
    end: Option<i64>,
    #[serde(default)]
    description: String,
}

/// Take `weather[0]`; every endpoint reports at least one condition.
fn first_condition(
    endpoint: Endpoint,
    weather: Vec<OwmCondition>,
) -> Result<Condition, AcquisitionError> {
    let first = weather
        .into_iter()
        .next()
        .ok_or_else(|| AcquisitionError::malformed(endpoint, "empty weather array"))?;
    Ok(Condition {
        category: first.main,
        description: first.description,
        icon: first.icon,
    })
}

impl OwmClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Current conditions by city name or coordinates.
    pub async fn current_weather(
        &self,
        query: &LocationQuery,
    ) -> Result<CurrentConditions, AcquisitionError> {
        let params = match query {
            LocationQuery::City(city) => vec![("q", city.clone())],
            LocationQuery::Coordinates(coord) => coord_params(*coord),
        };
        let raw: OwmCurrent = self.get_json(Endpoint::Weather, &params).await?;

        Ok(CurrentConditions {
            place_name: raw.name,
            country: raw.sys.country,
            coord: Coordinates {
                lat: raw.coord.lat,
                lon: raw.coord.lon,
            },
            temperature_k: raw.main.temp,
            feels_like_k: raw.main.feels_like,
            humidity_pct: raw.main.humidity,
            pressure_hpa: raw.main.pressure,
            wind_speed: raw.wind.speed,
            visibility_m: raw.visibility,
            sunrise: raw.sys.sunrise,
            sunset: raw.sys.sunset,
            observed_at: raw.dt,
            utc_offset_secs: raw.timezone,
            condition: first_condition(Endpoint::Weather, raw.weather)?,
        })
    }

    /// The 3-hour forecast series, in provider order.
    pub async fn forecast(&self, coord: Coordinates) -> Result<Vec<ForecastPoint>, AcquisitionError> {
        let raw: OwmForecast = self
            .get_json(Endpoint::Forecast, &coord_params(coord))
            .await?;

        raw.list
            .into_iter()
            .map(|item| {
                Ok(ForecastPoint {
                    timestamp: item.dt,
                    temperature_k: item.main.temp,
                    temp_max_k: item.main.temp_max,
                    temp_min_k: item.main.temp_min,
                    condition: first_condition(Endpoint::Forecast, item.weather)?,
                })
            })
            .collect()
    }

    /// The current air-quality index (`list[0].main.aqi`).
    pub async fn air_quality(&self, coord: Coordinates) -> Result<i64, AcquisitionError> {
        let raw: OwmAirPollution = self
            .get_json(Endpoint::AirPollution, &coord_params(coord))
            .await?;

        raw.list
            .first()
            .map(|entry| entry.main.aqi)
            .ok_or_else(|| AcquisitionError::malformed(Endpoint::AirPollution, "empty list"))
    }

    /// Daily outlook and severe-weather alerts from the one-call endpoint.
    pub async fn outlook(&self, coord: Coordinates) -> Result<Outlook, AcquisitionError> {
        let mut params = coord_params(coord);
        params.push(("exclude", "minutely,hourly".to_string()));
        let raw: OwmOneCall = self.get_json(Endpoint::OneCall, &params).await?;

        let daily = raw
            .daily
            .into_iter()
            .map(|d| {
                Ok(DailyOutlook {
                    timestamp: d.dt,
                    temp_day_k: d.temp.day,
                    temp_max_k: d.temp.max,
                    temp_min_k: d.temp.min,
                    condition: first_condition(Endpoint::OneCall, d.weather)?,
                })
            })
            .collect::<Result<Vec<_>, AcquisitionError>>()?;

        let alerts = raw
            .alerts
            .unwrap_or_default()
            .into_iter()
            .map(|a| Alert {
                event: a.event,
                description: a.description,
                sender: a.sender_name,
                start: a.start,
                end: a.end,
            })
            .collect();

        Ok(Outlook {
            utc_offset_secs: raw.timezone_offset,
            daily,
            alerts,
        })
    }

    /// Issue a GET and decode the body into `T`.
    ///
    /// The key is checked before anything goes on the wire.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<T, AcquisitionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AcquisitionError::MissingApiKey)?;

        let url = format!("{}/{}", self.base_url, endpoint.path());
        tracing::debug!("Requesting OpenWeatherMap {} {:?}", endpoint, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", api_key)])
            .send()
            .await
            .map_err(|source| AcquisitionError::Transport { endpoint, source })?;

        if !response.status().is_success() {
            return Err(AcquisitionError::Status {
                endpoint,
                status: response.status().as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| AcquisitionError::Transport { endpoint, source })?;

        serde_json::from_slice(&body).map_err(|e| AcquisitionError::malformed(endpoint, e.to_string()))
    }
}

fn coord_params(coord: Coordinates) -> Vec<(&'static str, String)> {
    vec![("lat", coord.lat.to_string()), ("lon", coord.lon.to_string())]
}
