//! Presentation binding: dashboard state → display-ready view types.
//!
//! Pure formatting. Forecast series are cut to fixed prefixes (5 daily
//! cards, 8 hourly cards, 10 chart points), temperatures become whole °C
//! and Unix timestamps are rendered in the location's UTC offset.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Alert, CurrentConditions, DailyOutlook, ForecastPoint, Outlook};
use crate::services::dashboard::Dashboard;
use crate::services::mapping::{
    aqi_badge, celsius_floor, celsius_rounded, icon_asset, provider_icon_url, AqiBadge, IconAsset,
};

pub const DAILY_CARDS: usize = 5;
pub const HOURLY_CARDS: usize = 8;
pub const CHART_POINTS: usize = 10;

pub const CHART_LABEL: &str = "Temperature (°C)";
pub const MAP_ZOOM: u8 = 10;
pub const MAP_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const DATE_FORMAT: &str = "%-m/%-d/%Y";
const TIME_FORMAT: &str = "%H:%M";

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// "Now" card with the headline temperature.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NowCard {
    /// Current temperature in whole °C (rounded down)
    pub temperature_c: i32,
    /// Condition description (e.g. "light rain")
    pub description: String,
    /// Provider icon URL
    pub icon_url: String,
    /// Date of the observation in local time (M/D/YYYY)
    pub date: String,
    /// "Place, CC"
    pub place: String,
}

/// "Today's Highlights" card.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Highlights {
    pub air_quality: AqiBadge,
    /// Raw AQI reading, null until one arrives
    pub aqi: Option<i64>,
    /// Local sunrise time (HH:MM)
    pub sunrise: Option<String>,
    /// Local sunset time (HH:MM)
    pub sunset: Option<String>,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub visibility_km: Option<f64>,
    pub feels_like_c: i32,
}

/// Daily forecast card.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ForecastCard {
    /// Local date (M/D/YYYY)
    pub date: String,
    /// Maximum temperature in whole °C (rounded down)
    pub temp_max_c: i32,
    pub description: String,
    pub icon_url: String,
}

/// "Today at" hourly card.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HourlyCard {
    /// Local time (HH:MM)
    pub time: String,
    pub temperature_c: i32,
    pub description: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartPoint {
    /// Local date label (M/D/YYYY)
    pub date: String,
    pub temperature_c: i32,
}

/// A single line series for the temperature chart.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertView {
    pub event: String,
    pub description: String,
}

/// Severe-weather alerts, or the all-clear message when there are none.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertsPanel {
    pub title: String,
    pub alerts: Vec<AlertView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health or crop advice, or the placeholder when none is available.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecommendationPanel {
    pub title: String,
    pub text: String,
}

/// Location map: a marker at the place on a slippy-map tile layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    /// Tile URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders
    pub tile_url: String,
    pub attribution: String,
    /// Marker popup text
    pub popup: String,
}

/// The full dashboard as rendered by the browser shell.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardView {
    pub now: Option<NowCard>,
    pub highlights: Option<Highlights>,
    pub daily: Vec<ForecastCard>,
    pub hourly: Vec<HourlyCard>,
    pub chart: ChartSeries,
    pub alerts: AlertsPanel,
    pub health: RecommendationPanel,
    pub crop: RecommendationPanel,
    pub map: Option<MapView>,
}

/// The compact single-card widget.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompactWeather {
    /// Temperature in whole °C (rounded to nearest)
    pub temperature_c: i32,
    pub location: String,
    pub humidity_pct: f64,
    pub wind_speed: f64,
    pub icon: IconAsset,
    /// Asset file name for `icon`
    pub icon_file: String,
}

/// One-call outlook: daily cards plus alerts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OutlookView {
    pub daily: Vec<ForecastCard>,
    pub alerts: AlertsPanel,
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// First `n` items, in original order.
pub fn leading<T>(items: &[T], n: usize) -> &[T] {
    &items[..items.len().min(n)]
}

/// Render a Unix timestamp in a fixed UTC offset. Out-of-range offsets
/// fall back to UTC; out-of-range timestamps render as an empty string.
fn format_local(timestamp: i64, utc_offset_secs: i32, format: &str) -> String {
    let offset = FixedOffset::east_opt(utc_offset_secs).unwrap_or_else(|| {
        tracing::warn!("Invalid UTC offset {}s, rendering in UTC", utc_offset_secs);
        Utc.fix()
    });
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.with_timezone(&offset).format(format).to_string(),
        None => {
            tracing::warn!("Timestamp {} out of range", timestamp);
            String::new()
        }
    }
}

pub fn local_date(timestamp: i64, utc_offset_secs: i32) -> String {
    format_local(timestamp, utc_offset_secs, DATE_FORMAT)
}

pub fn local_time(timestamp: i64, utc_offset_secs: i32) -> String {
    format_local(timestamp, utc_offset_secs, TIME_FORMAT)
}

fn place_label(current: &CurrentConditions) -> String {
    match &current.country {
        Some(country) => format!("{}, {}", current.place_name, country),
        None => current.place_name.clone(),
    }
}

// ---------------------------------------------------------------------------
// Binders
// ---------------------------------------------------------------------------

pub fn now_card(current: &CurrentConditions) -> NowCard {
    NowCard {
        temperature_c: celsius_floor(current.temperature_k),
        description: current.condition.description.clone(),
        icon_url: provider_icon_url(&current.condition.icon),
        date: local_date(current.observed_at, current.utc_offset_secs),
        place: place_label(current),
    }
}

pub fn highlights(current: &CurrentConditions, aqi: Option<i64>) -> Highlights {
    let offset = current.utc_offset_secs;
    Highlights {
        air_quality: aqi_badge(aqi),
        aqi,
        sunrise: current.sunrise.map(|t| local_time(t, offset)),
        sunset: current.sunset.map(|t| local_time(t, offset)),
        humidity_pct: current.humidity_pct,
        pressure_hpa: current.pressure_hpa,
        visibility_km: current.visibility_m.map(|m| m / 1000.0),
        feels_like_c: celsius_floor(current.feels_like_k),
    }
}

pub fn daily_cards(points: &[ForecastPoint], utc_offset_secs: i32) -> Vec<ForecastCard> {
    leading(points, DAILY_CARDS)
        .iter()
        .map(|p| ForecastCard {
            date: local_date(p.timestamp, utc_offset_secs),
            temp_max_c: celsius_floor(p.temp_max_k),
            description: p.condition.description.clone(),
            icon_url: provider_icon_url(&p.condition.icon),
        })
        .collect()
}

pub fn hourly_cards(points: &[ForecastPoint], utc_offset_secs: i32) -> Vec<HourlyCard> {
    leading(points, HOURLY_CARDS)
        .iter()
        .map(|p| HourlyCard {
            time: local_time(p.timestamp, utc_offset_secs),
            temperature_c: celsius_floor(p.temperature_k),
            description: p.condition.description.clone(),
            icon_url: provider_icon_url(&p.condition.icon),
        })
        .collect()
}

pub fn chart_series(points: &[ForecastPoint], utc_offset_secs: i32) -> ChartSeries {
    ChartSeries {
        label: CHART_LABEL.to_string(),
        points: leading(points, CHART_POINTS)
            .iter()
            .map(|p| ChartPoint {
                date: local_date(p.timestamp, utc_offset_secs),
                temperature_c: celsius_floor(p.temperature_k),
            })
            .collect(),
    }
}

pub fn alerts_panel(alerts: &[Alert]) -> AlertsPanel {
    if alerts.is_empty() {
        return AlertsPanel {
            title: "No Severe Weather Alerts".to_string(),
            alerts: Vec::new(),
            message: Some("The weather looks good! Stay prepared, and enjoy your day.".to_string()),
        };
    }
    AlertsPanel {
        title: "Severe Weather Alerts".to_string(),
        alerts: alerts
            .iter()
            .map(|a| AlertView {
                event: a.event.clone(),
                description: a.description.clone(),
            })
            .collect(),
        message: None,
    }
}

fn recommendation_panels(dashboard: &Dashboard) -> (RecommendationPanel, RecommendationPanel) {
    match &dashboard.recommendations {
        Some(r) => (
            RecommendationPanel {
                title: "Health Recommendations".to_string(),
                text: r.health.clone(),
            },
            RecommendationPanel {
                title: "Crop Recommendations".to_string(),
                text: r.crop.clone(),
            },
        ),
        None => (
            RecommendationPanel {
                title: "No Health Recommendations".to_string(),
                text: "Stay healthy and happy!".to_string(),
            },
            RecommendationPanel {
                title: "No Crop Recommendations".to_string(),
                text: "Plant your favorite crops!".to_string(),
            },
        ),
    }
}

pub fn map_view(current: &CurrentConditions, tile_url: &str) -> MapView {
    MapView {
        center_lat: current.coord.lat,
        center_lon: current.coord.lon,
        zoom: MAP_ZOOM,
        tile_url: tile_url.to_string(),
        attribution: MAP_ATTRIBUTION.to_string(),
        popup: current.place_name.clone(),
    }
}

/// Bind the whole dashboard. Sections that were never fetched come out
/// empty (or as their placeholder text).
pub fn bind_dashboard(dashboard: &Dashboard, tile_url: &str) -> DashboardView {
    let current = dashboard.current.as_ref();
    let offset = current.map(|c| c.utc_offset_secs).unwrap_or(0);
    let points = dashboard.forecast.as_deref().unwrap_or(&[]);
    let (health, crop) = recommendation_panels(dashboard);

    DashboardView {
        now: current.map(now_card),
        highlights: current.map(|c| highlights(c, dashboard.air_quality)),
        daily: daily_cards(points, offset),
        hourly: hourly_cards(points, offset),
        chart: chart_series(points, offset),
        alerts: alerts_panel(&dashboard.alerts),
        health,
        crop,
        map: current.map(|c| map_view(c, tile_url)),
    }
}

pub fn bind_compact(current: &CurrentConditions) -> CompactWeather {
    let icon = icon_asset(&current.condition.icon);
    CompactWeather {
        temperature_c: celsius_rounded(current.temperature_k),
        location: current.place_name.clone(),
        humidity_pct: current.humidity_pct,
        wind_speed: current.wind_speed,
        icon,
        icon_file: icon.file_name().to_string(),
    }
}

fn outlook_card(day: &DailyOutlook, utc_offset_secs: i32) -> ForecastCard {
    ForecastCard {
        date: local_date(day.timestamp, utc_offset_secs),
        temp_max_c: celsius_floor(day.temp_max_k),
        description: day.condition.description.clone(),
        icon_url: provider_icon_url(&day.condition.icon),
    }
}

/// Bind a one-call outlook. `None` (fetch failed) yields no cards and the
/// all-clear alerts panel.
pub fn bind_outlook(outlook: Option<&Outlook>) -> OutlookView {
    match outlook {
        Some(o) => OutlookView {
            daily: leading(&o.daily, DAILY_CARDS)
                .iter()
                .map(|d| outlook_card(d, o.utc_offset_secs))
                .collect(),
            alerts: alerts_panel(&o.alerts),
        },
        None => OutlookView {
            daily: Vec::new(),
            alerts: alerts_panel(&[]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, Coordinates};
    use crate::services::dashboard::DashboardUpdate;
    use crate::services::mapping::recommendations;

    const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

    fn condition(category: &str, icon: &str) -> Condition {
        Condition {
            category: category.to_string(),
            description: category.to_lowercase(),
            icon: icon.to_string(),
        }
    }

    fn london() -> CurrentConditions {
        CurrentConditions {
            place_name: "London".to_string(),
            country: Some("GB".to_string()),
            coord: Coordinates {
                lat: 51.5,
                lon: -0.1,
            },
            temperature_k: 300.15,
            feels_like_k: 301.2,
            humidity_pct: 64.0,
            pressure_hpa: 1012.0,
            wind_speed: 4.1,
            visibility_m: Some(10000.0),
            // 2026-03-01 06:30:00 UTC / 17:45:00 UTC
            sunrise: Some(1_772_346_600),
            sunset: Some(1_772_387_100),
            observed_at: 1_772_346_600,
            utc_offset_secs: 3600,
            condition: condition("Rain", "10d"),
        }
    }

    /// 40 points, 3 hours apart from 2026-03-01 00:00 UTC, 280.15 K + i.
    fn forty_points() -> Vec<ForecastPoint> {
        (0..40)
            .map(|i| ForecastPoint {
                timestamp: 1_772_323_200 + i * 10_800,
                temperature_k: 280.15 + i as f64,
                temp_max_k: 281.15 + i as f64,
                temp_min_k: 279.15 + i as f64,
                condition: condition("Clouds", "04d"),
            })
            .collect()
    }

    #[test]
    fn test_leading_prefixes() {
        let points = forty_points();
        for n in [DAILY_CARDS, HOURLY_CARDS, CHART_POINTS] {
            let slice = leading(&points, n);
            assert_eq!(slice.len(), n);
            assert_eq!(slice, &points[..n]);
        }
    }

    #[test]
    fn test_leading_shorter_than_window() {
        let points = forty_points();
        assert_eq!(leading(&points[..3], CHART_POINTS).len(), 3);
        assert!(leading::<ForecastPoint>(&[], DAILY_CARDS).is_empty());
    }

    #[test]
    fn test_local_time_applies_offset() {
        // 06:30 UTC at UTC+1
        assert_eq!(local_time(1_772_346_600, 3600), "07:30");
        assert_eq!(local_time(1_772_346_600, 0), "06:30");
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        // 2026-03-01 00:00 UTC is still Feb 28 at UTC-5
        assert_eq!(local_date(1_772_323_200, 0), "3/1/2026");
        assert_eq!(local_date(1_772_323_200, -5 * 3600), "2/28/2026");
    }

    #[test]
    fn test_invalid_offset_falls_back_to_utc() {
        assert_eq!(local_time(1_772_346_600, 200_000), "06:30");
    }

    #[test]
    fn test_now_card() {
        let card = now_card(&london());
        assert_eq!(card.temperature_c, 27);
        assert_eq!(card.place, "London, GB");
        assert_eq!(card.date, "3/1/2026");
        assert_eq!(card.icon_url, "https://openweathermap.org/img/wn/10d@2x.png");
    }

    #[test]
    fn test_highlights() {
        let h = highlights(&london(), Some(2));
        assert_eq!(h.air_quality.label, "Fair");
        assert_eq!(h.aqi, Some(2));
        assert_eq!(h.sunrise.as_deref(), Some("07:30"));
        assert_eq!(h.sunset.as_deref(), Some("18:45"));
        assert_eq!(h.visibility_km, Some(10.0));
        assert_eq!(h.feels_like_c, 28);
    }

    #[test]
    fn test_highlights_without_aqi_shows_loading() {
        let h = highlights(&london(), None);
        assert_eq!(h.air_quality.label, "Loading");
        assert_eq!(h.aqi, None);
    }

    #[test]
    fn test_hourly_cards_times() {
        let cards = hourly_cards(&forty_points(), 0);
        assert_eq!(cards.len(), HOURLY_CARDS);
        let times: Vec<&str> = cards.iter().map(|c| c.time.as_str()).collect();
        assert_eq!(
            times,
            ["00:00", "03:00", "06:00", "09:00", "12:00", "15:00", "18:00", "21:00"]
        );
        assert_eq!(cards[0].temperature_c, 7);
    }

    #[test]
    fn test_daily_cards_use_max_temperature() {
        let cards = daily_cards(&forty_points(), 0);
        assert_eq!(cards.len(), DAILY_CARDS);
        assert_eq!(cards[0].temp_max_c, 8);
        assert_eq!(cards[4].temp_max_c, 12);
    }

    #[test]
    fn test_chart_series() {
        let chart = chart_series(&forty_points(), 0);
        assert_eq!(chart.label, "Temperature (°C)");
        assert_eq!(chart.points.len(), CHART_POINTS);
        assert_eq!(
            chart.points[0],
            ChartPoint {
                date: "3/1/2026".to_string(),
                temperature_c: 7
            }
        );
        // 10th point is 27h after midnight
        assert_eq!(chart.points[9].date, "3/2/2026");
        assert_eq!(chart.points[9].temperature_c, 16);
    }

    #[test]
    fn test_alerts_panel_empty() {
        let panel = alerts_panel(&[]);
        assert_eq!(panel.title, "No Severe Weather Alerts");
        assert!(panel.message.is_some());
    }

    #[test]
    fn test_alerts_panel_with_alert() {
        let alert = Alert {
            event: "Storm".to_string(),
            description: "Gale force winds".to_string(),
            sender: None,
            start: None,
            end: None,
        };
        let panel = alerts_panel(&[alert]);
        assert_eq!(panel.title, "Severe Weather Alerts");
        assert_eq!(panel.alerts[0].event, "Storm");
        assert!(panel.message.is_none());
    }

    #[test]
    fn test_bind_empty_dashboard() {
        let view = bind_dashboard(&Dashboard::default(), TILE_URL);
        assert!(view.now.is_none());
        assert!(view.highlights.is_none());
        assert!(view.daily.is_empty());
        assert!(view.hourly.is_empty());
        assert!(view.chart.points.is_empty());
        assert!(view.map.is_none());
        assert_eq!(view.health.title, "No Health Recommendations");
        assert_eq!(view.crop.text, "Plant your favorite crops!");
    }

    #[test]
    fn test_bind_full_dashboard() {
        let dashboard = Dashboard::default()
            .apply(DashboardUpdate::Current(london()))
            .apply(DashboardUpdate::Forecast(forty_points()))
            .apply(DashboardUpdate::AirQuality(1));
        let view = bind_dashboard(&dashboard, TILE_URL);

        assert_eq!(view.now.map(|n| n.temperature_c), Some(27));
        assert_eq!(view.daily.len(), 5);
        assert_eq!(view.hourly.len(), 8);
        assert_eq!(view.chart.points.len(), 10);
        // Forecast times follow the place's offset
        assert_eq!(view.hourly[0].time, "01:00");
        assert_eq!(view.highlights.map(|h| h.air_quality.label), Some("Good".to_string()));
        assert_eq!(view.health.text, recommendations("Rain").health);

        let map = view.map.expect("map");
        assert_eq!((map.center_lat, map.center_lon), (51.5, -0.1));
        assert_eq!(map.zoom, 10);
        assert_eq!(map.tile_url, TILE_URL);
        assert_eq!(map.popup, "London");
    }

    #[test]
    fn test_bind_compact() {
        let compact = bind_compact(&london());
        assert_eq!(compact.temperature_c, 27);
        assert_eq!(compact.location, "London");
        assert_eq!(compact.icon, IconAsset::Rain);
        assert_eq!(compact.icon_file, "rain.png");
        assert_eq!(compact.wind_speed, 4.1);
    }

    #[test]
    fn test_bind_outlook() {
        let daily: Vec<DailyOutlook> = (0..7)
            .map(|i| DailyOutlook {
                timestamp: 1_772_323_200 + i * 86_400,
                temp_day_k: 290.15,
                temp_max_k: 293.65,
                temp_min_k: 285.15,
                condition: condition("Clear", "01d"),
            })
            .collect();
        let outlook = Outlook {
            utc_offset_secs: 0,
            daily,
            alerts: Vec::new(),
        };
        let view = bind_outlook(Some(&outlook));
        assert_eq!(view.daily.len(), 5);
        assert_eq!(view.daily[0].temp_max_c, 20);
        assert_eq!(view.daily[4].date, "3/5/2026");
        assert_eq!(view.alerts.title, "No Severe Weather Alerts");
    }

    #[test]
    fn test_bind_outlook_missing() {
        let view = bind_outlook(None);
        assert!(view.daily.is_empty());
    }
}
