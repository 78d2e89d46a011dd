//! Lookup tables turning provider codes into display values.
//!
//! Every function here is total and pure: unknown inputs land on a
//! documented default.

use serde::Serialize;
use utoipa::ToSchema;

const KELVIN_OFFSET: f64 = 273.15;

/// Neutral badge colour for unknown or pending AQI values.
pub const NEUTRAL_COLOR: &str = "gray";

/// Local weather icon assets bundled with the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IconAsset {
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

impl IconAsset {
    /// Asset file name under the front end's image directory.
    pub fn file_name(self) -> &'static str {
        match self {
            IconAsset::Clear => "clear.png",
            IconAsset::Cloud => "cloud.png",
            IconAsset::Drizzle => "drizzle.png",
            IconAsset::Rain => "rain.png",
            IconAsset::Snow => "snow.png",
        }
    }
}

/// Map a provider icon code (e.g. "10n") to a local asset.
///
/// Broken clouds (`04`) map to drizzle. Codes outside the
/// table (thunderstorm `11`, mist `50`, garbage) fall back to clear.
pub fn icon_asset(code: &str) -> IconAsset {
    match code {
        "01d" | "01n" => IconAsset::Clear,
        "02d" | "02n" | "03d" | "03n" => IconAsset::Cloud,
        "04d" | "04n" => IconAsset::Drizzle,
        "09d" | "09n" | "10d" | "10n" => IconAsset::Rain,
        "13d" | "13n" => IconAsset::Snow,
        _ => IconAsset::Clear,
    }
}

/// Provider-hosted icon image for a code.
pub fn provider_icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", code)
}

/// Air-quality badge shown in the highlights card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AqiBadge {
    /// "Good", "Fair", "Moderate", "Poor", "Very Poor", "Unknown" or "Loading"
    pub label: String,
    /// CSS colour for the badge background
    pub color: String,
}

impl AqiBadge {
    fn new(label: &str, color: &str) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

/// Map an AQI reading to its badge. `None` means no reading has arrived yet.
pub fn aqi_badge(aqi: Option<i64>) -> AqiBadge {
    match aqi {
        None => AqiBadge::new("Loading", NEUTRAL_COLOR),
        Some(1) => AqiBadge::new("Good", "#74b72e"),
        Some(2) => AqiBadge::new("Fair", "#f9e076"),
        Some(3) => AqiBadge::new("Moderate", "#f9e076"),
        Some(4) => AqiBadge::new("Poor", "#bc544b"),
        Some(5) => AqiBadge::new("Very Poor", "#bc544b"),
        Some(_) => AqiBadge::new("Unknown", NEUTRAL_COLOR),
    }
}

/// Health and crop advice for a weather category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Recommendations {
    pub health: String,
    pub crop: String,
}

/// Advice for the provider's top-level category (`weather[0].main`).
pub fn recommendations(category: &str) -> Recommendations {
    let (health, crop) = match category {
        "Rain" => (
            "Carry an umbrella, wear waterproof shoes, and stay dry to avoid colds.",
            "Perfect for rice and other water-intensive crops. Avoid harvesting now.",
        ),
        "Clear" => (
            "Use sunscreen, stay hydrated, and wear sunglasses to protect your eyes.",
            "Great for fruits and vegetables. Ensure irrigation if it’s hot.",
        ),
        "Snow" => (
            "Wear warm clothes, stay indoors if possible, and avoid icy roads.",
            "Grow frost-tolerant crops like winter wheat. Avoid sowing sensitive crops.",
        ),
        "Clouds" => (
            "Cool weather; wear light layers. No need for sunscreen, but keep warm.",
            "Good for leafy greens like spinach and lettuce. Limited sun may delay flowering.",
        ),
        "Thunderstorm" => (
            "Stay indoors to avoid lightning strikes. Unplug electrical devices.",
            "Pause fieldwork to avoid danger. Check for crop damage after storms.",
        ),
        "Drizzle" => (
            "Light rain—carry a raincoat or umbrella to stay comfortable.",
            "Good for young seedlings. Be cautious about fungal infections.",
        ),
        _ => (
            "Stay prepared for sudden weather changes. Monitor the forecast.",
            "Check soil moisture regularly to ensure optimal growth conditions.",
        ),
    };

    Recommendations {
        health: health.to_string(),
        crop: crop.to_string(),
    }
}

/// Kelvin to Celsius, trimmed to the provider's two decimals.
///
/// Subtracting 273.15 in f64 leaves noise in the last bits (300.15 K comes
/// out a hair off 27), which would make `floor` flip a whole degree.
fn kelvin_to_celsius(kelvin: f64) -> f64 {
    ((kelvin - KELVIN_OFFSET) * 100.0).round() / 100.0
}

/// Whole degrees Celsius, rounded to nearest. Used by the compact widget.
pub fn celsius_rounded(kelvin: f64) -> i32 {
    kelvin_to_celsius(kelvin).round() as i32
}

/// Whole degrees Celsius, rounded down. Used by the dashboard cards.
pub fn celsius_floor(kelvin: f64) -> i32 {
    kelvin_to_celsius(kelvin).floor() as i32
}
