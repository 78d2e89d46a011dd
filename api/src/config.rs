const DEFAULT_OWM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CITY: &str = "Salem";
const DEFAULT_MAP_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_USER_AGENT: &str = "WeatherDashboard/0.1";

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenWeatherMap API key. Without it every fetch is skipped.
    pub owm_api_key: Option<String>,
    pub owm_base_url: String,
    pub user_agent: String,
    pub port: u16,
    /// City shown by the compact widget when none is given.
    pub default_city: String,
    /// Tile URL template handed to the map widget.
    pub map_tile_url: String,
    /// Also fetch one-call alerts as part of the dashboard chain.
    pub alerts_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values fall back
    /// to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("PORT '{}' is not a valid u16, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let alerts_enabled = match lookup("OWM_ALERTS_ENABLED") {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!("OWM_ALERTS_ENABLED '{}' is not a boolean, using false", raw);
                false
            }),
            None => false,
        };

        Self {
            owm_api_key: lookup("OWM_API_KEY").filter(|k| !k.trim().is_empty()),
            owm_base_url: lookup("OWM_BASE_URL").unwrap_or_else(|| DEFAULT_OWM_BASE_URL.to_string()),
            user_agent: lookup("OWM_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            port,
            default_city: lookup("DEFAULT_CITY").unwrap_or_else(|| DEFAULT_CITY.to_string()),
            map_tile_url: lookup("MAP_TILE_URL")
                .unwrap_or_else(|| DEFAULT_MAP_TILE_URL.to_string()),
            alerts_enabled,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
