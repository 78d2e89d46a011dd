//! Canned OpenWeatherMap payloads shared by the client and pipeline tests.

use serde_json::{json, Value};

pub const LONDON_LAT: f64 = 51.5;
pub const LONDON_LON: f64 = -0.1;

/// `/weather` for London at 300.15 K under light rain.
pub fn current_london() -> Value {
    json!({
        "coord": { "lon": LONDON_LON, "lat": LONDON_LAT },
        "weather": [
            { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
        ],
        "base": "stations",
        "main": {
            "temp": 300.15,
            "feels_like": 301.2,
            "temp_min": 298.0,
            "temp_max": 302.0,
            "pressure": 1012,
            "humidity": 64
        },
        "visibility": 10000,
        "wind": { "speed": 4.1, "deg": 240 },
        "clouds": { "all": 75 },
        "dt": 1_760_000_000,
        "sys": { "country": "GB", "sunrise": 1_759_990_000, "sunset": 1_760_030_000 },
        "timezone": 3600,
        "id": 2643743,
        "name": "London",
        "cod": 200
    })
}

/// `/forecast` with `n` three-hourly points, temperatures rising 1 K per point.
pub fn forecast_points(n: usize) -> Value {
    let list: Vec<Value> = (0..n)
        .map(|i| {
            let temp = 280.15 + i as f64;
            json!({
                "dt": 1_760_000_400 + (i as i64) * 10_800,
                "main": {
                    "temp": temp,
                    "feels_like": temp,
                    "temp_min": temp - 1.0,
                    "temp_max": temp + 1.0,
                    "pressure": 1010,
                    "humidity": 70
                },
                "weather": [
                    { "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }
                ],
                "dt_txt": "2025-10-09 09:00:00"
            })
        })
        .collect();

    json!({
        "cod": "200",
        "cnt": n,
        "list": list,
        "city": { "name": "London", "country": "GB", "timezone": 3600 }
    })
}

/// `/air_pollution` reporting the given index.
pub fn air_pollution(aqi: i64) -> Value {
    json!({
        "coord": { "lon": LONDON_LON, "lat": LONDON_LAT },
        "list": [
            {
                "main": { "aqi": aqi },
                "components": { "co": 201.94, "no2": 0.77, "pm2_5": 0.5 },
                "dt": 1_760_000_000
            }
        ]
    })
}

/// `/onecall` with seven daily entries and one alert.
pub fn onecall_with_alert() -> Value {
    let daily: Vec<Value> = (0..7)
        .map(|i| {
            json!({
                "dt": 1_760_000_000 + (i as i64) * 86_400,
                "temp": { "day": 290.15, "min": 285.15, "max": 293.65, "night": 286.0 },
                "weather": [
                    { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
                ]
            })
        })
        .collect();

    json!({
        "lat": LONDON_LAT,
        "lon": LONDON_LON,
        "timezone": "Europe/London",
        "timezone_offset": 3600,
        "daily": daily,
        "alerts": [
            {
                "sender_name": "Met Office",
                "event": "Yellow wind warning",
                "start": 1_760_010_000,
                "end": 1_760_050_000,
                "description": "Strong winds may cause travel disruption."
            }
        ]
    })
}
