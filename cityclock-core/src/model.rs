use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Local time in one city, as returned by `/api/time/{city}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeReading {
    pub city: String,
    pub country: String,
    pub timezone: String,
    pub datetime: String,
    pub time: String,
    pub timestamp: String,
}

/// Current weather in one city, as returned by `/api/weather/{city}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub city: String,
    pub country: String,
    pub temperature: i64,
    pub description: String,
    pub humidity: i64,
    pub wind_speed: f64,
    pub icon: String,
    pub feels_like: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<i64>,
}

/// One entry of `/api/cities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityBundle {
    /// Registry key, not the display name.
    pub city: String,
    pub time: TimeReading,
    pub weather: WeatherReading,
}

/// Liveness payload of `/api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}
