use crate::{
    model::Coordinates,
    provider::{mock::MockProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod mock;
pub mod openweather;

/// Where weather readings come from, decided once at startup.
#[derive(Clone, PartialEq, Eq)]
pub enum WeatherMode {
    /// No credential configured: fixed offline data.
    Mock,
    Live { api_key: String, base_url: String },
}

impl Debug for WeatherMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherMode::Mock => f.write_str("Mock"),
            WeatherMode::Live { base_url, .. } => f
                .debug_struct("Live")
                .field("api_key", &"<redacted>")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

impl WeatherMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherMode::Mock => "mock",
            WeatherMode::Live { .. } => "openweather",
        }
    }
}

impl std::fmt::Display for WeatherMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-normalized conditions at one location, before city labels are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub temperature: i64,
    pub feels_like: i64,
    pub description: String,
    pub humidity: i64,
    pub wind_speed: f64,
    pub icon: String,
    pub pressure: Option<i64>,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, coords: Coordinates) -> anyhow::Result<Observation>;
}

/// Construct the provider selected by `mode`.
pub fn provider_from_mode(mode: &WeatherMode) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider: Arc<dyn WeatherProvider> = match mode {
        WeatherMode::Mock => Arc::new(MockProvider),
        WeatherMode::Live { api_key, base_url } => {
            Arc::new(OpenWeatherProvider::new(api_key.clone(), base_url.clone())?)
        }
    };

    Ok(provider)
}

/// Round half up, toward positive infinity (`-2.5` becomes `-2`).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
