use async_trait::async_trait;

use crate::model::Coordinates;

use super::{Observation, WeatherProvider};

/// Offline stand-in used when no OpenWeather credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn observation() -> Observation {
        Observation {
            temperature: 22,
            feels_like: 24,
            description: "Partly cloudy".to_string(),
            humidity: 65,
            wind_speed: 5.5,
            icon: "02d".to_string(),
            pressure: None,
        }
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    async fn current(&self, coords: Coordinates) -> anyhow::Result<Observation> {
        tracing::warn!(
            lat = coords.lat,
            lon = coords.lon,
            "OpenWeather API key is not set, returning mock weather data"
        );
        Ok(Self::observation())
    }
}
