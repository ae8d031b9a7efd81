use std::sync::Arc;

use crate::{
    cities::CityConfig,
    error::ServiceError,
    model::{Coordinates, WeatherReading},
    provider::{Observation, WeatherMode, WeatherProvider, provider_from_mode},
};

/// Resolves current weather through whichever provider was chosen at startup.
///
/// A configured provider that fails is reported as an error; it never
/// degrades to mock data.
#[derive(Debug, Clone)]
pub struct WeatherResolver {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherResolver {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub fn from_mode(mode: &WeatherMode) -> anyhow::Result<Self> {
        Ok(Self::new(provider_from_mode(mode)?))
    }

    pub async fn resolve(&self, coords: Coordinates) -> Result<Observation, ServiceError> {
        self.provider.current(coords).await.map_err(|err| {
            tracing::error!(lat = coords.lat, lon = coords.lon, "Weather API error: {err:#}");
            ServiceError::WeatherProvider(err)
        })
    }

    pub async fn reading(&self, city: &CityConfig) -> Result<WeatherReading, ServiceError> {
        let obs = self.resolve(city.coordinates()).await?;

        Ok(WeatherReading {
            city: city.name.clone(),
            country: city.country.clone(),
            temperature: obs.temperature,
            description: obs.description,
            humidity: obs.humidity,
            wind_speed: obs.wind_speed,
            icon: obs.icon,
            feels_like: obs.feels_like,
            pressure: obs.pressure,
        })
    }
}
