use std::sync::Arc;

use crate::{
    aggregate::Aggregator,
    cities::CityRegistry,
    clock::{TimeResolver, iso_timestamp},
    config::Config,
    error::ServiceError,
    model::{CityBundle, Health, TimeReading, WeatherReading},
    provider::WeatherMode,
    weather::WeatherResolver,
};

/// Everything a request handler needs, shared read-only across requests.
#[derive(Debug, Clone)]
pub struct CityService {
    registry: Arc<CityRegistry>,
    time: TimeResolver,
    weather: WeatherResolver,
    aggregator: Aggregator,
    mode: WeatherMode,
}

impl CityService {
    pub fn new(registry: CityRegistry, time: TimeResolver, weather: WeatherResolver, mode: WeatherMode) -> Self {
        let registry = Arc::new(registry);
        let aggregator = Aggregator::new(Arc::clone(&registry), time.clone(), weather.clone());

        Self { registry, time, weather, aggregator, mode }
    }

    /// Built-in cities, system clock, provider chosen by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mode = config.weather_mode();
        let weather = WeatherResolver::from_mode(&mode)?;

        Ok(Self::new(CityRegistry::builtin(), TimeResolver::system(), weather, mode))
    }

    pub fn registry(&self) -> &CityRegistry {
        &self.registry
    }

    pub fn weather_mode(&self) -> &WeatherMode {
        &self.mode
    }

    pub fn time(&self, city: &str) -> Result<TimeReading, ServiceError> {
        let config = self.registry.lookup(city)?;
        self.time.reading(config)
    }

    pub async fn weather(&self, city: &str) -> Result<WeatherReading, ServiceError> {
        let config = self.registry.lookup(city)?;
        self.weather.reading(config).await
    }

    pub async fn cities(&self) -> Result<Vec<CityBundle>, ServiceError> {
        self.aggregator.resolve_all().await
    }

    pub fn health(&self) -> Health {
        Health {
            status: "ok".to_string(),
            timestamp: iso_timestamp(self.time.now()),
        }
    }
}
