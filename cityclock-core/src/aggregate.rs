//! Fan-out over every registered city.
//!
//! Each city runs its time and weather lookups side by side, and all cities
//! run concurrently on the runtime. The first failure wins: remaining tasks
//! are aborted and the whole aggregate reports [`ServiceError::Aggregation`].

use std::{collections::HashMap, sync::Arc};

use tokio::task::JoinSet;

use crate::{
    cities::{CityConfig, CityRegistry},
    clock::TimeResolver,
    error::ServiceError,
    model::CityBundle,
    weather::WeatherResolver,
};

#[derive(Debug, Clone)]
pub struct Aggregator {
    registry: Arc<CityRegistry>,
    time: TimeResolver,
    weather: WeatherResolver,
}

impl Aggregator {
    pub fn new(registry: Arc<CityRegistry>, time: TimeResolver, weather: WeatherResolver) -> Self {
        Self { registry, time, weather }
    }

    /// One bundle per registered city, in registry order, or the first failure.
    pub async fn resolve_all(&self) -> Result<Vec<CityBundle>, ServiceError> {
        let mut tasks = JoinSet::new();
        let mut keys = HashMap::with_capacity(self.registry.len());

        for (pos, city) in self.registry.iter().enumerate() {
            let task_key = city.key.clone();
            let city = city.clone();
            let time = self.time.clone();
            let weather = self.weather.clone();

            let handle = tasks.spawn(async move {
                let key = city.key.clone();
                resolve_city(city, time, weather)
                    .await
                    .map(|bundle| (pos, bundle))
                    .map_err(|err| ServiceError::aggregation(&key, err))
            });
            keys.insert(handle.id(), task_key);
        }

        let mut slots: Vec<Option<CityBundle>> = vec![None; self.registry.len()];

        // Dropping `tasks` on early return aborts whatever is still running.
        while let Some(joined) = tasks.join_next().await {
            let (pos, bundle) = match joined {
                Ok(result) => result?,
                Err(join_err) => {
                    let city = keys.remove(&join_err.id()).unwrap_or_default();
                    let cause = ServiceError::Internal(format!("city task did not complete: {join_err}"));
                    return Err(ServiceError::aggregation(&city, cause));
                }
            };
            slots[pos] = Some(bundle);
        }

        Ok(slots.into_iter().flatten().collect())
    }
}

async fn resolve_city(
    city: CityConfig,
    time: TimeResolver,
    weather: WeatherResolver,
) -> Result<CityBundle, ServiceError> {
    let (time, weather) = tokio::try_join!(
        async { time.reading(&city) },
        weather.reading(&city)
    )?;

    Ok(CityBundle { city: city.key, time, weather })
}
