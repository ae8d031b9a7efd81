use std::collections::HashMap;

use crate::{
    error::{RegistryError, ServiceError},
    model::Coordinates,
};

/// Static description of one supported city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityConfig {
    pub key: String,
    pub name: String,
    pub country: String,
    /// IANA timezone identifier, e.g. `Europe/Berlin`.
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityConfig {
    pub fn new(
        key: &str,
        name: &str,
        country: &str,
        timezone: &str,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            timezone: timezone.to_string(),
            latitude,
            longitude,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates { lat: self.latitude, lon: self.longitude }
    }
}

/// Read-only table of cities, keyed by lowercase identifier.
///
/// Iteration follows insertion order, which is also the order of the
/// `/api/cities` response.
#[derive(Debug, Clone)]
pub struct CityRegistry {
    cities: Vec<CityConfig>,
    index: HashMap<String, usize>,
}

impl CityRegistry {
    pub fn new(cities: Vec<CityConfig>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(cities.len());

        for (pos, city) in cities.iter().enumerate() {
            if city.key.is_empty() {
                return Err(RegistryError::EmptyKey);
            }
            if city.key != city.key.to_lowercase() {
                return Err(RegistryError::NotLowercase(city.key.clone()));
            }
            if index.insert(city.key.clone(), pos).is_some() {
                return Err(RegistryError::Duplicate(city.key.clone()));
            }
        }

        Ok(Self { cities, index })
    }

    /// The three cities served by the public API.
    pub fn builtin() -> Self {
        let cities = vec![
            CityConfig::new("berlin", "Berlin", "Germany", "Europe/Berlin", 52.52, 13.405),
            CityConfig::new("toronto", "Toronto", "Canada", "America/Toronto", 43.6532, -79.3832),
            CityConfig::new(
                "kualalumpur",
                "Kuala Lumpur",
                "Malaysia",
                "Asia/Kuala_Lumpur",
                3.139,
                101.6869,
            ),
        ];

        let index = cities
            .iter()
            .enumerate()
            .map(|(pos, city)| (city.key.clone(), pos))
            .collect();

        Self { cities, index }
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, key: &str) -> Result<&CityConfig, ServiceError> {
        let normalized = key.to_lowercase();
        self.index
            .get(&normalized)
            .map(|&pos| &self.cities[pos])
            .ok_or(ServiceError::NotFound { city: normalized })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CityConfig> {
        self.cities.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(|c| c.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
