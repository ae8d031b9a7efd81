//! Core library for the `cityclock` API.
//!
//! This crate defines:
//! - The static city registry
//! - Timezone-aware time resolution
//! - Weather resolution over OpenWeather or offline mock data
//! - Concurrent aggregation across all cities
//! - Configuration and the error taxonomy shared with the HTTP layer
//!
//! It is used by `cityclock-server`, but has no HTTP server code of its own.

pub mod aggregate;
pub mod cities;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod weather;

pub use aggregate::Aggregator;
pub use cities::{CityConfig, CityRegistry};
pub use clock::{Clock, FixedClock, SystemClock, TimeResolver};
pub use config::Config;
pub use error::{RegistryError, ServiceError};
pub use model::{CityBundle, Coordinates, Health, TimeReading, WeatherReading};
pub use provider::{WeatherMode, WeatherProvider};
pub use service::CityService;
pub use weather::WeatherResolver;
