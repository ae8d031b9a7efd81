use thiserror::Error;

/// Failures surfaced by the city service to its callers.
///
/// Every variant maps onto one HTTP status and one client-facing message;
/// the underlying cause stays in the error chain for logging only.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unknown city '{city}'")]
    NotFound { city: String },

    #[error("cannot format time for timezone '{timezone}'")]
    TimeFormatting { timezone: String },

    #[error("weather provider request failed")]
    WeatherProvider(#[source] anyhow::Error),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("failed to resolve city '{city}'")]
    Aggregation {
        city: String,
        #[source]
        source: Box<ServiceError>,
    },
}

impl ServiceError {
    /// HTTP status code this error is reported with.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::NotFound { .. } => 404,
            ServiceError::TimeFormatting { .. }
            | ServiceError::WeatherProvider(_)
            | ServiceError::Internal(_)
            | ServiceError::Aggregation { .. } => 500,
        }
    }

    /// Message returned to clients in the `error` field.
    pub fn public_message(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "City not found",
            ServiceError::TimeFormatting { .. } => "Failed to get time",
            ServiceError::WeatherProvider(_) => "Failed to fetch weather data",
            ServiceError::Internal(_) => "Internal server error",
            ServiceError::Aggregation { .. } => "Failed to fetch cities data",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }

    pub(crate) fn aggregation(city: &str, source: ServiceError) -> Self {
        ServiceError::Aggregation {
            city: city.to_string(),
            source: Box::new(source),
        }
    }
}

/// Problems with a city table handed to [`crate::CityRegistry::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("city key must not be empty")]
    EmptyKey,

    #[error("city key '{0}' must be lowercase")]
    NotLowercase(String),

    #[error("duplicate city key '{0}'")]
    Duplicate(String),
}
