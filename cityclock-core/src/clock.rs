//! Timezone-aware wall clock readings.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

use crate::{cities::CityConfig, error::ServiceError, model::TimeReading};

const DATETIME_FORMAT: &str = "%B %-d, %Y at %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Source of the current instant.
///
/// Production code uses [`SystemClock`]; tests pin time with [`FixedClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Formatted local time, without the city labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTime {
    pub datetime: String,
    pub time: String,
    pub timestamp: String,
}

/// RFC 3339 UTC with milliseconds and a `Z` suffix.
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats `instant` for `timezone`; all three fields come from the same instant.
pub fn format_local(timezone: &str, instant: DateTime<Utc>) -> Result<LocalTime, ServiceError> {
    let tz: Tz = timezone.parse().map_err(|_| ServiceError::TimeFormatting {
        timezone: timezone.to_string(),
    })?;
    let local = instant.with_timezone(&tz);

    Ok(LocalTime {
        datetime: local.format(DATETIME_FORMAT).to_string(),
        time: local.format(TIME_FORMAT).to_string(),
        timestamp: iso_timestamp(instant),
    })
}

#[derive(Clone)]
pub struct TimeResolver {
    clock: Arc<dyn Clock>,
}

impl TimeResolver {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn resolve(&self, timezone: &str) -> Result<LocalTime, ServiceError> {
        format_local(timezone, self.clock.now())
    }

    pub fn reading(&self, city: &CityConfig) -> Result<TimeReading, ServiceError> {
        let local = self.resolve(&city.timezone)?;

        Ok(TimeReading {
            city: city.name.clone(),
            country: city.country.clone(),
            timezone: city.timezone.clone(),
            datetime: local.datetime,
            time: local.time,
            timestamp: local.timestamp,
        })
    }
}

impl std::fmt::Debug for TimeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeResolver").finish_non_exhaustive()
    }
}

impl Default for TimeResolver {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 5, 9).unwrap() + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn formats_berlin_summer_time() {
        let local = format_local("Europe/Berlin", instant()).unwrap();

        assert_eq!(local.datetime, "October 18, 2026 at 14:05:09");
        assert_eq!(local.time, "14:05:09");
        assert_eq!(local.timestamp, "2026-10-18T12:05:09.123Z");
    }

    #[test]
    fn formats_across_date_line() {
        let late = Utc.with_ymd_and_hms(2026, 1, 4, 20, 0, 1).unwrap();

        let kl = format_local("Asia/Kuala_Lumpur", late).unwrap();
        assert_eq!(kl.datetime, "January 5, 2026 at 04:00:01");
        assert_eq!(kl.time, "04:00:01");

        let toronto = format_local("America/Toronto", late).unwrap();
        assert_eq!(toronto.datetime, "January 4, 2026 at 15:00:01");
    }

    #[test]
    fn unknown_timezone_is_an_error_not_a_fallback() {
        let err = format_local("Mars/Olympus_Mons", instant()).unwrap_err();
        assert!(matches!(err, ServiceError::TimeFormatting { ref timezone } if timezone == "Mars/Olympus_Mons"));
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn timestamp_reformats_to_same_local_fields() {
        let local = format_local("America/Toronto", instant()).unwrap();

        let parsed = DateTime::parse_from_rfc3339(&local.timestamp)
            .unwrap()
            .with_timezone(&Utc);
        let again = format_local("America/Toronto", parsed).unwrap();

        assert_eq!(again, local);
    }

    #[test]
    fn resolver_reading_uses_city_labels() {
        let resolver = TimeResolver::new(Arc::new(FixedClock(instant())));
        let city = crate::CityRegistry::builtin().lookup("toronto").unwrap().clone();

        let reading = resolver.reading(&city).unwrap();
        assert_eq!(reading.city, "Toronto");
        assert_eq!(reading.country, "Canada");
        assert_eq!(reading.timezone, "America/Toronto");
        assert_eq!(reading.time, "08:05:09");
    }
}
