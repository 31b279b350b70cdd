//! UTC timestamps with a fixed ISO-8601 wire format.
//!
//! Timestamps are always rendered with microsecond precision and a trailing
//! `Z`, e.g. `2026-10-19T08:15:30.123456Z`. The fixed width keeps the stored
//! strings lexically ordered the same way as the instants they represent.

use core::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Timestamp`].
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct TimestampError {
    input: String,
    reason: String,
}

/// A UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// The current time, bumped past `previous` if the clock has not advanced.
    ///
    /// Guarantees the returned value is strictly greater than `previous`.
    #[must_use]
    pub fn now_after(previous: Self) -> Self {
        let now = Self::now();
        if now > previous {
            now
        } else {
            Self(previous.0 + Duration::microseconds(1))
        }
    }

    /// Parse an RFC 3339 / ISO-8601 timestamp.
    ///
    /// Accepts any offset and normalizes to UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid RFC 3339 timestamp.
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| TimestampError {
                input: s.to_owned(),
                reason: e.to_string(),
            })
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

impl std::str::FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_trailing_z_and_micros() {
        let ts = Timestamp::parse("2026-10-19T08:15:30Z").unwrap();
        assert_eq!(ts.to_string(), "2026-10-19T08:15:30.000000Z");
    }

    #[test]
    fn test_parse_accepts_offsets() {
        let ts = Timestamp::parse("2026-10-19T10:15:30.5+02:00").unwrap();
        assert_eq!(ts.to_string(), "2026-10-19T08:15:30.500000Z");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn test_now_after_is_strictly_greater() {
        let future = Timestamp::from(Utc::now() + Duration::hours(1));
        let bumped = Timestamp::now_after(future);
        assert!(bumped > future);

        let past = Timestamp::parse("2020-01-01T00:00:00Z").unwrap();
        assert!(Timestamp::now_after(past) > past);
    }

    #[test]
    fn test_string_order_matches_instant_order() {
        let earlier = Timestamp::parse("2026-10-19T08:15:30.000009Z").unwrap();
        let later = Timestamp::parse("2026-10-19T08:15:30.00001Z").unwrap();
        assert!(earlier < later);
        assert!(earlier.to_string() < later.to_string());
    }

    #[test]
    fn test_serde_uses_display_format() {
        let ts = Timestamp::parse("2026-01-02T03:04:05.678Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-01-02T03:04:05.678000Z\"");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }
}
