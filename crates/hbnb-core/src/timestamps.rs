//! Timestamp assignment, formatting and parsing.
//!
//! Timestamps are UTC and carry microsecond precision, which is exactly what
//! the serialized form keeps. `now()` truncates to microseconds so an entity
//! survives a serialize/reconstruct cycle unchanged.
//!
//! Accepted input formats:
//! - `2017-09-28T21:05:54.119427` (serialized form, naive UTC, fraction optional)
//! - RFC 3339 (`2017-09-28T21:05:54.119427+00:00`)
//! - `SQLite`'s `datetime('now')` (`2017-09-28 21:05:54`)

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use crate::errors::CoreError;

/// Serialized timestamp format.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current time, truncated to the precision kept by the serialized form.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Render a timestamp in the serialized form.
#[must_use]
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.format(TIME_FORMAT).to_string()
}

/// Parse a timestamp from any accepted textual form.
///
/// # Errors
///
/// Returns `CoreError::InvalidTimestamp` if no accepted format matches.
pub fn parse(s: &str) -> Result<DateTime<Utc>, CoreError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| CoreError::InvalidTimestamp {
            value: s.to_string(),
            reason: e.to_string(),
        })
}

/// Serde adapter for `DateTime<Utc>` fields in representations.
pub mod serde_format {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn format_keeps_microseconds() {
        let ts = parse("2017-09-28T21:05:54.119427").unwrap();
        assert_eq!(format(&ts), "2017-09-28T21:05:54.119427");
    }

    #[test]
    fn parses_without_fraction() {
        let ts = parse("2017-09-28T21:05:54").unwrap();
        assert_eq!(ts.second(), 54);
        assert_eq!(format(&ts), "2017-09-28T21:05:54.000000");
    }

    #[test]
    fn parses_rfc3339() {
        let ts = parse("2026-02-09T14:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 12);
    }

    #[test]
    fn parses_sqlite_default() {
        let ts = parse("2026-02-09 14:30:00").unwrap();
        assert_eq!(ts.day(), 9);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse("yesterday"),
            Err(CoreError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn now_roundtrips_through_format() {
        let ts = now();
        assert_eq!(parse(&format(&ts)).unwrap(), ts);
    }
}
