//! Millisecond-precision UTC timestamps shared by posts and comments.
//!
//! Timestamps serialise as `YYYY-MM-DDTHH:MM:SS.mmmZ`. Sub-millisecond
//! precision is dropped on construction so a value read back from storage
//! compares equal to the one written.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Truncate a timestamp to whole milliseconds.
pub fn to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

/// Render a timestamp in the wire format.
///
/// # Examples
/// ```
/// use board::domain::timestamp::format_created;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 5).single().expect("valid");
/// assert_eq!(format_created(&ts), "2024-03-01T12:00:05.000Z");
/// ```
pub fn format_created(ts: &DateTime<Utc>) -> String {
    ts.format(CREATED_FORMAT).to_string()
}

/// Parse the wire format back into a UTC timestamp.
pub fn parse_created(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, CREATED_FORMAT).map(|naive| naive.and_utc())
}

/// `serde(with = ...)` adapter for creation timestamps.
pub mod created {
    use super::{DateTime, Deserialize, Deserializer, Serializer, Utc, format_created, parse_created};

    /// Serialise a creation timestamp.
    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_created(ts))
    }

    /// Deserialise a creation timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_created(&raw).map_err(serde::de::Error::custom)
    }
}
