//! Timestamp parsing that tolerates both offset and naive ISO 8601 values.
//!
//! The backend stores some dates exactly as admins entered them, so a value
//! may arrive as `2024-03-01T10:00:00+00:00`, `2024-03-01T10:00:00Z`,
//! `2024-03-01T10:00:00.123456` or `2024-03-01`. Naive values are UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub(crate) fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp '{}'", raw))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => parse(&raw).map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_all_backend_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(parse("2024-03-01T10:00:00Z").unwrap(), expected);
        assert_eq!(parse("2024-03-01T10:00:00+00:00").unwrap(), expected);
        assert_eq!(parse("2024-03-01T16:00:00+06:00").unwrap(), expected);
        assert_eq!(parse("2024-03-01T10:00:00").unwrap(), expected);
        assert_eq!(
            parse("2024-03-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
        assert!(parse("2024-03-01T10:00:00.250000").is_ok());
        assert!(parse("yesterday").is_err());
    }
}
