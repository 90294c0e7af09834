//! Vendor timestamp decoding.
//!
//! Responses carry RFC 3339 timestamps, but notifications may shorten the
//! offset to hours only (`2021-01-18T15:25:18+03`).

use chrono::{DateTime, Utc};
use serde::de::{Error, IgnoredAny};
use serde::{Deserialize, Deserializer};

const SHORT_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.f%#z";

/// Parse a vendor timestamp into UTC
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, SHORT_OFFSET))
        .map(|at| at.with_timezone(&Utc))
}

/// `deserialize_with` helper for optional timestamps; empty strings are `None`
pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse(raw)
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid timestamp {}: {}", raw, e))),
    }
}

/// Like [`deserialize_opt`], but an unparseable value is `None`
pub(crate) fn deserialize_opt_lenient<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(raw)) => parse(raw.trim()).ok(),
        Some(Raw::Other(_)) | None => None,
    })
}
