//! Custom serde helpers for backend wire formats.
//!
//! The backend is loose about scalar types: page counters and intervals may
//! arrive as numbers or numeric strings, prices as floats, timestamps as
//! formatted strings or epoch milliseconds.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// A JSON value of unknown shape; arrays and objects land in `Other`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Other(IgnoredAny),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Other(_) => String::new(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            Scalar::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            Scalar::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Scalar::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Deserializes a number, numeric string or `null` into its string form.
///
/// `null` becomes the empty string.
pub fn number_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

/// Deserializes an optional integer that may be sent as a string.
///
/// Anything that is not an integer is treated as absent.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(|s| s.as_i64()))
}

/// Like [`lenient_i64`], restricted to non-negative values that fit in `u32`.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_i64(deserializer)?.and_then(|v| u32::try_from(v).ok()))
}

/// Deserializes an optional float that may be sent as a numeric string.
///
/// Anything that is not a number is treated as absent.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(|s| s.as_f64()))
}

/// Deserializes an optional string, accepting bare numbers; blank is absent.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .filter(|s| !s.trim().is_empty()))
}

/// Timestamps: RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or epoch milliseconds.
pub mod timestamp {
    use super::Scalar;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    /// Parse a backend time string.
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        // Go's default time formatting: "2019-03-01 10:00:00 +0000 UTC"
        if let Ok(dt) = DateTime::parse_from_str(
            s.trim_end_matches(" UTC"),
            "%Y-%m-%d %H:%M:%S %z",
        ) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Scalar::deserialize(deserializer)? {
            Scalar::Int(millis) => DateTime::<Utc>::from_timestamp_millis(millis)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis))),
            Scalar::Text(s) => parse(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", s))),
            _ => Err(serde::de::Error::custom("Invalid timestamp type")),
        }
    }

    /// Like [`deserialize`], but an unparsable or missing time is `None`.
    ///
    /// Use with `#[serde(default, deserialize_with = "timestamp::lenient")]`.
    pub fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Scalar>::deserialize(deserializer)? {
            Some(Scalar::Int(millis)) => DateTime::<Utc>::from_timestamp_millis(millis),
            Some(Scalar::Text(s)) => parse(&s),
            _ => None,
        })
    }
}
