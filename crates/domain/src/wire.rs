//! Lenient decoders for backend JSON quirks.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Integer(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
        }
    }
}

/// Decodes an id that may arrive as a JSON string or number.
///
/// # Errors
///
/// Fails when the value is neither a string nor a number.
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

/// Optional variant of [`id`]; `null` and missing both map to `None`.
///
/// # Errors
///
/// Fails when a present value is neither a string nor a number.
pub fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
}

/// Decodes a list of ids that may mix strings and numbers.
///
/// # Errors
///
/// Fails when an element is neither a string nor a number.
pub fn id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<StringOrNumber>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(StringOrNumber::into_string)
        .collect())
}

/// Decodes a backend timestamp.
///
/// Accepts the local `2024-05-01T10:00:00[.fff]` form and RFC 3339.
/// Unparseable values decode as `None` instead of failing the record.
///
/// # Errors
///
/// Fails only when the value is not a string or null.
pub fn timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Parses a backend timestamp string.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.naive_utc()))
}
