//! Lenient timestamp parsing for the formats DataSift and Twitter emit.

use std::str::FromStr;

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::fmt::rfc2822;
use jiff::tz::TimeZone;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// `Wed Aug 27 13:08:45 +0000 2008`
const TWITTER_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Zone-less layouts, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized timestamp {raw:?}")]
pub struct DateParseError {
    pub raw: String,
}

/// Parse a provider timestamp into a UTC instant.
///
/// Tries, in order: RFC 3339, RFC 2822, Twitter's `created_at` layout,
/// zone-less date times (assumed UTC) and integer epoch milliseconds.
pub fn parse_to_utc(raw: &str) -> Result<Timestamp, DateParseError> {
    let input = raw.trim();
    Timestamp::from_str(input)
        .ok()
        .or_else(|| rfc2822::parse(input).ok().map(|zoned| zoned.timestamp()))
        .or_else(|| Timestamp::strptime(TWITTER_FORMAT, input).ok())
        .or_else(|| parse_naive(input))
        .or_else(|| parse_epoch_millis(input))
        .ok_or_else(|| DateParseError {
            raw: raw.to_string(),
        })
}

fn parse_naive(input: &str) -> Option<Timestamp> {
    NAIVE_FORMATS.iter().find_map(|format| {
        let datetime = DateTime::strptime(format, input).ok()?;
        let zoned = datetime.to_zoned(TimeZone::UTC).ok()?;
        Some(zoned.timestamp())
    })
}

fn parse_epoch_millis(input: &str) -> Option<Timestamp> {
    let millis = input.parse::<i64>().ok()?;
    Timestamp::from_millisecond(millis).ok()
}

/// Deserialize an optional timestamp without rejecting the enclosing record.
///
/// Strings go through [`parse_to_utc`], integers are epoch milliseconds.
/// Anything unparseable is logged and becomes `None`.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    };
    match parse_to_utc(&raw) {
        Ok(timestamp) => Ok(Some(timestamp)),
        Err(error) => {
            warn!(target: "date", %error, "dropping unparseable timestamp");
            Ok(None)
        }
    }
}
