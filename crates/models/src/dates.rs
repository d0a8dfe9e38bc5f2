//! Wire date handling.
//!
//! The backend uses two date shapes:
//! - date-only fields serialised as `YYYY-MM-DD`
//! - date-time fields serialised as RFC 3339
//!
//! Parsing is as lenient as the backend: date-only fields also accept
//! timestamps (truncated to the date), and date-time fields also accept the HTML
//! `datetime-local` shape (`YYYY-MM-DDTHH:MM`) and bare dates. Timestamps without an offset are
//! read as UTC.

use crate::{ModelError, ModelResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

const DISPLAY_DATE_FORMAT: &str = "%-d %b %Y";
const DISPLAY_DATE_TIME_FORMAT: &str = "%-d %b %Y, %H:%M";
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Today's date in UTC, used where a record defaults its date to "today".
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a date-only wire value.
///
/// # Errors
///
/// Returns [`ModelError::InvalidDate`] if `input` is neither a date nor a timestamp.
pub fn parse_date(input: &str) -> ModelResult<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, WIRE_DATE_FORMAT) {
        return Ok(date);
    }
    parse_date_time(input)
        .map(|dt| dt.date_naive())
        .map_err(|_| ModelError::InvalidDate(format!("expected YYYY-MM-DD, got '{input}'")))
}

/// Parse a date-time wire value.
///
/// # Errors
///
/// Returns [`ModelError::InvalidDate`] if `input` matches none of the accepted shapes.
pub fn parse_date_time(input: &str) -> ModelResult<DateTime<FixedOffset>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, WIRE_DATE_FORMAT) {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset());
    }
    Err(ModelError::InvalidDate(format!(
        "expected an RFC 3339 timestamp, got '{input}'"
    )))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Display form of a timestamp, in the offset it was recorded with.
pub fn format_date_time(dt: &DateTime<FixedOffset>) -> String {
    dt.format(DISPLAY_DATE_TIME_FORMAT).to_string()
}

pub fn to_wire_date(date: &NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

pub fn to_wire_date_time(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn blank_to_none(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

/// Serde adapter for a required date that falls back to today when absent, null or blank.
pub mod date_or_today {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_wire_date(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        match blank_to_none(Option::<String>::deserialize(deserializer)?) {
            Some(raw) => parse_date(&raw).map_err(de::Error::custom),
            None => Ok(today()),
        }
    }
}

/// Serde adapter for an optional date-only field. `None` serialises as `null`.
pub mod optional_date {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&to_wire_date(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        blank_to_none(Option::<String>::deserialize(deserializer)?)
            .map(|raw| parse_date(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

/// Serde adapter for an optional date-time field. `None` serialises as `null`.
pub mod optional_date_time {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        dt: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => serializer.serialize_str(&to_wire_date_time(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        blank_to_none(Option::<String>::deserialize(deserializer)?)
            .map(|raw| parse_date_time(&raw).map_err(de::Error::custom))
            .transpose()
    }
}
