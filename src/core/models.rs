//! Core data models for Slack export records.
//!
//! Raw records ([`UserRecord`], [`RawMessage`]) mirror the JSON found in an
//! export and are deserialized with serde. [`OutputRow`] is what ends up in
//! the CSV.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlackpackError};

/// One entry of a `users.json` directory file.
///
/// Only the fields needed for name resolution are kept; the rest of the
/// Slack user object (profile, flags, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Slack user ID (e.g. `U024BE7LH`)
    pub id: String,
    /// Full name as shown in the workspace
    #[serde(default)]
    pub real_name: Option<String>,
    /// Handle
    #[serde(default)]
    pub name: Option<String>,
}

impl UserRecord {
    /// Creates a record with only an ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            real_name: None,
            name: None,
        }
    }

    /// Builder-style method to set the real name.
    #[must_use]
    pub fn with_real_name(mut self, real_name: impl Into<String>) -> Self {
        self.real_name = Some(real_name.into());
        self
    }

    /// Builder-style method to set the handle.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Resolved display name: `real_name`, then `name`, then the raw `id`.
    ///
    /// Empty strings count as absent.
    pub fn display_name(&self) -> &str {
        [self.real_name.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }
}

/// The `ts` field as it appears in the export: usually a string such as
/// `"1700000000.000200"`, occasionally a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawTimestamp::Text(s) => f.write_str(s),
            RawTimestamp::Number(n) => write!(f, "{}", n),
        }
    }
}

/// One element of a channel-day file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMessage {
    /// Author ID; absent for some bot and system messages
    #[serde(default)]
    pub user: Option<String>,
    /// Epoch seconds, possibly fractional
    #[serde(default)]
    pub ts: Option<RawTimestamp>,
    /// Message body with Slack markup
    #[serde(default)]
    pub text: Option<String>,
}

impl RawMessage {
    /// Parses the `ts` field.
    ///
    /// A missing field is reported as an [`SlackpackError::InvalidTimestamp`]
    /// with the value `<missing>`.
    pub fn timestamp(&self) -> Result<SlackTimestamp> {
        match &self.ts {
            Some(RawTimestamp::Text(s)) => s.parse(),
            Some(RawTimestamp::Number(n)) => n.to_string().parse(),
            None => Err(SlackpackError::invalid_timestamp("<missing>", None)),
        }
    }
}

/// Years a rendered timestamp may fall in; anything else has no
/// `YYYY-MM-DDTHH:MM:SS` form.
const RENDERABLE_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// A parsed message timestamp with microsecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlackTimestamp(DateTime<Utc>);

impl SlackTimestamp {
    /// Builds a timestamp from whole seconds and microseconds.
    ///
    /// Returns `None` outside years 1 through 9999 (UTC).
    pub fn from_parts(seconds: i64, micros: u32) -> Option<Self> {
        DateTime::from_timestamp(seconds, micros.checked_mul(1_000)?)
            .filter(|dt| RENDERABLE_YEARS.contains(&dt.year()))
            .map(Self)
    }

    /// Returns the UTC instant.
    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// Renders the timestamp in the local time zone as ISO 8601.
    ///
    /// The fractional part is only printed when it is non-zero, e.g.
    /// `2023-11-14T22:13:20` or `2023-11-14T22:13:20.000200`.
    ///
    /// Fails with [`SlackpackError::InvalidTimestamp`] when the local offset
    /// pushes the instant outside years 1 through 9999.
    pub fn to_local_iso8601(&self) -> Result<String> {
        let local = self.to_local_naive().ok_or_else(|| {
            let utc = self.0.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string();
            SlackpackError::invalid_timestamp(utc, None)
        })?;
        if local.nanosecond() == 0 {
            Ok(local.format("%Y-%m-%dT%H:%M:%S").to_string())
        } else {
            Ok(local.format("%Y-%m-%dT%H:%M:%S%.6f").to_string())
        }
    }

    fn to_local_naive(&self) -> Option<NaiveDateTime> {
        let utc = self.0.naive_utc();
        let offset = *Local.from_utc_datetime(&utc).offset();
        utc.checked_add_offset(offset)
            .filter(|local| RENDERABLE_YEARS.contains(&local.year()))
    }
}

impl FromStr for SlackTimestamp {
    type Err = SlackpackError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        parse_decimal(trimmed)
            .or_else(|| parse_float(trimmed))
            .ok_or_else(|| SlackpackError::invalid_timestamp(s, None))
    }
}

/// Exact parse of the usual `SECONDS[.FRACTION]` shape, rounded to microseconds.
fn parse_decimal(s: &str) -> Option<SlackTimestamp> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut seconds: i64 = whole.parse().ok()?;
    let mut micros: u32 = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(6)
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'));
    if fraction.as_bytes().get(6).is_some_and(|&b| b >= b'5') {
        micros += 1;
    }
    if micros == 1_000_000 {
        seconds = seconds.checked_add(1)?;
        micros = 0;
    }
    SlackTimestamp::from_parts(seconds, micros)
}

/// Fallback for anything else `f64` understands (exponents, signs).
fn parse_float(s: &str) -> Option<SlackTimestamp> {
    let value: f64 = s.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let total_micros = (value * 1_000_000.0).round();
    if total_micros.abs() >= i64::MAX as f64 {
        return None;
    }
    let total_micros = total_micros as i64;
    SlackTimestamp::from_parts(
        total_micros.div_euclid(1_000_000),
        total_micros.rem_euclid(1_000_000) as u32,
    )
}

/// A discovered `YYYY-MM-DD.json` file and the channel it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelDayFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Name of the parent directory
    pub channel: String,
}

/// One flattened CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    /// Local ISO-8601 timestamp
    pub timestamp: String,
    /// Resolved author name
    pub user: String,
    /// Channel name
    pub channel: String,
    /// Message text with mentions translated
    pub message: String,
}

impl OutputRow {
    /// Returns the row as CSV fields in column order.
    pub fn fields(&self) -> [&str; 4] {
        [&self.timestamp, &self.user, &self.channel, &self.message]
    }
}
