// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timestamp values.
//!
//! A [`Timestamp`] is parsed by trying a fixed list of layouts in order and
//! taking the first that matches. Layouts without a zone are read as UTC.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::domain::errors::{ConfigError, Result};

const TARGET_TYPE: &str = "timestamp";

type Layout = fn(&str) -> Option<OffsetDateTime>;

/// Accepted layouts, most specific last. The first match wins.
const LAYOUTS: [Layout; 6] = [
    date_only,
    date_hour_minute,
    date_time,
    rfc3339,
    rfc2822,
    rfc1123_gmt,
];

fn date_only(raw: &str) -> Option<OffsetDateTime> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

fn date_hour_minute(raw: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

fn date_time(raw: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .ok()
    .map(PrimitiveDateTime::assume_utc)
}

fn rfc3339(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339).ok()
}

fn rfc2822(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc2822).ok()
}

fn rfc1123_gmt(raw: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(
        raw,
        format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        ),
    )
    .ok()
    .map(PrimitiveDateTime::assume_utc)
}

/// A point in time decoded from a configuration value.
///
/// Accepted layouts, tried in this order:
///
/// | Layout | Example |
/// |--------|---------|
/// | date | `2015-05-08` |
/// | date, hour and minute | `2015-05-08 11:07` |
/// | date and time | `2015-05-08 11:07:30` |
/// | RFC 3339 | `2015-05-08T11:07:30+02:00` |
/// | RFC 2822 | `Fri, 08 May 2015 11:07:30 +0200` |
/// | RFC 1123 (GMT) | `Fri, 08 May 2015 11:07:30 GMT` |
///
/// The default timestamp is the Unix epoch.
///
/// # Examples
///
/// ```
/// use hexini::Timestamp;
///
/// let ts = Timestamp::parse("2015-05-08 11:07:30").unwrap();
/// assert_eq!(ts.as_offset_date_time().hour(), 11);
/// assert!(Timestamp::parse("yesterday").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Parses a timestamp using the first matching layout.
    pub fn parse(raw: &str) -> Result<Self> {
        LAYOUTS
            .iter()
            .find_map(|layout| layout(raw))
            .map(Timestamp)
            .ok_or_else(|| ConfigError::conversion(raw, TARGET_TYPE))
    }

    /// Returns the underlying date-time.
    pub fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    /// Converts into the underlying date-time.
    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp(OffsetDateTime::UNIX_EPOCH)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Timestamp(value)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl FromStr for Timestamp {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Timestamp::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(TARGET_TYPE)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Timestamp, E> {
        Timestamp::parse(value).map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }

    // A missing value decodes to the default timestamp.
    fn visit_unit<E: de::Error>(self) -> std::result::Result<Timestamp, E> {
        Ok(Timestamp::default())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_date_only_is_utc_midnight() {
        let ts = Timestamp::parse("2015-05-10").unwrap();
        assert_eq!(ts.into_inner(), datetime!(2015-05-10 0:00 UTC));
    }

    #[test]
    fn test_date_hour_minute() {
        let ts = Timestamp::parse("2015-05-09 11:07").unwrap();
        assert_eq!(ts.into_inner(), datetime!(2015-05-09 11:07 UTC));
    }

    #[test]
    fn test_date_time() {
        let ts = Timestamp::parse("2015-05-08 11:07:30").unwrap();
        assert_eq!(ts.into_inner(), datetime!(2015-05-08 11:07:30 UTC));
    }

    #[test]
    fn test_rfc3339_keeps_offset() {
        let ts = Timestamp::parse("2015-05-08T11:07:30+02:00").unwrap();
        assert_eq!(ts.into_inner(), datetime!(2015-05-08 09:07:30 UTC));
    }

    #[test]
    fn test_rfc2822() {
        let ts = Timestamp::parse("Fri, 08 May 2015 11:07:30 +0000").unwrap();
        assert_eq!(ts.into_inner(), datetime!(2015-05-08 11:07:30 UTC));
    }

    #[test]
    fn test_rfc1123_gmt() {
        let ts = Timestamp::parse("Fri, 08 May 2015 11:07:30 GMT").unwrap();
        assert_eq!(ts.into_inner(), datetime!(2015-05-08 11:07:30 UTC));
    }

    #[test]
    fn test_rejects_unknown_layouts() {
        for raw in ["", "2015/05/08", "08-05-2015", "2015-13-01", "now"] {
            let err = Timestamp::parse(raw).unwrap_err();
            assert!(err.is_conversion_error(), "{raw:?} gave {err}");
        }
    }

    #[test]
    fn test_display_is_rfc3339() {
        let ts = Timestamp::parse("2015-05-08").unwrap();
        assert_eq!(ts.to_string(), "2015-05-08T00:00:00Z");
    }

    #[test]
    fn test_default_is_epoch() {
        assert_eq!(Timestamp::default().into_inner(), OffsetDateTime::UNIX_EPOCH);
    }
}
