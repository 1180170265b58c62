// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! This module provides the `ConfigValue` type, which wraps a raw INI value
//! and provides conversion methods to various Rust types. The same scalar
//! rules back the serde decoder, so `value.as_u16()` and decoding a `u16`
//! field accept and reject exactly the same input.

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;
use std::time::Duration;

use crate::domain::duration::parse_duration;
use crate::domain::errors::{ConfigError, Result};
use crate::domain::timestamp::Timestamp;

/// Separator between list elements.
pub const LIST_SEPARATOR: char = ',';

/// Parses a boolean.
///
/// Accepts, case-insensitively, `true`, `t`, `yes`, `y`, `on`, `1` and
/// `false`, `f`, `no`, `n`, `off`, `0`. Anything else is a conversion error.
pub(crate) fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::conversion(raw, "bool")),
    }
}

/// Parses an integer of any width, telling overflow apart from garbage.
pub(crate) fn parse_int<T>(raw: &str, target_type: &'static str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ConfigError::overflow(raw, target_type)
        }
        _ => ConfigError::conversion(raw, target_type),
    })
}

pub(crate) fn parse_f64(raw: &str) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|_| ConfigError::conversion(raw, "f64"))?;
    check_finite(raw, value.is_infinite(), "f64")?;
    Ok(value)
}

pub(crate) fn parse_f32(raw: &str) -> Result<f32> {
    let value: f32 = raw.parse().map_err(|_| ConfigError::conversion(raw, "f32"))?;
    check_finite(raw, value.is_infinite(), "f32")?;
    Ok(value)
}

// Rust saturates out-of-range literals to infinity.
fn check_finite(raw: &str, infinite: bool, target_type: &'static str) -> Result<()> {
    if infinite && !spells_infinity(raw) {
        return Err(ConfigError::overflow(raw, target_type));
    }
    Ok(())
}

fn spells_infinity(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Splits a comma-separated list, trimming each element.
///
/// An empty or all-whitespace value is an empty list.
pub(crate) fn split_list(raw: &str) -> Vec<&str> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(LIST_SEPARATOR).map(str::trim).collect()
}

/// A raw configuration value.
///
/// `ConfigValue` stores the value exactly as the parser produced it and
/// offers typed views on demand.
///
/// # Examples
///
/// ```
/// use hexini::ConfigValue;
///
/// let value = ConfigValue::from("42");
/// assert_eq!(value.as_str(), "42");
/// assert_eq!(value.as_i32().unwrap(), 42);
/// assert!(value.as_bool().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a new `ConfigValue` from a `String`.
    pub fn new(value: String) -> Self {
        ConfigValue(value)
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the value into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Converts the value to a boolean.
    ///
    /// Recognizes the following values (case-insensitive):
    /// - `true`: "true", "t", "yes", "y", "on", "1"
    /// - `false`: "false", "f", "no", "n", "off", "0"
    ///
    /// # Examples
    ///
    /// ```
    /// use hexini::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from("TRUE").as_bool().unwrap(), true);
    /// assert_eq!(ConfigValue::from("off").as_bool().unwrap(), false);
    /// assert!(ConfigValue::from("maybe").as_bool().unwrap_err().is_conversion_error());
    /// ```
    pub fn as_bool(&self) -> Result<bool> {
        parse_bool(&self.0)
    }

    /// Converts the value to an `i8`.
    pub fn as_i8(&self) -> Result<i8> {
        parse_int(&self.0, "i8")
    }

    /// Converts the value to an `i16`.
    pub fn as_i16(&self) -> Result<i16> {
        parse_int(&self.0, "i16")
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self) -> Result<i32> {
        parse_int(&self.0, "i32")
    }

    /// Converts the value to an `i64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexini::ConfigValue;
    ///
    /// let value = ConfigValue::from("9223372036854775807");
    /// assert_eq!(value.as_i64().unwrap(), i64::MAX);
    ///
    /// let value = ConfigValue::from("9223372036854775808");
    /// assert!(value.as_i64().unwrap_err().is_overflow_error());
    /// ```
    pub fn as_i64(&self) -> Result<i64> {
        parse_int(&self.0, "i64")
    }

    /// Converts the value to a `u8`.
    pub fn as_u8(&self) -> Result<u8> {
        parse_int(&self.0, "u8")
    }

    /// Converts the value to a `u16`.
    pub fn as_u16(&self) -> Result<u16> {
        parse_int(&self.0, "u16")
    }

    /// Converts the value to a `u32`.
    pub fn as_u32(&self) -> Result<u32> {
        parse_int(&self.0, "u32")
    }

    /// Converts the value to a `u64`.
    pub fn as_u64(&self) -> Result<u64> {
        parse_int(&self.0, "u64")
    }

    /// Converts the value to an `f32`.
    pub fn as_f32(&self) -> Result<f32> {
        parse_f32(&self.0)
    }

    /// Converts the value to an `f64`.
    pub fn as_f64(&self) -> Result<f64> {
        parse_f64(&self.0)
    }

    /// Converts the value to a [`Duration`], e.g. `"5s"` or `"1h30m"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexini::ConfigValue;
    /// use std::time::Duration;
    ///
    /// let value = ConfigValue::from("1m30s");
    /// assert_eq!(value.as_duration().unwrap(), Duration::from_secs(90));
    /// ```
    pub fn as_duration(&self) -> Result<Duration> {
        parse_duration(&self.0)
    }

    /// Converts the value to a [`Timestamp`].
    pub fn as_timestamp(&self) -> Result<Timestamp> {
        Timestamp::parse(&self.0)
    }

    /// Splits the value on commas, trimming every element.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexini::ConfigValue;
    ///
    /// let value = ConfigValue::from("a, b ,c");
    /// assert_eq!(value.as_list(), vec!["a", "b", "c"]);
    /// assert!(ConfigValue::from("").as_list().is_empty());
    /// ```
    pub fn as_list(&self) -> Vec<&str> {
        split_list(&self.0)
    }

    /// Parses the value into any type that implements `FromStr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexini::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse().unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T: FromStr>(&self) -> Result<T> {
        self.0
            .parse::<T>()
            .map_err(|_| ConfigError::conversion(self.0.as_str(), std::any::type_name::<T>()))
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConfigValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConfigValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_spellings() {
        for raw in ["true", "TRUE", "True", "t", "yes", "Y", "on", "1"] {
            assert!(parse_bool(raw).unwrap(), "{raw} should be true");
        }
        for raw in ["false", "FALSE", "f", "no", "N", "off", "0"] {
            assert!(!parse_bool(raw).unwrap(), "{raw} should be false");
        }
    }

    #[test]
    fn test_bool_rejects_unknown() {
        let err = parse_bool("anything else").unwrap_err();
        assert!(err.is_conversion_error());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_int_limits() {
        assert_eq!(ConfigValue::from("127").as_i8().unwrap(), 127);
        assert_eq!(ConfigValue::from("-128").as_i8().unwrap(), -128);
        assert_eq!(ConfigValue::from("65535").as_u16().unwrap(), 65535);
        assert_eq!(
            ConfigValue::from("18446744073709551615").as_u64().unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_int_overflow_is_distinct() {
        assert!(ConfigValue::from("128").as_i8().unwrap_err().is_overflow_error());
        assert!(ConfigValue::from("-129").as_i8().unwrap_err().is_overflow_error());
        assert!(ConfigValue::from("256").as_u8().unwrap_err().is_overflow_error());
        assert!(ConfigValue::from("99999999999999999999")
            .as_i64()
            .unwrap_err()
            .is_overflow_error());
    }

    #[test]
    fn test_int_conversion_errors() {
        assert!(ConfigValue::from("abc").as_i32().unwrap_err().is_conversion_error());
        assert!(ConfigValue::from("1.5").as_i32().unwrap_err().is_conversion_error());
        assert!(ConfigValue::from("-1").as_u32().unwrap_err().is_conversion_error());
        assert!(ConfigValue::from("").as_u32().unwrap_err().is_conversion_error());
    }

    #[test]
    fn test_floats() {
        assert_eq!(ConfigValue::from("12.5").as_f32().unwrap(), 12.5);
        assert_eq!(ConfigValue::from("123.321").as_f64().unwrap(), 123.321);
        assert!(ConfigValue::from("inf").as_f64().unwrap().is_infinite());
        assert!(ConfigValue::from("1e400").as_f64().unwrap_err().is_overflow_error());
        assert!(ConfigValue::from("1e39").as_f32().unwrap_err().is_overflow_error());
        assert!(ConfigValue::from("-1e39").as_f32().unwrap_err().is_overflow_error());
        assert!(ConfigValue::from("-inf").as_f32().unwrap().is_infinite());
        assert!(ConfigValue::from("twelve").as_f64().unwrap_err().is_conversion_error());
    }

    #[test]
    fn test_f32_limits() {
        assert_eq!(ConfigValue::from("3.4028235e38").as_f32().unwrap(), f32::MAX);
        assert_eq!(ConfigValue::from("-3.4028235e38").as_f32().unwrap(), f32::MIN);
        assert_eq!(ConfigValue::from("1e-50").as_f32().unwrap(), 0.0);
        assert_eq!(ConfigValue::from("1.7976931348623157e308").as_f64().unwrap(), f64::MAX);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b, c"), vec!["a", "b", "c"]);
        assert_eq!(split_list("single"), vec!["single"]);
        assert_eq!(split_list("a,,b"), vec!["a", "", "b"]);
        assert!(split_list("   ").is_empty());
    }

    #[test]
    fn test_parse_generic() {
        let value = ConfigValue::from("not-an-ip");
        let err = value.parse::<std::net::IpAddr>().unwrap_err();
        assert!(err.is_conversion_error());
    }

    #[test]
    fn test_value_equality_with_str() {
        let value = ConfigValue::from("hello");
        assert_eq!(value, "hello");
        assert_eq!(value.to_string(), "hello");
        assert_eq!(String::from(value), "hello");
    }
}
