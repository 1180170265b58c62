// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compact duration strings such as `300ms`, `1.5h` or `2h45m`.
//!
//! A duration is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit suffix. Valid units are `ns`, `us` (or `µs`),
//! `ms`, `s`, `m` and `h`. A bare `0` is accepted without a unit.

use std::time::Duration;

use crate::domain::errors::{ConfigError, Result};

const TARGET_TYPE: &str = "duration";

const NANOS_PER_SEC: u128 = 1_000_000_000;

// More fractional digits than this cannot change a nanosecond count.
const MAX_FRACTION_DIGITS: usize = 18;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Parses a compact duration string.
///
/// Negative durations cannot be represented and are conversion errors.
/// Durations too large for [`Duration`] are overflow errors.
///
/// # Examples
///
/// ```
/// use hexini::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
/// assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
/// assert_eq!(parse_duration("2m3s4ms").unwrap(), Duration::from_millis(123_004));
/// assert!(parse_duration("5").is_err());
/// ```
pub fn parse_duration(raw: &str) -> Result<Duration> {
    let conversion = || ConfigError::conversion(raw, TARGET_TYPE);
    let overflow = || ConfigError::overflow(raw, TARGET_TYPE);

    let mut rest = raw.strip_prefix('+').unwrap_or(raw);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(conversion());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, tail) = rest.split_at(leading_digits(rest));
        rest = tail;

        let mut fraction = "";
        if let Some(tail) = rest.strip_prefix('.') {
            let (digits, tail) = tail.split_at(leading_digits(tail));
            fraction = digits;
            rest = tail;
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(conversion());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, tail) = rest.split_at(unit_len);
        rest = tail;
        let scale = unit_nanos(unit).ok_or_else(conversion)?;

        if !whole.is_empty() {
            let whole: u128 = whole.parse().map_err(|_| overflow())?;
            total = whole
                .checked_mul(scale)
                .and_then(|nanos| total.checked_add(nanos))
                .ok_or_else(overflow)?;
        }

        let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
        if !fraction.is_empty() {
            let digits: u128 = fraction.parse().map_err(|_| conversion())?;
            let divisor = 10u128.pow(fraction.len() as u32);
            let nanos = digits.checked_mul(scale).ok_or_else(overflow)? / divisor;
            total = total.checked_add(nanos).ok_or_else(overflow)?;
        }
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| overflow())?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}
