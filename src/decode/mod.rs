// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding configurations into typed values.
//!
//! The decoder is a serde `Deserializer` over a [`Configuration`], so any
//! type deriving `Deserialize` can be a destination.
//!
//! # Binding rules
//!
//! - Scalar fields of the top-level struct bind to keys of the global
//!   section. Struct and map fields bind to sections; a section never
//!   binds to a scalar field, even through `Option`.
//! - A key binds to a field when it equals the field's serde name. Failing
//!   that, the first key (in key order) that spells the same words binds, so
//!   `my-key`, `my_key`, `my key` and `MyKey` all reach a field `my_key`.
//!   A serde name that starts with [`EXACT_NAME_MARKER`](crate::EXACT_NAME_MARKER),
//!   as in `#[serde(rename = "=AppName")]`, binds only the key `AppName`.
//! - Lists are comma-separated; each element is trimmed and decoded on its
//!   own.
//! - `std::time::Duration` reads compact strings such as `1m30s`;
//!   [`Timestamp`](crate::Timestamp) reads dates and date-times.
//! - Fields with no matching key get their zero value unless
//!   [`DecodeOptions::zero_missing_fields`] is turned off.
//!
//! # Examples
//!
//! ```
//! use serde::Deserialize;
//! use std::time::Duration;
//!
//! #[derive(Debug, Deserialize)]
//! struct Config {
//!     name: String,
//!     server: Server,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct Server {
//!     max_connections: u32,
//!     read_timeout: Duration,
//!     tags: Vec<String>,
//! }
//!
//! let text = "name = demo\n\
//!             [server]\n\
//!             max-connections = 64\n\
//!             ReadTimeout = 1.5s\n\
//!             tags = a, b, c\n";
//!
//! let config: Config = hexini::from_str(text).unwrap();
//! assert_eq!(config.name, "demo");
//! assert_eq!(config.server.max_connections, 64);
//! assert_eq!(config.server.read_timeout, Duration::from_millis(1500));
//! assert_eq!(config.server.tags, ["a", "b", "c"]);
//! ```

mod binding;
mod config;
mod section;
mod value;
mod zero;

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::{Configuration, Result};
use binding::Binding;
use config::ConfigDeserializer;
use value::ValueDeserializer;

/// Options controlling how a configuration binds to a destination.
///
/// # Examples
///
/// ```
/// use hexini::DecodeOptions;
///
/// let options = DecodeOptions::new().zero_missing_fields(false);
/// assert!(!options.zeroes_missing_fields());
/// assert!(DecodeOptions::default().zeroes_missing_fields());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    zero_missing_fields: bool,
}

impl DecodeOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        DecodeOptions {
            zero_missing_fields: true,
        }
    }

    /// Sets whether fields with no matching key receive their zero value.
    ///
    /// When off, such fields are left to serde: `Option` fields become
    /// `None`, `#[serde(default)]` fields take their default, and any other
    /// field is a "missing field" error.
    pub fn zero_missing_fields(mut self, enabled: bool) -> Self {
        self.zero_missing_fields = enabled;
        self
    }

    /// Returns whether fields with no matching key receive their zero value.
    pub fn zeroes_missing_fields(&self) -> bool {
        self.zero_missing_fields
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes a parsed configuration into `T`.
///
/// # Errors
///
/// - [`ConfigError::BindError`](crate::ConfigError::BindError) if `T` is not
///   a struct or map
/// - [`ConfigError::DecodeError`](crate::ConfigError::DecodeError) naming the
///   section and key whose value did not convert
pub fn from_config<'a, T>(config: &'a Configuration) -> Result<T>
where
    T: Deserialize<'a>,
{
    from_config_with_options(config, DecodeOptions::default())
}

/// Decodes a parsed configuration into `T` using the given options.
pub fn from_config_with_options<'a, T>(
    config: &'a Configuration,
    options: DecodeOptions,
) -> Result<T>
where
    T: Deserialize<'a>,
{
    tracing::debug!(
        sections = config.len(),
        destination = std::any::type_name::<T>(),
        "decoding configuration"
    );
    let binding = Binding::discover::<T>(options);
    T::deserialize(ConfigDeserializer::new(config, binding))
}

/// Parses INI text from a reader and decodes it into `T`.
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let config = crate::adapters::ini::parse(reader)?;
    from_config(&config)
}

/// Parses INI text and decodes it into `T`.
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_reader(text.as_bytes())
}

/// Decodes a single raw value into `T`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// let port: u16 = hexini::from_value("8080").unwrap();
/// assert_eq!(port, 8080);
///
/// let delays: Vec<Duration> = hexini::from_value("1s, 250ms").unwrap();
/// assert_eq!(delays, [Duration::from_secs(1), Duration::from_millis(250)]);
///
/// assert!(hexini::from_value::<u8>("300").unwrap_err().is_overflow_error());
/// ```
pub fn from_value<'a, T>(raw: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    T::deserialize(ValueDeserializer::new(raw))
}
