// SPDX-License-Identifier: MIT OR Apache-2.0

//! An INI parser with a typed decoder, built on hexagonal architecture.
//!
//! This crate reads INI text into an in-memory [`Configuration`] of sections
//! and raw string values, renders configurations back to INI text, and
//! decodes them into any type that derives `serde::Deserialize`.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: the configuration model, scalar conversions, field-name
//!   matching, and errors (`Configuration`, `ConfigValue`, `FieldName`)
//! - **Ports**: trait definitions for parsing and formatting (`ConfigParser`,
//!   `ConfigFormatter`)
//! - **Adapters**: the INI implementations of the ports and the file loader
//!   (`IniParser`, `IniFormatter`, `IniFileAdapter`)
//! - **Decode**: a serde `Deserializer` that binds a configuration to typed
//!   structs
//!
//! # Format
//!
//! ```ini
//! ; keys before the first section belong to the global section
//! name = demo
//!
//! [server]
//! host = localhost       # trailing comments are stripped
//! greeting = "  hi; there  "
//! 'odd key' = 'it\'s'
//! ```
//!
//! - `;` and `#` start comments.
//! - A key or value may be wrapped in single or double quotes. Quoted text
//!   keeps its whitespace, `=` and comment markers.
//! - `\"` and `\'` produce a literal quote. Other backslashes are kept.
//! - Repeating a key within a section, or repeating a section, is an error.
//!
//! # Feature Flags
//!
//! - `cli`: Build the `hexini` command-line tool (default)
//!
//! # Quick Start
//!
//! ```rust
//! use hexini::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Database {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct Config {
//!     name: String,
//!     database: Database,
//! }
//!
//! # fn main() -> std::result::Result<(), ConfigError> {
//! let config = hexini::parse_str("name = demo\n[database]\nhost = localhost\nport = 5432")?;
//! assert_eq!(config.get("database", "host"), Some("localhost"));
//!
//! let typed: Config = config.decode()?;
//! assert_eq!(typed.database.port, 5432);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod decode;
pub mod domain;
pub mod ports;

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

pub use adapters::{IniFileAdapter, IniFormatter, IniParser};
pub use decode::{
    from_config, from_config_with_options, from_reader, from_str, from_value, DecodeOptions,
};
pub use domain::{
    parse_duration, ConfigError, ConfigValue, Configuration, FieldName, Result, Section,
    SyntaxErrorKind, Timestamp, EXACT_NAME_MARKER, GLOBAL_SECTION,
};

/// Parses INI text from a reader.
///
/// The reader is buffered internally; there is no need to wrap it in a
/// `BufReader` first.
///
/// # Errors
///
/// - [`ConfigError::SyntaxError`] with the 1-based line of the first
///   grammar violation
/// - [`ConfigError::IoError`] if the reader fails
pub fn parse<R: Read>(reader: R) -> Result<Configuration> {
    adapters::ini::parse(reader)
}

/// Parses INI text held in memory.
///
/// # Examples
///
/// ```
/// use hexini::GLOBAL_SECTION;
///
/// let config = hexini::parse_str("key=value").unwrap();
/// assert_eq!(config.get(GLOBAL_SECTION, "key"), Some("value"));
///
/// let err = hexini::parse_str("key").unwrap_err();
/// assert_eq!(err.to_string(), "syntax error on line 1: no separator found");
/// ```
pub fn parse_str(text: &str) -> Result<Configuration> {
    parse(text.as_bytes())
}

/// Loads and parses the INI file at `path`.
///
/// # Errors
///
/// File-system errors are returned as [`ConfigError::IoError`], untouched.
/// A directory is rejected with [`ConfigError::NotAFile`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<Configuration> {
    adapters::ini_file::load(path)
}

/// Loads the INI file at `path` and decodes it into `T`.
pub fn from_file<P, T>(path: P) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let config = load(path)?;
    from_config(&config)
}

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{IniFileAdapter, IniFormatter, IniParser};
    pub use crate::decode::DecodeOptions;
    pub use crate::domain::{
        ConfigError, ConfigValue, Configuration, Result, Section, Timestamp, GLOBAL_SECTION,
    };
    pub use crate::ports::{ConfigFormatter, ConfigParser};
}
