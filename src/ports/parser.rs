// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns a byte stream
//! into a [`Configuration`].

use std::io::Read;

use crate::domain::{Configuration, Result};

/// A trait for parsing configuration text.
///
/// Implementations read the stream to its end, or until the first error,
/// and must not keep any reference to it afterwards.
///
/// # Examples
///
/// ```rust
/// use hexini::ports::ConfigParser;
/// use hexini::domain::{Configuration, Result};
/// use std::io::Read;
///
/// struct EmptyParser;
///
/// impl ConfigParser for EmptyParser {
///     fn parse_reader(&self, _reader: &mut dyn Read) -> Result<Configuration> {
///         Ok(Configuration::new())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["empty"]
///     }
/// }
///
/// let config = EmptyParser.parse_str("ignored").unwrap();
/// assert!(config.is_empty());
/// ```
pub trait ConfigParser {
    /// Parses everything the reader yields.
    ///
    /// # Errors
    ///
    /// Grammar violations are reported as syntax errors carrying the line
    /// number. Failures of the reader itself are passed through as I/O
    /// errors.
    fn parse_reader(&self, reader: &mut dyn Read) -> Result<Configuration>;

    /// Parses configuration text held in memory.
    fn parse_str(&self, content: &str) -> Result<Configuration> {
        let mut bytes = content.as_bytes();
        self.parse_reader(&mut bytes)
    }

    /// Returns the file extensions (without the leading dot) this parser
    /// understands.
    fn supported_extensions(&self) -> &[&str];
}
