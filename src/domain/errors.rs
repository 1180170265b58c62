// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the INI crate.
//!
//! This module defines every error that can occur while parsing, loading, or
//! decoding an INI configuration. All errors use `thiserror` for proper error
//! handling and conversion.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::configuration::describe_section;

/// The specific grammar violation behind a [`ConfigError::SyntaxError`].
///
/// The line number is carried by the enclosing `SyntaxError`; this type only
/// describes what went wrong on that line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// A key-value line without a `=` separator.
    #[error("no separator found")]
    MissingSeparator,

    /// A quote was opened but the line ended before it was closed.
    #[error("quote not closed")]
    UnclosedQuote,

    /// Something other than whitespace followed a closed, quoted key.
    #[error("unexpected {0:?}, expected the separator '='")]
    ExpectedSeparator(char),

    /// The key was empty after trimming.
    #[error("key can't be empty")]
    EmptyKey,

    /// A section header that does not start with `[`.
    #[error("section should start with '['")]
    InvalidSectionStart,

    /// A section header without a closing `]`.
    #[error("section not closed")]
    UnclosedSection,

    /// Content other than whitespace or a comment after the closing `]`.
    #[error("unexpected {0:?} after section closed")]
    UnexpectedAfterSection(char),

    /// A section header whose name is empty after trimming.
    #[error("section name can't be empty")]
    EmptySectionName,

    /// The same key was assigned twice within one section.
    #[error("key {key:?} already used in {}", describe_section(.section))]
    DuplicateKey {
        /// The repeated key
        key: String,
        /// The section the key was repeated in
        section: String,
    },

    /// The same section was declared twice.
    #[error("section {0:?} already defined")]
    DuplicateSection(String),

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// The main error type for INI operations.
///
/// Parsing fails with [`SyntaxError`](ConfigError::SyntaxError) or
/// [`IoError`](ConfigError::IoError); decoding fails with conversion,
/// overflow, or bind errors. Every failure is fatal to the call that raised
/// it, and the first detected problem is the one reported.
///
/// # Examples
///
/// ```
/// use hexini::ConfigError;
///
/// let err = hexini::parse_str("key=value\nkey=value2").unwrap_err();
/// assert!(err.is_syntax_error());
/// assert_eq!(err.line(), Some(2));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The input violates the INI grammar.
    #[error("syntax error on line {line}: {kind}")]
    SyntaxError {
        /// The 1-based line number the error was found on
        line: usize,
        /// What was wrong with the line
        kind: SyntaxErrorKind,
    },

    /// Reading the input stream or file system failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The loader was pointed at something that is not a regular file.
    #[error("not a file: {}", .path.display())]
    NotAFile {
        /// The offending path
        path: PathBuf,
    },

    /// A raw value could not be parsed as the requested type.
    #[error("can't convert {value:?} to type {target_type}")]
    ConversionError {
        /// The raw value
        value: String,
        /// The name of the destination type
        target_type: String,
    },

    /// A raw value parsed as a number that does not fit the requested type.
    #[error("can't convert {value:?} to type {target_type}, it overflows the type")]
    OverflowError {
        /// The raw value
        value: String,
        /// The name of the destination type
        target_type: String,
    },

    /// A value failed to decode; identifies where the value came from.
    #[error("failed to decode key {key:?} in {}: {source}", describe_section(.section))]
    DecodeError {
        /// The section holding the key
        section: String,
        /// The key whose value failed to decode
        key: String,
        /// The underlying conversion failure
        source: Box<ConfigError>,
    },

    /// The decode destination is not a struct or map.
    #[error("invalid decode destination: {message}")]
    BindError {
        /// Why the destination was rejected
        message: String,
    },

    /// A destination type rejected the shape of the configuration.
    #[error("{message}")]
    DeserializeError {
        /// The message produced by the destination type
        message: String,
    },
}

impl ConfigError {
    /// Creates a `SyntaxError` for the given line.
    pub fn syntax(line: usize, kind: SyntaxErrorKind) -> Self {
        ConfigError::SyntaxError { line, kind }
    }

    /// Creates a `ConversionError` for a raw value and target type.
    pub fn conversion(value: impl Into<String>, target_type: impl Into<String>) -> Self {
        ConfigError::ConversionError {
            value: value.into(),
            target_type: target_type.into(),
        }
    }

    /// Creates an `OverflowError` for a raw value and target type.
    pub fn overflow(value: impl Into<String>, target_type: impl Into<String>) -> Self {
        ConfigError::OverflowError {
            value: value.into(),
            target_type: target_type.into(),
        }
    }

    /// Creates a `BindError` with the given message.
    pub fn bind(message: impl Into<String>) -> Self {
        ConfigError::BindError {
            message: message.into(),
        }
    }

    /// Attaches the section and key a value came from.
    ///
    /// Errors that already carry a location, or that are not about a single
    /// value, are returned unchanged.
    pub(crate) fn in_entry(self, section: &str, key: &str) -> Self {
        match self {
            ConfigError::ConversionError { .. }
            | ConfigError::OverflowError { .. }
            | ConfigError::DeserializeError { .. } => ConfigError::DecodeError {
                section: section.to_string(),
                key: key.to_string(),
                source: Box::new(self),
            },
            other => other,
        }
    }

    /// Returns the innermost error, looking through `DecodeError` wrappers.
    pub fn root_cause(&self) -> &ConfigError {
        match self {
            ConfigError::DecodeError { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns the line number of a syntax error.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConfigError::SyntaxError { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns `true` for grammar violations.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, ConfigError::SyntaxError { .. })
    }

    /// Returns `true` for failures of the underlying stream or file system.
    pub fn is_io_error(&self) -> bool {
        matches!(self, ConfigError::IoError(_))
    }

    /// Returns `true` if a value did not parse as its destination type.
    pub fn is_conversion_error(&self) -> bool {
        matches!(self.root_cause(), ConfigError::ConversionError { .. })
    }

    /// Returns `true` if a number did not fit its destination type.
    pub fn is_overflow_error(&self) -> bool {
        matches!(self.root_cause(), ConfigError::OverflowError { .. })
    }

    /// Returns `true` if the decode destination itself was unsuitable.
    pub fn is_bind_error(&self) -> bool {
        matches!(self, ConfigError::BindError { .. })
    }
}

impl serde::de::Error for ConfigError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ConfigError::DeserializeError {
            message: msg.to_string(),
        }
    }

    // Destination types that reject a string keep the conversion taxonomy.
    fn invalid_value(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        match unexp {
            serde::de::Unexpected::Str(value) => ConfigError::conversion(value, exp.to_string()),
            other => Self::custom(format_args!("invalid value: {other}, expected {exp}")),
        }
    }
}

/// A specialized Result type for INI operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
