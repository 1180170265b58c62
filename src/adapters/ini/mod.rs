// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI parser adapter.
//!
//! Parsing runs in one pass: the scanner yields trimmed lines, each line is
//! classified, headers and key-value lines are tokenized, and the builder
//! collects the results. The first error stops the pass.
//!
//! # Grammar
//!
//! ```text
//! file      = *(line LINEBREAK)
//! line      = comment | section | keyvalue | ""
//! comment   = (";"|"#") *ANYCHAR
//! section   = "[" *SPACE sectionname *SPACE "]" [comment]
//! keyvalue  = key "=" value [comment]
//! key/value = [quote] *CHAR [quote]
//! quote     = "'" | '"'
//! ```

mod builder;
mod line;
mod scanner;
mod section;
mod tokenizer;

use std::io::{BufReader, Read};

use crate::domain::{ConfigError, Configuration, Result};
use crate::ports::ConfigParser;
use builder::ConfigBuilder;
use scanner::LineScanner;

pub(crate) use line::{is_comment_marker, SECTION_START};
pub(crate) use tokenizer::SEPARATOR;

/// Parses INI text from a reader.
///
/// The reader is buffered internally and dropped with the call.
pub(crate) fn parse<R: Read>(reader: R) -> Result<Configuration> {
    let mut builder = ConfigBuilder::new();
    let mut lines = 0;

    for line in LineScanner::new(BufReader::new(reader)) {
        let line = line?;
        lines = line.number;
        builder
            .handle_line(&line.text)
            .map_err(|kind| ConfigError::syntax(line.number, kind))?;
    }

    let keys = builder.key_count();
    let config = builder.finish();
    tracing::debug!(
        lines,
        sections = config.len(),
        keys,
        "parsed INI configuration"
    );
    Ok(config)
}

/// INI parser implementation.
///
/// # Examples
///
/// ```rust
/// use hexini::IniParser;
/// use hexini::ports::ConfigParser;
///
/// let parser = IniParser::new();
/// let config = parser.parse_str("[database]\nhost = localhost\nport = 5432").unwrap();
/// assert_eq!(config.get("database", "host"), Some("localhost"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IniParser;

impl IniParser {
    /// Creates a new INI parser.
    pub fn new() -> Self {
        IniParser
    }
}

impl ConfigParser for IniParser {
    fn parse_reader(&self, reader: &mut dyn Read) -> Result<Configuration> {
        parse(reader)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["ini", "cfg", "conf"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SyntaxErrorKind, GLOBAL_SECTION};

    fn parse_text(text: &str) -> Result<Configuration> {
        parse(text.as_bytes())
    }

    #[test]
    fn test_single_pair_in_global_section() {
        let config = parse_text("key=value").unwrap();
        assert_eq!(config.len(), 1);
        assert_eq!(config.global().len(), 1);
        assert_eq!(config.get(GLOBAL_SECTION, "key"), Some("value"));
    }

    #[test]
    fn test_section_after_blank_line() {
        let config = parse_text("[section]\n\nkey=value").unwrap();
        assert!(config.global().is_empty());
        assert_eq!(config.get("section", "key"), Some("value"));
    }

    #[test]
    fn test_duplicate_key_reports_line() {
        let err = parse_text("key=value\nkey=value2").unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(
            err.to_string(),
            "syntax error on line 2: key \"key\" already used in the global section"
        );
    }

    #[test]
    fn test_duplicate_section_reports_line() {
        let err = parse_text("[section]\n[section]").unwrap_err();
        match err {
            ConfigError::SyntaxError { line, kind } => {
                assert_eq!(line, 2);
                assert_eq!(kind, SyntaxErrorKind::DuplicateSection("section".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_line_counts_blank_and_comment_lines() {
        let err = parse_text("; header\n\n[s]\n# note\nbroken").unwrap_err();
        assert_eq!(err.line(), Some(5));
        assert_eq!(err.to_string(), "syntax error on line 5: no separator found");
    }

    #[test]
    fn test_crlf_input() {
        let config = parse_text("[s]\r\na = 1\r\nb = 2\r\n").unwrap();
        assert_eq!(config.get("s", "a"), Some("1"));
        assert_eq!(config.get("s", "b"), Some("2"));
    }

    #[test]
    fn test_ini_parser_port() {
        let parser = IniParser::new();
        let mut input: &[u8] = b"name = demo";
        let config = parser.parse_reader(&mut input).unwrap();
        assert_eq!(config.get(GLOBAL_SECTION, "name"), Some("demo"));
        assert!(parser.supported_extensions().contains(&"ini"));
    }
}
