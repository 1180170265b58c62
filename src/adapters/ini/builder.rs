// SPDX-License-Identifier: MIT OR Apache-2.0

//! Accumulates classified lines into a [`Configuration`].

use super::line::LineKind;
use super::section::parse_section;
use super::tokenizer::parse_key_value;
use crate::domain::{Configuration, SyntaxErrorKind, GLOBAL_SECTION};

/// Tracks the current section while lines are fed in order.
#[derive(Debug)]
pub(crate) struct ConfigBuilder {
    config: Configuration,
    current: String,
    keys: usize,
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        ConfigBuilder {
            config: Configuration::new(),
            current: GLOBAL_SECTION.to_string(),
            keys: 0,
        }
    }

    /// Handles one trimmed line.
    pub(crate) fn handle_line(&mut self, line: &str) -> Result<(), SyntaxErrorKind> {
        match LineKind::classify(line) {
            LineKind::Blank | LineKind::Comment => Ok(()),
            LineKind::Section => {
                let name = parse_section(line)?;
                self.enter_section(name)
            }
            LineKind::KeyValue => {
                let (key, value) = parse_key_value(line)?;
                self.add_key_value(key, value)
            }
        }
    }

    fn enter_section(&mut self, name: String) -> Result<(), SyntaxErrorKind> {
        if !self.config.add_section(name.clone()) {
            return Err(SyntaxErrorKind::DuplicateSection(name));
        }
        tracing::trace!(section = %name, "entering section");
        self.current = name;
        Ok(())
    }

    fn add_key_value(&mut self, key: String, value: String) -> Result<(), SyntaxErrorKind> {
        let section = self.config.section_entry(&self.current);
        if section.contains_key(&key) {
            return Err(SyntaxErrorKind::DuplicateKey {
                key,
                section: self.current.clone(),
            });
        }
        section.insert(key, value);
        self.keys += 1;
        Ok(())
    }

    /// Number of key-value pairs added so far.
    pub(crate) fn key_count(&self) -> usize {
        self.keys
    }

    pub(crate) fn finish(self) -> Configuration {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(lines: &[&str]) -> Result<Configuration, SyntaxErrorKind> {
        let mut builder = ConfigBuilder::new();
        for line in lines {
            builder.handle_line(line)?;
        }
        Ok(builder.finish())
    }

    #[test]
    fn test_keys_before_first_section_are_global() {
        let config = build(&["a = 1", "", "; comment", "[s]", "b = 2"]).unwrap();
        assert_eq!(config.get(GLOBAL_SECTION, "a"), Some("1"));
        assert_eq!(config.get("s", "b"), Some("2"));
        assert_eq!(config.get(GLOBAL_SECTION, "b"), None);
    }

    #[test]
    fn test_empty_section_is_registered() {
        let config = build(&["[empty]"]).unwrap();
        assert!(config.section("empty").unwrap().is_empty());
    }

    #[test]
    fn test_same_key_in_different_sections() {
        let config = build(&["k = g", "[a]", "k = a", "[b]", "k = b"]).unwrap();
        assert_eq!(config.get(GLOBAL_SECTION, "k"), Some("g"));
        assert_eq!(config.get("a", "k"), Some("a"));
        assert_eq!(config.get("b", "k"), Some("b"));
    }

    #[test]
    fn test_duplicate_key_names_section() {
        let err = build(&["[http]", "port = 1", "port = 2"]).unwrap_err();
        assert_eq!(
            err,
            SyntaxErrorKind::DuplicateKey {
                key: "port".to_string(),
                section: "http".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_section() {
        let err = build(&["[s]", "[s]"]).unwrap_err();
        assert_eq!(err, SyntaxErrorKind::DuplicateSection("s".to_string()));
        assert_eq!(err.to_string(), "section \"s\" already defined");
    }

    #[test]
    fn test_key_count() {
        let mut builder = ConfigBuilder::new();
        for line in ["a = 1", "[s]", "b = 2", "# c = 3"] {
            builder.handle_line(line).unwrap();
        }
        assert_eq!(builder.key_count(), 2);
    }
}
