// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-name matching.
//!
//! This module provides the `FieldName` type, which decides whether a
//! configuration key (or section name) refers to a destination field. A name
//! is split into words, and the words are re-joined with each of the
//! supported separators. A key matches when it equals one of those variants,
//! ignoring case.
//!
//! A name that starts with [`EXACT_NAME_MARKER`] turns the heuristic off: the
//! rest of the name must appear exactly as written.

use std::fmt;

/// Separators tried when re-joining the words of a field name.
const JOINERS: [&str; 4] = ["", "_", "-", " "];

/// Prefix that makes a field name match only its exact spelling.
///
/// ```
/// use hexini::FieldName;
///
/// let name = FieldName::new("=AppName");
/// assert!(name.is_exact());
/// assert!(name.matches("AppName"));
/// assert!(!name.matches("app_name"));
/// ```
pub const EXACT_NAME_MARKER: char = '=';

/// A destination field name together with the key spellings it accepts.
///
/// # Examples
///
/// ```
/// use hexini::FieldName;
///
/// let name = FieldName::new("max_connections");
/// assert!(name.matches("max_connections"));
/// assert!(name.matches("MaxConnections"));
/// assert!(name.matches("max-connections"));
/// assert!(name.matches("Max Connections"));
/// assert!(!name.matches("maxconnection"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldName {
    name: String,
    words: Vec<String>,
    exact: bool,
}

impl FieldName {
    /// Creates a `FieldName`, splitting the name into words.
    ///
    /// A leading [`EXACT_NAME_MARKER`] is stripped and the name gets no words.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_prefix(EXACT_NAME_MARKER) {
            Some(exact) => FieldName {
                name: exact.to_string(),
                words: Vec::new(),
                exact: true,
            },
            None => FieldName {
                words: split_words(&name),
                name,
                exact: false,
            },
        }
    }

    /// Returns the name without the exact-name marker.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Returns `true` if only the exact spelling matches.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Returns the words the name was split into, in their original case.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexini::FieldName;
    ///
    /// assert_eq!(FieldName::new("HTTPServerPort").words(), ["HTTP", "Server", "Port"]);
    /// assert_eq!(FieldName::new("read_timeout").words(), ["read", "timeout"]);
    /// ```
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns the lowercase spellings this name accepts, without duplicates.
    pub fn variants(&self) -> Vec<String> {
        if self.words.is_empty() {
            return Vec::new();
        }
        let lowered: Vec<String> = self.words.iter().map(|w| w.to_lowercase()).collect();
        let mut variants: Vec<String> = Vec::with_capacity(JOINERS.len());
        for joiner in JOINERS {
            let variant = lowered.join(joiner);
            if !variants.contains(&variant) {
                variants.push(variant);
            }
        }
        variants
    }

    /// Returns `true` if `key` spells this name.
    ///
    /// An exact match always counts. Otherwise the key is compared,
    /// case-insensitively, against every variant. Exact names have none.
    pub fn matches(&self, key: &str) -> bool {
        if key == self.name {
            return true;
        }
        let key = key.to_lowercase();
        self.variants().iter().any(|variant| *variant == key)
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        FieldName::new(name)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Splits at `_`, `-` and spaces, at lower-to-upper case changes, and at the
/// last capital of an acronym followed by a lowercase letter.
fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_snake_case() {
        assert_eq!(split_words("my_key"), vec!["my", "key"]);
        assert_eq!(split_words("__leading"), vec!["leading"]);
    }

    #[test]
    fn test_split_camel_and_pascal_case() {
        assert_eq!(split_words("MyKey"), vec!["My", "Key"]);
        assert_eq!(split_words("myKey"), vec!["my", "Key"]);
        assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(split_words("ID"), vec!["ID"]);
        assert_eq!(split_words("port8080Alt"), vec!["port8080", "Alt"]);
    }

    #[test]
    fn test_split_mixed_separators() {
        assert_eq!(split_words("my-key name"), vec!["my", "key", "name"]);
    }

    #[test]
    fn test_variants() {
        let name = FieldName::new("MyKey");
        assert_eq!(name.variants(), vec!["mykey", "my_key", "my-key", "my key"]);

        let single = FieldName::new("port");
        assert_eq!(single.variants(), vec!["port"]);
    }

    #[test]
    fn test_matches_all_spellings() {
        let name = FieldName::new("MyKey");
        for key in ["MyKey", "mykey", "MYKEY", "my_key", "my-key", "my key", "My Key"] {
            assert!(name.matches(key), "{key:?} should match");
        }
        for key in ["my.key", "my__key", "key", "mykeys", ""] {
            assert!(!name.matches(key), "{key:?} should not match");
        }
    }

    #[test]
    fn test_exact_match_without_words() {
        let name = FieldName::new("_");
        assert!(name.words().is_empty());
        assert!(name.variants().is_empty());
        assert!(name.matches("_"));
        assert!(!name.matches(""));
    }

    #[test]
    fn test_exact_marker_disables_heuristic() {
        let name = FieldName::new("=AppName");
        assert!(name.is_exact());
        assert_eq!(name.as_str(), "AppName");
        assert!(name.words().is_empty());
        assert!(name.variants().is_empty());
        assert!(name.matches("AppName"));
        for key in ["app_name", "appname", "APPNAME", "App Name", "=AppName"] {
            assert!(!name.matches(key), "{key:?} should not match");
        }
        assert!(!FieldName::new("AppName").is_exact());
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldName::from("read_timeout").to_string(), "read_timeout");
    }
}
