// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory configuration model.
//!
//! A [`Configuration`] maps section names to [`Section`]s, and a section maps
//! keys to raw [`ConfigValue`]s. All values stay strings until they are
//! decoded; typing never happens during parsing.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::config_value::ConfigValue;
use crate::domain::errors::{ConfigError, Result};

/// Name of the implicit section holding key-value pairs that appear before
/// the first section header.
///
/// The parser rejects empty section names, so this can never clash with a
/// declared section.
pub const GLOBAL_SECTION: &str = "";

/// Renders a section name for messages.
pub(crate) fn describe_section(name: &str) -> String {
    if name == GLOBAL_SECTION {
        "the global section".to_string()
    } else {
        format!("section {name:?}")
    }
}

/// The key-value pairs of one section.
///
/// Keys are unique and iterate in alphabetical order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    entries: BTreeMap<String, ConfigValue>,
}

impl Section {
    /// Creates an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// let config = hexini::parse_str("[http]\nport = 8080").unwrap();
    /// let http = config.section("http").unwrap();
    /// assert_eq!(http.get("port"), Some("8080"));
    /// assert_eq!(http.get("host"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(ConfigValue::as_str)
    }

    /// Returns the value for `key` with its typed conversion methods.
    pub fn value(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Inserts a key-value pair, returning the previous value if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.entries.remove(key)
    }

    /// Returns `true` if the section holds `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the section has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys in alphabetical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + Clone {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Section
where
    K: Into<String>,
    V: Into<ConfigValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Section {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A parsed INI document: section name to section.
///
/// The global section always exists, even when empty. Sections iterate with
/// the global section first and the rest alphabetically.
///
/// # Examples
///
/// ```
/// use hexini::{Configuration, GLOBAL_SECTION};
///
/// let config = hexini::parse_str("name = demo\n[db]\nuser = bob").unwrap();
/// assert_eq!(config.get(GLOBAL_SECTION, "name"), Some("demo"));
/// assert_eq!(config.get("db", "user"), Some("bob"));
/// assert_eq!(config.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    sections: BTreeMap<String, Section>,
}

impl Configuration {
    /// Creates a configuration holding only an empty global section.
    pub fn new() -> Self {
        let mut sections = BTreeMap::new();
        sections.insert(GLOBAL_SECTION.to_string(), Section::new());
        Self { sections }
    }

    /// Returns the global section.
    pub fn global(&self) -> &Section {
        self.sections
            .get(GLOBAL_SECTION)
            .unwrap_or(&EMPTY_SECTION)
    }

    /// Returns the global section for modification.
    pub fn global_mut(&mut self) -> &mut Section {
        self.section_entry(GLOBAL_SECTION)
    }

    /// Returns the named section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Returns the named section for modification.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// Returns the named section, creating it if needed.
    pub fn section_entry(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    /// Adds an empty section. Returns `false` if it already existed.
    pub(crate) fn add_section(&mut self, name: String) -> bool {
        match self.sections.entry(name) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(entry) => {
                entry.insert(Section::new());
                true
            }
        }
    }

    /// Returns `true` if the named section exists.
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Returns the raw value of `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Decodes a single value into `T`.
    ///
    /// Returns `Ok(None)` when the key is absent. Conversion failures name
    /// the section and key.
    ///
    /// # Examples
    ///
    /// ```
    /// let config = hexini::parse_str("[http]\nport = 8080").unwrap();
    /// let port: Option<u16> = config.get_as("http", "port").unwrap();
    /// assert_eq!(port, Some(8080));
    ///
    /// let err = config.get_as::<u8>("http", "port").unwrap_err();
    /// assert!(err.is_overflow_error());
    /// ```
    pub fn get_as<'a, T>(&'a self, section: &str, key: &str) -> Result<Option<T>>
    where
        T: Deserialize<'a>,
    {
        match self.get(section, key) {
            Some(raw) => crate::decode::from_value(raw)
                .map(Some)
                .map_err(|e| e.in_entry(section, key)),
            None => Ok(None),
        }
    }

    /// Returns the number of sections, including the global section.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if no section holds any key.
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(Section::is_empty)
    }

    /// Iterates over the section names, global section first.
    pub fn section_names(&self) -> impl Iterator<Item = &str> + Clone {
        self.sections.keys().map(String::as_str)
    }

    /// Iterates over `(name, section)` pairs, global section first.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Decodes this configuration into `T`.
    ///
    /// See [`crate::decode`] for how keys and sections bind to fields.
    pub fn decode<'a, T>(&'a self) -> Result<T>
    where
        T: Deserialize<'a>,
    {
        crate::decode::from_config(self)
    }
}

static EMPTY_SECTION: Section = Section {
    entries: BTreeMap::new(),
};

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::adapters::formatter::render(self, f)
    }
}

impl FromStr for Configuration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        crate::adapters::ini::parse(s.as_bytes())
    }
}
