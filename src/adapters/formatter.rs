// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI formatter adapter.
//!
//! Renders the global section first, then every other section in
//! alphabetical order. Keys are alphabetical within each section. A key or
//! value that would not survive a re-parse as written is wrapped in double
//! quotes, with embedded double quotes escaped as `\"`.
//!
//! A quoted value cannot end in a backslash: the closing quote would read as
//! escaped.

use std::fmt::{self, Write as _};

use crate::adapters::ini::{is_comment_marker, SECTION_START, SEPARATOR};
use crate::domain::{Configuration, GLOBAL_SECTION};
use crate::ports::ConfigFormatter;

const QUOTE: char = '"';

fn has_outer_whitespace(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
}

fn has_quote(text: &str) -> bool {
    text.contains(['"', '\''])
}

fn key_needs_quotes(key: &str) -> bool {
    has_quote(key)
        || has_outer_whitespace(key)
        || key.contains(SEPARATOR)
        || key.starts_with(is_comment_marker)
        || key.starts_with(SECTION_START)
}

fn value_needs_quotes(value: &str) -> bool {
    has_quote(value) || has_outer_whitespace(value) || value.contains(is_comment_marker)
}

fn write_text(out: &mut impl fmt::Write, text: &str, quoted: bool) -> fmt::Result {
    if !quoted {
        return out.write_str(text);
    }
    out.write_char(QUOTE)?;
    for c in text.chars() {
        if c == QUOTE {
            out.write_char('\\')?;
        }
        out.write_char(c)?;
    }
    out.write_char(QUOTE)
}

/// Writes `config` as INI text.
pub(crate) fn render(config: &Configuration, out: &mut impl fmt::Write) -> fmt::Result {
    let mut first = true;
    for (name, section) in config.sections() {
        if name == GLOBAL_SECTION && section.is_empty() {
            continue;
        }
        if !first {
            out.write_char('\n')?;
        }
        first = false;

        if name != GLOBAL_SECTION {
            writeln!(out, "[{name}]")?;
        }
        for (key, value) in section.iter() {
            write_text(out, key, key_needs_quotes(key))?;
            write!(out, " {SEPARATOR} ")?;
            write_text(out, value, value_needs_quotes(value))?;
            out.write_char('\n')?;
        }
    }
    Ok(())
}

/// INI formatter implementation.
///
/// The same rendering backs `Display` for [`Configuration`].
///
/// # Examples
///
/// ```rust
/// use hexini::IniFormatter;
/// use hexini::ports::ConfigFormatter;
///
/// let config = hexini::parse_str("[b]\ny = 2\n[a]\nx = 1\n").unwrap();
/// assert_eq!(IniFormatter::new().format(&config), "[a]\nx = 1\n\n[b]\ny = 2\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IniFormatter;

impl IniFormatter {
    /// Creates a new INI formatter.
    pub fn new() -> Self {
        IniFormatter
    }
}

impl ConfigFormatter for IniFormatter {
    fn format(&self, config: &Configuration) -> String {
        config.to_string()
    }
}
