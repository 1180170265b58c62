// SPDX-License-Identifier: MIT OR Apache-2.0

//! Section header parsing.

use super::line::{is_comment_marker, SECTION_START};
use crate::domain::SyntaxErrorKind;

const SECTION_END: char = ']';

/// Returns the trimmed name of a `[name]` header.
///
/// Only whitespace or a comment may follow the closing bracket.
pub(crate) fn parse_section(line: &str) -> Result<String, SyntaxErrorKind> {
    let rest = line
        .strip_prefix(SECTION_START)
        .ok_or(SyntaxErrorKind::InvalidSectionStart)?;
    let end = rest.find(SECTION_END).ok_or(SyntaxErrorKind::UnclosedSection)?;

    for c in rest[end + SECTION_END.len_utf8()..].chars() {
        if is_comment_marker(c) {
            break;
        }
        if !c.is_whitespace() {
            return Err(SyntaxErrorKind::UnexpectedAfterSection(c));
        }
    }

    let name = rest[..end].trim();
    if name.is_empty() {
        return Err(SyntaxErrorKind::EmptySectionName);
    }
    Ok(name.to_string())
}
