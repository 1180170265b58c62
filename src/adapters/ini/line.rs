// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line classification.

/// Characters that start a comment.
pub(crate) const COMMENT_MARKERS: [char; 2] = [';', '#'];

pub(crate) const SECTION_START: char = '[';

pub(crate) fn is_comment_marker(c: char) -> bool {
    COMMENT_MARKERS.contains(&c)
}

/// What a trimmed line holds, decided by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Blank,
    Comment,
    Section,
    KeyValue,
}

impl LineKind {
    pub(crate) fn classify(line: &str) -> Self {
        match line.chars().next() {
            None => LineKind::Blank,
            Some(c) if is_comment_marker(c) => LineKind::Comment,
            Some(SECTION_START) => LineKind::Section,
            Some(_) => LineKind::KeyValue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(LineKind::classify(""), LineKind::Blank);
        assert_eq!(LineKind::classify("; note"), LineKind::Comment);
        assert_eq!(LineKind::classify("# note"), LineKind::Comment);
        assert_eq!(LineKind::classify("[section]"), LineKind::Section);
        assert_eq!(LineKind::classify("key = value"), LineKind::KeyValue);
        assert_eq!(LineKind::classify("key ; not a comment"), LineKind::KeyValue);
        assert_eq!(LineKind::classify("\"[quoted]\" = v"), LineKind::KeyValue);
    }
}
