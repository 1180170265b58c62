// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value line tokenizer.
//!
//! A line is scanned twice over: once for the key, up to the first unquoted
//! `=`, and once for the value, up to the end of the line or an unquoted
//! comment marker. Each scan tracks the open quote, if any.
//!
//! A backslash only escapes a quote character. Inside quotes it escapes the
//! quote that opened the segment; outside quotes it escapes either quote
//! character. Any other backslash is kept as-is.
//!
//! Text inside quotes keeps its whitespace. Whitespace around unquoted text
//! is trimmed.

use std::iter::Peekable;
use std::ops::Range;
use std::str::Chars;

use super::line::is_comment_marker;
use crate::domain::SyntaxErrorKind;

pub(crate) const SEPARATOR: char = '=';
const ESCAPE: char = '\\';

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Which half of the line a scan produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Key,
    Value,
}

/// Text collected by one scan, plus the span of it that came from quotes.
#[derive(Debug, Default)]
struct Collected {
    text: String,
    quoted: Option<Range<usize>>,
}

impl Collected {
    fn open_quote(&mut self) {
        let at = self.text.len();
        match &mut self.quoted {
            Some(span) => span.end = at,
            None => self.quoted = Some(at..at),
        }
    }

    fn close_quote(&mut self) {
        if let Some(span) = &mut self.quoted {
            span.end = self.text.len();
        }
    }

    /// Trims surrounding whitespace without cutting into quoted text.
    fn into_trimmed(self) -> String {
        let mut start = self.text.len() - self.text.trim_start().len();
        let mut end = self.text.trim_end().len();
        if let Some(span) = self.quoted {
            start = start.min(span.start);
            end = end.max(span.end);
        }
        if start >= end {
            return String::new();
        }
        self.text[start..end].to_string()
    }
}

/// How a scan ended.
enum Stop {
    Separator,
    EndOfLine,
}

struct Scan<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Scan<'a> {
    /// Consumes a backslash-escaped quote when `escapable` accepts the next
    /// character.
    fn take_escaped(&mut self, escapable: impl Fn(char) -> bool) -> Option<char> {
        match self.chars.peek() {
            Some(&next) if escapable(next) => {
                self.chars.next();
                Some(next)
            }
            _ => None,
        }
    }

    fn segment(&mut self, segment: Segment) -> Result<(Collected, Stop), SyntaxErrorKind> {
        let mut out = Collected::default();
        let mut quote: Option<char> = None;
        let mut expect_separator = false;

        while let Some(c) = self.chars.next() {
            if expect_separator {
                if c == SEPARATOR {
                    return Ok((out, Stop::Separator));
                }
                if c.is_whitespace() {
                    continue;
                }
                return Err(SyntaxErrorKind::ExpectedSeparator(c));
            }

            match quote {
                Some(active) => {
                    if c == ESCAPE {
                        if let Some(escaped) = self.take_escaped(|n| n == active) {
                            out.text.push(escaped);
                            continue;
                        }
                    } else if c == active {
                        quote = None;
                        out.close_quote();
                        expect_separator = segment == Segment::Key;
                        continue;
                    }
                    out.text.push(c);
                }
                None => {
                    if c == ESCAPE {
                        if let Some(escaped) = self.take_escaped(is_quote) {
                            out.text.push(escaped);
                            continue;
                        }
                    } else if is_quote(c) {
                        quote = Some(c);
                        out.open_quote();
                        continue;
                    } else if segment == Segment::Key && c == SEPARATOR {
                        return Ok((out, Stop::Separator));
                    } else if segment == Segment::Value && is_comment_marker(c) {
                        break;
                    }
                    out.text.push(c);
                }
            }
        }

        if quote.is_some() {
            return Err(SyntaxErrorKind::UnclosedQuote);
        }
        Ok((out, Stop::EndOfLine))
    }
}

/// Splits a key-value line into its key and value.
///
/// The line must already be trimmed and must not be blank, a comment, or a
/// section header.
pub(crate) fn parse_key_value(line: &str) -> Result<(String, String), SyntaxErrorKind> {
    let mut scan = Scan {
        chars: line.chars().peekable(),
    };

    let (key, stop) = scan.segment(Segment::Key)?;
    if let Stop::EndOfLine = stop {
        return Err(SyntaxErrorKind::MissingSeparator);
    }
    let (value, _) = scan.segment(Segment::Value)?;

    let key = key.into_trimmed();
    if key.is_empty() {
        return Err(SyntaxErrorKind::EmptyKey);
    }
    Ok((key, value.into_trimmed()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(line: &str) -> (String, String) {
        parse_key_value(line).unwrap_or_else(|e| panic!("{line:?} failed: {e}"))
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_plain_pairs() {
        assert_eq!(ok("key=value"), pair("key", "value"));
        assert_eq!(ok("key = value"), pair("key", "value"));
        assert_eq!(ok("my key = some value"), pair("my key", "some value"));
        assert_eq!(ok("key ="), pair("key", ""));
    }

    #[test]
    fn test_only_first_separator_splits() {
        assert_eq!(ok("url = a=b=c"), pair("url", "a=b=c"));
    }

    #[test]
    fn test_trailing_comments() {
        assert_eq!(ok("key=value; trailing"), pair("key", "value"));
        assert_eq!(ok("key = value # trailing"), pair("key", "value"));
        assert_eq!(ok("key = ;only comment"), pair("key", ""));
    }

    #[test]
    fn test_comment_markers_in_key_are_literal() {
        assert_eq!(ok("a;b = 1"), pair("a;b", "1"));
        assert_eq!(ok("a#b = 1"), pair("a#b", "1"));
    }

    #[test]
    fn test_quoted_values_keep_content() {
        assert_eq!(ok("key = \"  spaced  \""), pair("key", "  spaced  "));
        assert_eq!(ok("key = 'a;b#c'"), pair("key", "a;b#c"));
        assert_eq!(ok("key = \"a=b\" ; note"), pair("key", "a=b"));
        assert_eq!(ok("key = \"\""), pair("key", ""));
        assert_eq!(ok("key = \"it's\""), pair("key", "it's"));
    }

    #[test]
    fn test_quoted_keys() {
        assert_eq!(ok("\"k=ey\" = v"), pair("k=ey", "v"));
        assert_eq!(ok("' padded ' = v"), pair(" padded ", "v"));
        assert_eq!(ok("\"k\\\"ey\"=value"), pair("k\"ey", "value"));
    }

    #[test]
    fn test_escapes() {
        assert_eq!(ok("key = 'don\\'t'"), pair("key", "don't"));
        assert_eq!(ok("key = \"say \\'hi\\'\""), pair("key", "say \\'hi\\'"));
        assert_eq!(ok("k\\\"ey = v"), pair("k\"ey", "v"));
        assert_eq!(ok("path = C:\\dir\\file"), pair("path", "C:\\dir\\file"));
        assert_eq!(ok("key = \"a\\\\\"b\""), pair("key", "a\\\"b"));
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_key_value("key").unwrap_err();
        assert_eq!(err, SyntaxErrorKind::MissingSeparator);
        assert_eq!(err.to_string(), "no separator found");
    }

    #[test]
    fn test_unclosed_quotes() {
        assert_eq!(
            parse_key_value("\"key = value").unwrap_err(),
            SyntaxErrorKind::UnclosedQuote
        );
        assert_eq!(
            parse_key_value("key = 'value").unwrap_err(),
            SyntaxErrorKind::UnclosedQuote
        );
        assert_eq!(
            parse_key_value("key = \"value'").unwrap_err(),
            SyntaxErrorKind::UnclosedQuote
        );
    }

    #[test]
    fn test_text_after_quoted_key() {
        assert_eq!(
            parse_key_value("\"key\" x = value").unwrap_err(),
            SyntaxErrorKind::ExpectedSeparator('x')
        );
        assert_eq!(
            parse_key_value("\"key\"").unwrap_err(),
            SyntaxErrorKind::MissingSeparator
        );
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(parse_key_value("= value").unwrap_err(), SyntaxErrorKind::EmptyKey);
        assert_eq!(parse_key_value("\"\" = value").unwrap_err(), SyntaxErrorKind::EmptyKey);
    }
}
