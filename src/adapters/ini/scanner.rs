// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splits a byte stream into trimmed, numbered lines.

use std::io::BufRead;

use crate::domain::{ConfigError, SyntaxErrorKind};

const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

/// One trimmed line and its 1-based number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub(crate) number: usize,
    pub(crate) text: String,
}

/// Iterator over the lines of a buffered reader.
///
/// Lines end at `\n`; a `\r` before it is dropped by the trim. The first
/// error ends the iteration.
pub(crate) struct LineScanner<R> {
    reader: R,
    number: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub(crate) fn new(reader: R) -> Self {
        LineScanner {
            reader,
            number: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    fn next_line(&mut self) -> Result<Option<Line>, ConfigError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.number += 1;

        let mut bytes = self.buf.as_slice();
        if self.number == 1 {
            bytes = bytes.strip_prefix(BYTE_ORDER_MARK).unwrap_or(bytes);
        }
        let text = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::syntax(self.number, SyntaxErrorKind::InvalidUtf8))?;

        Ok(Some(Line {
            number: self.number,
            text: text.trim().to_string(),
        }))
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = Result<Line, ConfigError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
