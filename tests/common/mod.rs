// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for the integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Writes `contents` to a fresh temporary file with an `.ini` suffix.
#[allow(dead_code)]
pub fn write_ini(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ini")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp file");
    file.flush().expect("failed to flush temp file");
    file
}

/// A small document touching every line kind.
#[allow(dead_code)]
pub const SAMPLE: &str = "\
; sample configuration
name = demo
debug = yes

[server]
host = localhost   # inline comment
port = 8080
tags = web, api , internal

[database]
url = \"postgres://db?sslmode=disable; retry\"
timeout = 1m30s
";
