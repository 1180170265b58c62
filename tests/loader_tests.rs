// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for loading INI files from disk.

mod common;

use std::io::{ErrorKind, Write};
use std::time::Duration;

use common::{write_ini, SAMPLE};
use hexini::prelude::*;
use serde::Deserialize;
use tempfile::TempDir;

#[test]
fn test_load_sample_file() {
    let file = write_ini(SAMPLE);
    let config = hexini::load(file.path()).unwrap();
    assert_eq!(config.get(GLOBAL_SECTION, "name"), Some("demo"));
    assert_eq!(config.get("database", "timeout"), Some("1m30s"));
}

#[test]
fn test_from_file_decodes() {
    #[derive(Debug, Deserialize)]
    struct Database {
        timeout: Duration,
    }

    #[derive(Debug, Deserialize)]
    struct Config {
        database: Database,
    }

    let file = write_ini(SAMPLE);
    let config: Config = hexini::from_file(file.path()).unwrap();
    assert_eq!(config.database.timeout, Duration::from_secs(90));
}

#[test]
#[cfg(unix)]
fn test_directory_is_not_a_file() {
    let dir = TempDir::new().unwrap();
    let err = hexini::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NotAFile { .. }));
    assert!(!err.is_syntax_error());
}

#[test]
fn test_missing_file_keeps_io_error_kind() {
    let dir = TempDir::new().unwrap();
    let err = hexini::load(dir.path().join("absent.ini")).unwrap_err();
    match err {
        ConfigError::IoError(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_syntax_error_in_file_reports_line() {
    let file = write_ini("a = 1\n\n[ok]\nb = 2\nbroken line\n");
    let err = hexini::load(file.path()).unwrap_err();
    assert!(err.is_syntax_error());
    assert_eq!(err.line(), Some(5));
}

#[test]
fn test_adapter_reload_picks_up_changes() {
    let file = write_ini("level = 1\n");
    let mut adapter = IniFileAdapter::from_file(file.path()).unwrap();
    assert_eq!(adapter.configuration().get(GLOBAL_SECTION, "level"), Some("1"));

    let mut handle = std::fs::File::create(file.path()).unwrap();
    handle.write_all(b"level = 2\n").unwrap();
    handle.flush().unwrap();
    drop(handle);

    adapter.reload().unwrap();
    assert_eq!(adapter.configuration().get(GLOBAL_SECTION, "level"), Some("2"));
}

#[test]
fn test_adapter_reload_failure_keeps_previous() {
    let file = write_ini("level = 1\n");
    let path = file.path().to_path_buf();
    let mut adapter = IniFileAdapter::from_file(&path).unwrap();

    std::fs::write(&path, "level = 1\nlevel = 2\n").unwrap();
    let err = adapter.reload().unwrap_err();
    assert!(err.is_syntax_error());
    assert_eq!(adapter.configuration().get(GLOBAL_SECTION, "level"), Some("1"));
}

#[test]
fn test_adapter_decode() {
    #[derive(Debug, Deserialize)]
    struct Server {
        port: u16,
    }

    #[derive(Debug, Deserialize)]
    struct Config {
        server: Server,
    }

    let file = write_ini(SAMPLE);
    let adapter = IniFileAdapter::from_file(file.path()).unwrap();
    let config: Config = adapter.decode().unwrap();
    assert_eq!(config.server.port, 8080);

    let owned = adapter.into_configuration();
    assert_eq!(owned.get("server", "port"), Some("8080"));
}
