// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI file loader adapter.
//!
//! This module provides an adapter that loads a configuration from a file on
//! disk, either from an explicit path or from the OS-appropriate config
//! directory.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::adapters::ini::parse;
use crate::domain::{ConfigError, Configuration, Result};

const DEFAULT_FILE_NAME: &str = "config.ini";

/// Opens `path` for reading, rejecting anything that is not a regular file.
///
/// File-system errors are returned untouched.
fn open_file(path: &Path) -> Result<File> {
    let file = File::open(path)?;
    if !file.metadata()?.is_file() {
        return Err(ConfigError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(file)
}

fn load_file(path: &Path) -> Result<Configuration> {
    let config = parse(open_file(path)?)?;
    tracing::debug!(path = %path.display(), sections = config.len(), "loaded INI file");
    Ok(config)
}

fn project_config_dir(app_name: &str, qualifier: &str) -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
        ConfigError::IoError(io::Error::new(
            io::ErrorKind::NotFound,
            "failed to determine project directories",
        ))
    })?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Loader for INI files.
///
/// # Examples
///
/// ```rust,no_run
/// use hexini::IniFileAdapter;
///
/// // Load from a specific file
/// let adapter = IniFileAdapter::from_file("/etc/myapp/config.ini").unwrap();
/// println!("{}", adapter.configuration());
///
/// // Load config.ini from the default OS location
/// let adapter = IniFileAdapter::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct IniFileAdapter {
    /// Path to the INI file
    file_path: PathBuf,
    /// Configuration parsed from the file
    config: Configuration,
}

impl IniFileAdapter {
    /// Loads the INI file at `path`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::IoError`] if the file cannot be opened or read
    /// - [`ConfigError::NotAFile`] if the path is a directory
    /// - [`ConfigError::SyntaxError`] if the content is not valid INI
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let config = load_file(&file_path)?;
        Ok(Self { file_path, config })
    }

    /// Loads `config.ini` from the OS-appropriate configuration directory.
    ///
    /// This method uses the `directories` crate to determine the appropriate
    /// configuration directory for the current operating system.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, DEFAULT_FILE_NAME)
    }

    /// Loads a custom file name from the OS-appropriate configuration
    /// directory.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let config_dir = project_config_dir(app_name, qualifier)?;
        Self::from_file(config_dir.join(filename))
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the loaded configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Consumes the adapter, returning the loaded configuration.
    pub fn into_configuration(self) -> Configuration {
        self.config
    }

    /// Re-reads the file.
    ///
    /// On failure the previously loaded configuration is kept.
    pub fn reload(&mut self) -> Result<()> {
        self.config = load_file(&self.file_path)?;
        Ok(())
    }

    /// Decodes the loaded configuration into `T`.
    pub fn decode<'a, T>(&'a self) -> Result<T>
    where
        T: Deserialize<'a>,
    {
        self.config.decode()
    }
}

/// Loads and parses the INI file at `path`.
pub(crate) fn load<P: AsRef<Path>>(path: P) -> Result<Configuration> {
    load_file(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GLOBAL_SECTION;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name = demo\n[database]\nhost = localhost").unwrap();

        let adapter = IniFileAdapter::from_file(temp_file.path()).unwrap();
        assert_eq!(adapter.file_path(), temp_file.path());
        assert_eq!(adapter.configuration().get(GLOBAL_SECTION, "name"), Some("demo"));
        assert_eq!(
            adapter.configuration().get("database", "host"),
            Some("localhost")
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = IniFileAdapter::from_file(dir.path().join("missing.ini")).unwrap_err();
        match err {
            ConfigError::IoError(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = load(dir.path()).unwrap_err();
        match err {
            ConfigError::NotAFile { path } => assert_eq!(path, dir.path()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_passes_through() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "ok = 1\n[broken").unwrap();

        let err = load(temp_file.path()).unwrap_err();
        assert!(err.is_syntax_error());
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_reload() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "value = 1").unwrap();
        temp_file.flush().unwrap();

        let mut adapter = IniFileAdapter::from_file(temp_file.path()).unwrap();
        assert_eq!(adapter.configuration().get(GLOBAL_SECTION, "value"), Some("1"));

        std::fs::write(temp_file.path(), "value = 2").unwrap();
        adapter.reload().unwrap();
        assert_eq!(adapter.configuration().get(GLOBAL_SECTION, "value"), Some("2"));
    }

    #[test]
    fn test_failed_reload_keeps_previous_configuration() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "value = 1").unwrap();
        temp_file.flush().unwrap();

        let mut adapter = IniFileAdapter::from_file(temp_file.path()).unwrap();
        std::fs::write(temp_file.path(), "value = 1\nvalue = 2").unwrap();

        assert!(adapter.reload().unwrap_err().is_syntax_error());
        assert_eq!(adapter.configuration().get(GLOBAL_SECTION, "value"), Some("1"));
    }
}
