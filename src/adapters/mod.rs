// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the INI implementations of the ports.
//!
//! - [`IniParser`] implements [`ConfigParser`](crate::ports::ConfigParser)
//! - [`IniFormatter`] implements [`ConfigFormatter`](crate::ports::ConfigFormatter)
//! - [`IniFileAdapter`] loads a configuration from disk

pub mod formatter;
pub mod ini;
pub mod ini_file;

pub use formatter::IniFormatter;
pub use ini::IniParser;
pub use ini_file::IniFileAdapter;
