// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The traits here describe how text becomes a configuration and back. The
//! INI implementations live in the adapters layer.

pub mod formatter;
pub mod parser;

// Re-export commonly used types
pub use formatter::ConfigFormatter;
pub use parser::ConfigParser;
