// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the configuration model and value conversions.
//!
//! Nothing here performs I/O. The adapters build these types from text and
//! the decoder reads them.

pub mod config_value;
pub mod configuration;
pub mod duration;
pub mod errors;
pub mod field_name;
pub mod timestamp;

// Re-export commonly used types
pub use config_value::ConfigValue;
pub use configuration::{Configuration, Section, GLOBAL_SECTION};
pub use duration::parse_duration;
pub use errors::{ConfigError, Result, SyntaxErrorKind};
pub use field_name::{FieldName, EXACT_NAME_MARKER};
pub use timestamp::Timestamp;
