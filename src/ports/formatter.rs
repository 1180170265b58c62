// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration formatter trait definition.

use std::io::Write;

use crate::domain::{Configuration, Result};

/// A trait for rendering a [`Configuration`] back to text.
///
/// Parsing the rendered text with the matching parser must give back a
/// configuration with the same content.
pub trait ConfigFormatter {
    /// Renders the configuration into a string.
    fn format(&self, config: &Configuration) -> String;

    /// Writes the rendered configuration to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the writer fails.
    fn write_config(&self, config: &Configuration, writer: &mut dyn Write) -> Result<()> {
        writer.write_all(self.format(config).as_bytes())?;
        Ok(())
    }
}
