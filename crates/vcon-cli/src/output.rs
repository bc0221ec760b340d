//! Output rendering and status messages for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use vcon_domain::VconDocument;

/// Renders documents and status messages.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Render the document in the configured format.
    pub fn render(&self, document: &VconDocument) -> Result<String> {
        let rendered = match self.format {
            OutputFormat::Pretty => document.to_json()?,
            OutputFormat::Compact => document.to_json_compact()?,
        };
        Ok(rendered)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize_green(&format!("✓ {}", message))
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize_red(&format!("✗ {}", message))
    }

    fn colorize_green(&self, message: &str) -> String {
        if self.color_enabled {
            message.green().to_string()
        } else {
            message.to_string()
        }
    }

    fn colorize_red(&self, message: &str) -> String {
        if self.color_enabled {
            message.red().to_string()
        } else {
            message.to_string()
        }
    }
}
