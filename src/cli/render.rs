//! Rendering layer for command results.
//!
//! Structured results go to stdout as JSON or YAML; informational lines are
//! suppressed in quiet mode. This module owns the `println!` calls of the CLI.

use crate::cli::OutputFormat;
use crate::error::Error;
use serde::Serialize;

/// Output handler that respects quiet mode.
///
/// Quiet mode is enabled if either `--quiet` or `--json-errors` is passed.
#[derive(Debug, Clone)]
pub struct Output {
    quiet: bool,
    format: OutputFormat,
}

impl Output {
    #[must_use]
    pub const fn new(quiet: bool, json_errors: bool, format: OutputFormat) -> Self {
        Self {
            quiet: quiet || json_errors,
            format,
        }
    }

    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print informational message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet {
            // ast-grep-ignore: no-println
            println!("{msg}");
        }
    }

    /// Print a line of requested data (never suppressed)
    pub fn line(&self, msg: impl std::fmt::Display) {
        // ast-grep-ignore: no-println
        println!("{msg}");
    }

    /// Print a structured value in the selected format.
    ///
    /// Text output falls back to YAML, which reads well for nested data.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub fn data<T: Serialize>(&self, value: &T) -> Result<(), Error> {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml | OutputFormat::Text => serde_yaml::to_string(value)?,
        };
        // ast-grep-ignore: no-println
        println!("{}", rendered.trim_end());
        Ok(())
    }
}
