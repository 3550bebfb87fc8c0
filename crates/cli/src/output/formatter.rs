//! Diagnostic formatter
//!
//! Every message this formatter writes goes to stderr. Stdout belongs to the
//! CI output line.

use console::style;
use serde::Serialize;

use super::OutputConfig;

/// Formatter for diagnostics
///
/// In JSON mode, errors are emitted as `{"error": ...}` objects and all other
/// messages are suppressed.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json && console::colors_enabled_stderr()
    }

    /// Output a progress or status line
    pub fn status(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        eprintln!("{message}");
    }

    /// Output a success message
    pub fn success(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }

        if self.colors_enabled() {
            eprintln!("{} {message}", style("✓").green().for_stderr());
        } else {
            eprintln!("✓ {message}");
        }
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render_error(message));
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }

        if self.colors_enabled() {
            eprintln!("{} {message}", style("⚠").yellow().for_stderr());
        } else {
            eprintln!("⚠ {message}");
        }
    }

    fn render_error(&self, message: &str) -> String {
        if self.config.json {
            let error = ErrorOutput { error: message };
            serde_json::to_string(&error).unwrap_or_else(|_| message.to_string())
        } else if self.colors_enabled() {
            format!("{} Error: {message}", style("✗").red().for_stderr())
        } else {
            format!("✗ Error: {message}")
        }
    }
}

#[derive(Serialize)]
struct ErrorOutput<'a> {
    error: &'a str,
}
