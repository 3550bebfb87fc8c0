//! Output handling
//!
//! Diagnostics go to stderr through the [`Formatter`]. The signed URL goes to
//! the CI output channel through the [`OutputSink`]; nothing else is written
//! to stdout.

mod formatter;
mod sink;

pub use formatter::Formatter;
pub use sink::{ENV_GITHUB_OUTPUT, OutputSink, legacy_output_line, output_line};

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
