//! Output formatting utilities
//!
//! All command output, including operation errors, goes to stdout.
//! Logging goes to stderr through tracing.

mod formatter;

pub use formatter::Formatter;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Disable colored output
    pub no_color: bool,
    /// Suppress success messages
    pub quiet: bool,
}
