//! Output formatter
//!
//! Ensures consistent output formatting across all commands.
//!
//! Colors are only emitted when the target stream is a terminal and the
//! environment allows it (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`).

use std::io::{self, Write};

use console::Style;

use super::OutputConfig;

/// Formatter for CLI output
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
    stdout_colors: bool,
    stderr_colors: bool,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        let stdout_colors = !config.no_color && console::colors_enabled();
        let stderr_colors = !config.no_color && console::colors_enabled_stderr();
        Self {
            config,
            stdout_colors,
            stderr_colors,
        }
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    /// Check if colors are enabled for stdout
    pub fn colors_enabled(&self) -> bool {
        self.stdout_colors
    }

    /// Output a success message
    pub fn success(&self, message: &str) {
        if self.is_quiet() {
            return;
        }
        println!("{}", success_line(message, self.colors_enabled()));
    }

    /// Output an operation error
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        println!("{}", error_line(message, self.colors_enabled()));
    }

    /// Output a startup error to stderr
    pub fn fatal(&self, message: &str) {
        eprintln!("{}", error_line(message, self.stderr_colors));
    }

    /// Write a response body to stdout unchanged, followed by a newline
    pub fn raw(&self, body: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(body)?;
        stdout.write_all(b"\n")?;
        stdout.flush()
    }
}

fn success_line(message: &str, colors: bool) -> String {
    marked_line("✓", Style::new().green(), message, colors)
}

fn error_line(message: &str, colors: bool) -> String {
    marked_line("✗", Style::new().red(), message, colors)
}

fn marked_line(mark: &str, color: Style, message: &str, colors: bool) -> String {
    format!("{} {message}", color.force_styling(colors).apply_to(mark))
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}
