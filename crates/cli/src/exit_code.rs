//! Exit code definitions for the s3p CLI
//!
//! Only startup failures change the exit code. An operation that fails after
//! startup prints its error and the process still exits successfully.

/// Exit codes for the s3p CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation ran (or help was shown for an unknown operation)
    Success = 0,

    /// Missing operation, invalid arguments or missing configuration
    Failure = 1,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed",
            Self::Failure => "Startup failure",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
