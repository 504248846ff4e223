//! Severity levels.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity of a log line, ascending.
///
/// A [`Logger`](crate::Logger) emits a line only if the line's severity is
/// greater than or equal to the logger's configured level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    /// Diagnostic detail, suppressed by default.
    Debug,
    /// Normal operational messages (the default level).
    #[default]
    Info,
    /// Something unexpected but recoverable.
    Warning,
    /// An operation failed.
    Error,
    /// The process cannot continue.
    Fatal,
}

impl LogLevel {
    /// All levels in ascending severity order.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// The canonical lowercase name, as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    /// The uppercase form used in emitted lines.
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognized level name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid log level '{0}' (choose one of: debug, info, warning, error, fatal)")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .iter()
            .find(|level| level.as_str() == s)
            .copied()
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}
