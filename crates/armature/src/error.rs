//! Application error taxonomy.
//!
//! Only two shapes are ever intercepted at the top-level boundary:
//! [`ReportableError`] (an expected, user-facing failure with a carried
//! exit code) and [`UserCancelled`]. Everything else — registration
//! mistakes, missing handler parameters, unexpected I/O — propagates and
//! is printed with its full chain, since it indicates a defect rather
//! than an expected failure mode.

use armature_proc::ProcError;
use thiserror::Error;

/// An expected, user-facing failure.
///
/// Carries a human message and the exit code to terminate with (default
/// 1). Raised by application logic, caught once at the boundary, printed,
/// and turned into the process exit status.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ReportableError {
    message: String,
    exit_code: i32,
}

impl ReportableError {
    /// A reportable failure with the default exit code 1.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_exit_code(message, 1)
    }

    /// A reportable failure with an explicit exit code.
    pub fn with_exit_code(message: impl Into<String>, exit_code: i32) -> Self {
        ReportableError {
            message: message.into(),
            exit_code,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

/// A failed external process is an expected failure: exit code 1, message
/// as produced by the runner (operation label, exit code, debug hint).
impl From<ProcError> for ReportableError {
    fn from(err: ProcError) -> Self {
        ReportableError::new(err.to_string())
    }
}

/// Benign, user-initiated cancellation (interrupt or explicit).
///
/// The boundary prints an informational message and exits 0.
#[derive(Debug, Default)]
pub struct UserCancelled {
    reason: Option<String>,
}

impl UserCancelled {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reason(reason: impl Into<String>) -> Self {
        UserCancelled {
            reason: Some(reason.into()),
        }
    }
}

impl std::fmt::Display for UserCancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "Operation cancelled by user: {}", reason),
            None => write!(f, "Operation cancelled by user"),
        }
    }
}

impl std::error::Error for UserCancelled {}
