//! Error types for dirtycop.
//!
//! Uses thiserror for derive macros and keeps messages user-actionable.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for dirtycop operations.
///
/// Each variant maps to a process exit code (see [`exit_codes`]).
#[derive(Error, Debug)]
pub enum DirtyError {
    /// Invalid arguments, invalid configuration, or not inside a repository.
    #[error("{0}")]
    UserError(String),

    /// Offenses remain on changed lines after filtering.
    #[error("{0} offense(s) reported on changed lines")]
    OffensesReported(usize),

    /// The diff provider (git) failed or produced unusable output.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// The diff provider did not finish within its timeout.
    #[error("Git operation timed out: {0}")]
    GitTimeout(String),
}

impl DirtyError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DirtyError::UserError(_) => exit_codes::USER_ERROR,
            DirtyError::OffensesReported(_) => exit_codes::OFFENSES_REPORTED,
            DirtyError::GitError(_) => exit_codes::GIT_FAILURE,
            DirtyError::GitTimeout(_) => exit_codes::GIT_FAILURE,
        }
    }

    /// Whether this failure must abort the run regardless of failure policy.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DirtyError::GitTimeout(_) | DirtyError::UserError(_))
    }
}

/// Result type alias for dirtycop operations.
pub type Result<T> = std::result::Result<T, DirtyError>;
