//! Exit code constants for the dirtycop CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad config, not a repository)
//! - 2: Offenses remain on changed lines
//! - 3: Git operation failure or timeout

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or invalid state.
pub const USER_ERROR: i32 = 1;

/// Offenses were reported on changed lines.
pub const OFFENSES_REPORTED: i32 = 2;

/// Git operation failure: provider error, non-zero exit, or timeout.
pub const GIT_FAILURE: i32 = 3;
