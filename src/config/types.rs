//! Configuration types and defaults for dirtycop.
//!
//! This module defines enums, constants, and default value functions
//! used by the Config struct.

use serde::Deserialize;

/// File name looked up at the repository root when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = ".dirtycop.yml";

/// What to do when the diff provider fails for a file or for the listing.
///
/// Timeouts abort the run under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Fail the run (default). Findings are never hidden by a broken provider.
    #[default]
    Abort,
    /// Log a warning and treat the failing file as having no changes.
    Suppress,
}

// Default value functions for serde
pub(crate) fn default_reference() -> String {
    "HEAD".to_string()
}
pub(crate) fn default_include() -> Vec<String> {
    vec!["**/*.rb".to_string()]
}
pub(crate) fn default_diff_timeout_seconds() -> u64 {
    30
}
pub(crate) fn default_jobs() -> usize {
    1
}
