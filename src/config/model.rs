//! Config struct definition and default implementation.

use super::types::*;
use serde::Deserialize;

/// Configuration for a dirtycop run.
///
/// This struct represents the contents of `.dirtycop.yml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Commit, branch or other revision the working tree is compared against.
    #[serde(default = "default_reference")]
    pub reference: String,

    /// Globs (repo-relative) a changed file must match to be linted.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Globs (repo-relative) dropped from the target list when the lint
    /// engine does not supply its own discovered files.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Upper bound on each git invocation.
    #[serde(default = "default_diff_timeout_seconds")]
    pub diff_timeout_seconds: u64,

    /// Number of per-file diffs fetched concurrently (1 disables the pool).
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Behavior when git fails for a file or for the listing.
    #[serde(default)]
    pub on_provider_failure: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference: default_reference(),
            include: default_include(),
            exclude: Vec::new(),
            diff_timeout_seconds: default_diff_timeout_seconds(),
            jobs: default_jobs(),
            on_provider_failure: FailurePolicy::default(),
        }
    }
}
