//! Diff providers: where raw listing and diff text comes from.

use crate::error::Result;
use crate::git::run_git;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Source of raw diff text relative to a reference.
///
/// Implementations return text exactly as the underlying tool printed it;
/// all interpretation happens in the parser. `Sync` so per-file diffs can be
/// fetched from a worker pool.
pub trait DiffProvider: Sync {
    /// NUL-terminated repo-relative paths of files added or modified since
    /// `reference`, unquoted. Deleted files are not listed; a renamed file is
    /// listed under its new path.
    fn list_changed_files(&self, reference: &str) -> Result<String>;

    /// Zero-context unified diff of `path` against `reference`.
    fn diff_for(&self, path: &Path, reference: &str) -> Result<String>;
}

/// [`DiffProvider`] backed by the `git` binary.
///
/// The reference always follows `--end-of-options`, so git never reads it as
/// an option.
#[derive(Debug, Clone)]
pub struct GitDiffProvider {
    repo_root: PathBuf,
    timeout: Duration,
}

impl GitDiffProvider {
    /// Create a provider that runs git in `repo_root`, bounding every call by `timeout`.
    pub fn new(repo_root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            repo_root: repo_root.into(),
            timeout,
        }
    }
}

impl DiffProvider for GitDiffProvider {
    fn list_changed_files(&self, reference: &str) -> Result<String> {
        // -z: no C-style quoting of non-ASCII names, no trimming of the entries.
        let output = run_git(
            &self.repo_root,
            &[
                "diff",
                "--no-renames",
                "--diff-filter=AM",
                "--name-only",
                "-z",
                "--end-of-options",
                reference,
            ],
            self.timeout,
        )?;
        Ok(decode_listing(&output.stdout))
    }

    fn diff_for(&self, path: &Path, reference: &str) -> Result<String> {
        let path = path.to_string_lossy();
        let output = run_git(
            &self.repo_root,
            &[
                "diff",
                "--no-color",
                "--no-ext-diff",
                "--no-renames",
                "-p",
                "-U0",
                "--end-of-options",
                reference,
                "--",
                &path,
            ],
            self.timeout,
        )?;
        Ok(output.text())
    }
}

/// Keep the UTF-8 entries of a NUL-terminated listing, each NUL-terminated.
fn decode_listing(raw: &[u8]) -> String {
    let mut listing = String::with_capacity(raw.len());

    for entry in raw.split(|&byte| byte == 0).filter(|entry| !entry.is_empty()) {
        match std::str::from_utf8(entry) {
            Ok(path) => {
                listing.push_str(path);
                listing.push('\0');
            }
            Err(_) => tracing::warn!(
                path = %String::from_utf8_lossy(entry),
                "skipping changed file with a non-UTF-8 name"
            ),
        }
    }

    listing
}
