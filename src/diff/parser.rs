//! Core diff parsing logic.
//!
//! Both functions are pure so they can be driven directly with fixture text.

use crate::changeset::ChangedLineSet;
use globset::GlobSet;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::helpers::{normalize_path, resolve_path};
use super::hunk::parse_hunk_header;

/// Collect the new-side line numbers of every hunk in a zero-context diff.
///
/// Lines that are not hunk headers are skipped. Empty or malformed input
/// yields an empty set.
///
/// # Arguments
///
/// * `diff_output` - Unified diff text produced with `-U0` (no context)
pub fn parse_changed_lines(diff_output: &str) -> ChangedLineSet {
    let mut changed = ChangedLineSet::default();

    for hunk in diff_output.lines().filter_map(parse_hunk_header) {
        changed.extend(hunk.lines());
    }

    changed
}

/// Turn a `--name-only -z` listing into absolute paths of files worth linting.
///
/// Entries are taken verbatim, so names with spaces or non-ASCII characters
/// survive. Empty entries are skipped, separators are normalized, and only
/// paths matching `include` are kept. Each path is resolved against
/// `repo_root` since git reports paths relative to the working tree root. The
/// first occurrence wins when a path is listed twice.
///
/// # Arguments
///
/// * `listing` - NUL-separated repo-relative paths
/// * `include` - Globs a path must match to be kept
/// * `repo_root` - Absolute path of the working tree root
pub fn parse_changed_files(listing: &str, include: &GlobSet, repo_root: &Path) -> Vec<PathBuf> {
    let mut seen = HashSet::new();

    listing
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .map(normalize_path)
        .filter(|path| include.is_match(path))
        .map(|path| resolve_path(repo_root, Path::new(&path)))
        .filter(|path| seen.insert(path.clone()))
        .collect()
}
