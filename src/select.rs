//! Target file selection.
//!
//! Decides which files the lint engine inspects: explicit file arguments win
//! outright; otherwise the changed files the engine would have inspected anyway.

use crate::changeset::ChangeSet;
use crate::diff::resolve_path;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Chooses the files to lint for a run.
#[derive(Debug, Clone)]
pub struct FileSelector {
    base_dir: PathBuf,
}

impl FileSelector {
    /// Create a selector resolving relative whitelist entries against `base_dir`,
    /// normally the lint engine's working directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Select the files to lint.
    ///
    /// - Non-empty `explicit_files` are returned unchanged; naming files on the
    ///   command line opts out of change scoping for the run.
    /// - Otherwise the changed files that also appear in `whitelisted_files`
    ///   (the engine's own target discovery), in change-set order. Changed files
    ///   the engine would not inspect are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirtycop::changeset::{ChangeSet, FileChanges};
    /// use dirtycop::select::FileSelector;
    /// use std::path::PathBuf;
    ///
    /// let changes = ChangeSet::from_entries(["company.rb", "user.rb", "project.rb"].map(|f| {
    ///     FileChanges { path: PathBuf::from("/repo").join(f), lines: Default::default() }
    /// }));
    /// let whitelist: Vec<PathBuf> = ["app.rb", "company.rb", "user.rb"]
    ///     .iter()
    ///     .map(PathBuf::from)
    ///     .collect();
    ///
    /// let selected = FileSelector::new("/repo").select(&[], &whitelist, &changes);
    /// assert_eq!(selected, vec![PathBuf::from("/repo/company.rb"), PathBuf::from("/repo/user.rb")]);
    /// ```
    pub fn select(
        &self,
        explicit_files: &[PathBuf],
        whitelisted_files: &[PathBuf],
        changes: &ChangeSet,
    ) -> Vec<PathBuf> {
        if !explicit_files.is_empty() {
            tracing::debug!(
                files = explicit_files.len(),
                "explicit files given; skipping change scoping"
            );
            return explicit_files.to_vec();
        }

        let whitelist: HashSet<PathBuf> = whitelisted_files
            .iter()
            .map(|path| self.resolve(path))
            .collect();

        let selected: Vec<PathBuf> = changes
            .files()
            .filter(|path| whitelist.contains(*path))
            .map(Path::to_path_buf)
            .collect();

        tracing::debug!(
            changed = changes.len(),
            whitelisted = whitelist.len(),
            selected = selected.len(),
            "selected target files"
        );
        selected
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        resolve_path(&self.base_dir, path)
    }
}
