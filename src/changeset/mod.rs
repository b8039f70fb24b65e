//! Changed-line bookkeeping for one run.
//!
//! A [`ChangeSet`] maps every changed file (absolute path) to the set of
//! line numbers added or modified relative to a reference. It is built once
//! by [`ChangeSetBuilder`] at the start of a run, never mutated afterwards,
//! and handed by reference to the file selector and the offense filter.

mod builder;

#[cfg(test)]
mod tests;

pub use builder::ChangeSetBuilder;

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Line numbers (1-based) added or modified in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangedLineSet(BTreeSet<usize>);

impl ChangedLineSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Line numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Whether any line in `first..=last` is in the set.
    ///
    /// An inverted range (`first > last`) contains no lines and never intersects.
    pub fn intersects(&self, first: usize, last: usize) -> bool {
        if first > last {
            return false;
        }
        self.0.range(first..=last).next().is_some()
    }
}

impl Extend<usize> for ChangedLineSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<usize> for ChangedLineSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One file's entry in a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChanges {
    /// Absolute path of the changed file.
    pub path: PathBuf,
    /// Lines added or modified in the file.
    pub lines: ChangedLineSet,
}

/// Changed files and their changed lines, in the order the diff listed them.
///
/// A file without an entry has "no known changes"; callers cannot tell an
/// unchanged file from an untracked one, and don't need to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    files: Vec<FileChanges>,
    #[serde(skip)]
    index: HashMap<PathBuf, usize>,
}

impl ChangeSet {
    /// Build a change set from entries in listing order.
    ///
    /// A path listed twice keeps its first position; its line sets are merged.
    pub fn from_entries<I: IntoIterator<Item = FileChanges>>(entries: I) -> Self {
        let mut change_set = Self::default();

        for entry in entries {
            match change_set.index.get(&entry.path) {
                Some(&position) => change_set.files[position].lines.extend(entry.lines.iter()),
                None => {
                    change_set
                        .index
                        .insert(entry.path.clone(), change_set.files.len());
                    change_set.files.push(entry);
                }
            }
        }

        change_set
    }

    /// Changed lines for `path`, if the file changed.
    pub fn get(&self, path: &Path) -> Option<&ChangedLineSet> {
        self.index.get(path).map(|&position| &self.files[position].lines)
    }

    /// Changed file paths in listing order.
    pub fn files(&self) -> impl Iterator<Item = &Path> + '_ {
        self.files.iter().map(|entry| entry.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of changed lines across all files.
    pub fn line_count(&self) -> usize {
        self.files.iter().map(|entry| entry.lines.len()).sum()
    }
}
