//! Offense filtering.
//!
//! An offense is kept only when its line range touches a changed line of its
//! file. Files without a change-set entry have no known changes, so their
//! offenses are always dropped.

mod report;


pub use report::{filter_report, FilteredReport, ReportFormat};

use crate::changeset::ChangeSet;
use crate::diff::resolve_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A finding reported by the lint engine.
///
/// Fields other than the location pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offense {
    /// File the offense was reported in.
    pub file: PathBuf,
    /// First line of the offense (1-based).
    pub first_line: usize,
    /// Last line of the offense (inclusive).
    pub last_line: usize,
    /// Engine-specific fields (message, rule name, severity, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Offense {
    pub fn new(file: impl Into<PathBuf>, first_line: usize, last_line: usize) -> Self {
        Self {
            file: file.into(),
            first_line,
            last_line,
            extra: serde_json::Map::new(),
        }
    }
}

/// Whether `offense` falls on a changed line of its file.
///
/// Pure: the verdict depends only on the offense location and `changes`.
/// `offense.file` is looked up as given, so it must already be absolute.
pub fn should_report(offense: &Offense, changes: &ChangeSet) -> bool {
    touches_changes(&offense.file, offense.first_line, offense.last_line, changes)
}

fn touches_changes(file: &Path, first_line: usize, last_line: usize, changes: &ChangeSet) -> bool {
    changes
        .get(file)
        .is_some_and(|lines| lines.intersects(first_line, last_line))
}

/// [`should_report`] for offenses whose paths may be relative to the engine's
/// working directory.
#[derive(Debug, Clone)]
pub struct OffenseFilter {
    base_dir: PathBuf,
}

impl OffenseFilter {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Whether to keep `offense`, resolving its path against the base directory first.
    pub fn keep(&self, offense: &Offense, changes: &ChangeSet) -> bool {
        self.keep_location(&offense.file, offense.first_line, offense.last_line, changes)
    }

    /// Same decision for a bare location.
    pub fn keep_location(
        &self,
        file: &Path,
        first_line: usize,
        last_line: usize,
        changes: &ChangeSet,
    ) -> bool {
        let file = resolve_path(&self.base_dir, file);
        let keep = touches_changes(&file, first_line, last_line, changes);
        tracing::trace!(
            file = %file.display(),
            first_line,
            last_line,
            keep,
            "offense verdict"
        );
        keep
    }
}
