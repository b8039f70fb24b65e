//! Builds a [`ChangeSet`] from a [`DiffProvider`].

use super::{ChangeSet, ChangedLineSet, FileChanges};
use crate::config::{Config, FailurePolicy};
use crate::diff::{parse_changed_files, parse_changed_lines, DiffProvider};
use crate::error::{DirtyError, Result};
use globset::GlobSet;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Computes changed files and changed lines relative to a reference.
///
/// The builder holds no results: every call asks the provider again, and the
/// caller keeps the [`ChangeSet`] returned by [`ChangeSetBuilder::build`] for
/// the rest of the run.
pub struct ChangeSetBuilder<'a, P: DiffProvider + ?Sized> {
    provider: &'a P,
    repo_root: PathBuf,
    include: GlobSet,
    policy: FailurePolicy,
    jobs: usize,
}

impl<'a, P: DiffProvider + ?Sized> ChangeSetBuilder<'a, P> {
    /// Create a sequential, fail-closed builder.
    ///
    /// # Arguments
    ///
    /// * `provider` - Source of listing and diff text
    /// * `repo_root` - Absolute working tree root; listed paths resolve against it
    /// * `include` - Globs a changed file must match
    pub fn new(provider: &'a P, repo_root: impl Into<PathBuf>, include: GlobSet) -> Self {
        Self {
            provider,
            repo_root: repo_root.into(),
            include,
            policy: FailurePolicy::Abort,
            jobs: 1,
        }
    }

    /// Create a builder using the `include`, `jobs` and failure policy from `config`.
    pub fn from_config(
        provider: &'a P,
        repo_root: impl Into<PathBuf>,
        config: &Config,
    ) -> Result<Self> {
        Ok(Self::new(provider, repo_root, config.include_globs()?)
            .with_policy(config.on_provider_failure)
            .with_jobs(config.jobs))
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch up to `jobs` per-file diffs concurrently. Values below 1 mean 1.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Absolute paths of included files added or modified since `reference`,
    /// in listing order.
    pub fn changed_files(&self, reference: &str) -> Result<Vec<PathBuf>> {
        let listing = self.recover(self.provider.list_changed_files(reference), || {
            format!("listing changed files against '{}'", reference)
        })?;

        Ok(parse_changed_files(&listing, &self.include, &self.repo_root))
    }

    /// Lines of `file` added or modified since `reference`.
    pub fn changed_lines(&self, file: &Path, reference: &str) -> Result<ChangedLineSet> {
        let diff = self.recover(self.provider.diff_for(file, reference), || {
            format!("diffing '{}' against '{}'", file.display(), reference)
        })?;

        let lines = parse_changed_lines(&diff);
        tracing::debug!(file = %file.display(), lines = lines.len(), "changed lines");
        Ok(lines)
    }

    /// Compute the full change set against `reference`.
    ///
    /// Entries keep the listing order whether or not diffs were fetched
    /// concurrently. The first fatal error aborts the build.
    pub fn build(&self, reference: &str) -> Result<ChangeSet> {
        let files = self.changed_files(reference)?;

        let entries: Vec<FileChanges> = if self.jobs == 1 || files.len() < 2 {
            files
                .into_iter()
                .map(|path| self.file_changes(path, reference))
                .collect::<Result<Vec<FileChanges>>>()?
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
                .map_err(|e| {
                    DirtyError::UserError(format!("failed to start diff worker pool: {}", e))
                })?;

            pool.install(|| {
                files
                    .into_par_iter()
                    .map(|path| self.file_changes(path, reference))
                    .collect::<Result<Vec<FileChanges>>>()
            })?
        };

        let change_set = ChangeSet::from_entries(entries);
        tracing::info!(
            reference,
            files = change_set.len(),
            lines = change_set.line_count(),
            "built change set"
        );
        Ok(change_set)
    }

    fn file_changes(&self, path: PathBuf, reference: &str) -> Result<FileChanges> {
        let lines = self.changed_lines(&path, reference)?;
        Ok(FileChanges { path, lines })
    }

    /// Apply the failure policy to a provider result.
    fn recover<F>(&self, result: Result<String>, context: F) -> Result<String>
    where
        F: FnOnce() -> String,
    {
        match result {
            Ok(text) => Ok(text),
            Err(err) if err.is_fatal() || self.policy == FailurePolicy::Abort => Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "{}; treating as unchanged", context());
                Ok(String::new())
            }
        }
    }
}
