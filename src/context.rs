//! Run context resolution for dirtycop.
//!
//! Finds the git repository from the working directory, loads the config and
//! settles which reference the run compares against. Every command resolves
//! one [`RunContext`] up front and builds its change set from it.

use crate::changeset::ChangeSetBuilder;
use crate::config::{validate_reference, Config};
use crate::diff::GitDiffProvider;
use crate::error::{DirtyError, Result};
use crate::git;
use crate::hooks::DirtyScope;
use std::env;
use std::path::{Path, PathBuf};

/// Resolved inputs for one run. All paths are absolute.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Root of the working tree (`git rev-parse --show-toplevel`).
    pub repo_root: PathBuf,

    /// Directory relative paths from the lint engine resolve against.
    pub base_dir: PathBuf,

    /// Effective configuration.
    pub config: Config,

    /// Reference to compare against.
    pub reference: String,
}

impl RunContext {
    /// Resolve the context from the current working directory, or from
    /// `directory` when given.
    ///
    /// # Arguments
    ///
    /// * `directory` - `-C` override for the working directory
    /// * `config_path` - Explicit config file, overriding `.dirtycop.yml`
    /// * `reference` - Explicit reference, overriding the configured one
    ///
    /// # Returns
    ///
    /// * `Ok(RunContext)` - Successfully resolved context
    /// * `Err(DirtyError::UserError)` - Not in a git repository, bad config or bad reference
    pub fn resolve(
        directory: Option<&Path>,
        config_path: Option<&Path>,
        reference: Option<&str>,
    ) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            DirtyError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        let cwd = match directory {
            Some(dir) => cwd.join(dir),
            None => cwd,
        };

        Self::resolve_from(&cwd, config_path, reference)
    }

    /// Resolve the context from a specific directory.
    pub fn resolve_from(
        cwd: &Path,
        config_path: Option<&Path>,
        reference: Option<&str>,
    ) -> Result<Self> {
        // Canonical, so paths resolved against it match the repo root git reports.
        let base_dir = cwd.canonicalize().map_err(|e| {
            DirtyError::UserError(format!("cannot access directory '{}': {}", cwd.display(), e))
        })?;

        let repo_root = git::get_repo_root(&base_dir)?;
        let config_path = config_path.map(|path| base_dir.join(path));
        let config = Config::discover(&repo_root, config_path.as_deref())?;

        let reference = match reference {
            Some(reference) => {
                validate_reference(reference)?;
                reference.to_string()
            }
            None => config.reference.clone(),
        };

        tracing::debug!(
            repo_root = %repo_root.display(),
            base_dir = %base_dir.display(),
            reference = %reference,
            "resolved run context"
        );

        Ok(Self {
            repo_root,
            base_dir,
            config,
            reference,
        })
    }

    /// Git-backed diff provider for this repository.
    pub fn provider(&self) -> GitDiffProvider {
        GitDiffProvider::new(&self.repo_root, self.config.diff_timeout())
    }

    /// Change set builder over `provider` configured for this run.
    pub fn builder<'a>(
        &self,
        provider: &'a GitDiffProvider,
    ) -> Result<ChangeSetBuilder<'a, GitDiffProvider>> {
        ChangeSetBuilder::from_config(provider, &self.repo_root, &self.config)
    }

    /// Build the change set for this run and wrap it in hooks.
    pub fn scope(&self) -> Result<DirtyScope> {
        let provider = self.provider();
        DirtyScope::prepare(
            &provider,
            &self.repo_root,
            &self.base_dir,
            &self.config,
            &self.reference,
        )
    }

    /// Path of `path` relative to the repository root, when it is inside it.
    pub fn repo_relative<'a>(&self, path: &'a Path) -> Option<&'a Path> {
        path.strip_prefix(&self.repo_root).ok()
    }
}
