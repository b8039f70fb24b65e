//! Extension points for a lint engine.
//!
//! The engine calls [`LintHooks::select_targets`] once, after its own target
//! discovery, and [`LintHooks::keep_offense`] once per finding. [`DirtyScope`]
//! implements both on top of a single [`ChangeSet`] built up front.

use crate::changeset::{ChangeSet, ChangeSetBuilder};
use crate::config::Config;
use crate::diff::DiffProvider;
use crate::error::Result;
use crate::filter::{Offense, OffenseFilter};
use crate::select::FileSelector;
use std::path::{Path, PathBuf};

/// Hooks a lint engine registers to scope a run to changed lines.
pub trait LintHooks {
    /// Final list of files to inspect.
    ///
    /// * `discovered` - Files the engine resolved from its own include/exclude config
    /// * `args` - Raw file arguments from the command line
    fn select_targets(&self, discovered: &[PathBuf], args: &[PathBuf]) -> Vec<PathBuf>;

    /// Whether to keep one reported finding.
    fn keep_offense(&self, offense: &Offense) -> bool;
}

/// Change-scoped hooks for one run.
#[derive(Debug, Clone)]
pub struct DirtyScope {
    changes: ChangeSet,
    selector: FileSelector,
    filter: OffenseFilter,
}

impl DirtyScope {
    /// Wrap an already-built change set.
    ///
    /// `base_dir` is the engine's working directory; relative paths coming
    /// from the engine resolve against it.
    pub fn new(changes: ChangeSet, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            changes,
            selector: FileSelector::new(base_dir.clone()),
            filter: OffenseFilter::new(base_dir),
        }
    }

    /// Build the change set for `reference` and wrap it.
    ///
    /// # Arguments
    ///
    /// * `provider` - Diff source
    /// * `repo_root` - Absolute working tree root
    /// * `base_dir` - The engine's working directory
    /// * `config` - Include globs, failure policy and parallelism
    /// * `reference` - Revision to compare against
    pub fn prepare<P: DiffProvider + ?Sized>(
        provider: &P,
        repo_root: &Path,
        base_dir: &Path,
        config: &Config,
        reference: &str,
    ) -> Result<Self> {
        let changes = ChangeSetBuilder::from_config(provider, repo_root, config)?.build(reference)?;
        Ok(Self::new(changes, base_dir))
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn filter(&self) -> &OffenseFilter {
        &self.filter
    }
}

impl LintHooks for DirtyScope {
    fn select_targets(&self, discovered: &[PathBuf], args: &[PathBuf]) -> Vec<PathBuf> {
        self.selector.select(args, discovered, &self.changes)
    }

    fn keep_offense(&self, offense: &Offense) -> bool {
        self.filter.keep(offense, &self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixtureProvider;

    const DIFF: &str = "@@ -1,2 +4,3 @@\n";

    fn scope(provider: &FixtureProvider) -> DirtyScope {
        DirtyScope::prepare(
            provider,
            Path::new("/repo"),
            Path::new("/repo"),
            &Config::default(),
            "HEAD",
        )
        .unwrap()
    }

    #[test]
    fn prepare_builds_change_set_once() {
        let provider = FixtureProvider::new()
            .with_diff("company.rb", DIFF)
            .with_diff("user.rb", DIFF);
        let scope = scope(&provider);

        scope.keep_offense(&Offense::new("user.rb", 4, 4));
        scope.keep_offense(&Offense::new("company.rb", 1, 1));
        scope.select_targets(&[PathBuf::from("user.rb")], &[]);

        // One listing plus one diff per file, no matter how often hooks run.
        assert_eq!(provider.calls().len(), 3);
    }

    #[test]
    fn select_targets_scopes_to_changed_files() {
        let provider = FixtureProvider::new()
            .with_diff("company.rb", DIFF)
            .with_diff("user.rb", DIFF)
            .with_diff("project.rb", DIFF);
        let scope = scope(&provider);

        let discovered: Vec<PathBuf> = ["app.rb", "company.rb", "user.rb"]
            .iter()
            .map(PathBuf::from)
            .collect();

        assert_eq!(
            scope.select_targets(&discovered, &[]),
            vec![PathBuf::from("/repo/company.rb"), PathBuf::from("/repo/user.rb")]
        );
    }

    #[test]
    fn select_targets_honors_explicit_args() {
        let provider = FixtureProvider::new().with_diff("company.rb", DIFF);
        let scope = scope(&provider);
        let args = vec![PathBuf::from("a.rb"), PathBuf::from("b.rb")];

        assert_eq!(scope.select_targets(&[], &args), args);
    }

    #[test]
    fn keep_offense_uses_changed_lines() {
        let provider = FixtureProvider::new().with_diff("user.rb", DIFF);
        let scope = scope(&provider);

        assert!(scope.keep_offense(&Offense::new("/repo/user.rb", 6, 6)));
        assert!(!scope.keep_offense(&Offense::new("/repo/user.rb", 1, 1)));
        assert!(!scope.keep_offense(&Offense::new("/repo/other.rb", 6, 6)));
    }

    #[test]
    fn hooks_work_through_a_trait_object() {
        let provider = FixtureProvider::new().with_diff("user.rb", DIFF);
        let hooks: Box<dyn LintHooks> = Box::new(scope(&provider));

        assert!(hooks.keep_offense(&Offense::new("user.rb", 5, 5)));
    }
}
