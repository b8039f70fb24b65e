//! Tests for change set construction.

use super::*;
use crate::config::{Config, FailurePolicy};
use crate::diff::GitDiffProvider;
use crate::error::DirtyError;
use crate::git::DEFAULT_GIT_TIMEOUT;
use crate::test_support::{
    commit_all, create_test_repo, git, numbered_lines, write_file, FixtureProvider,
};

const USER_DIFF: &str = "\
--- a/app/models/user.rb
+++ b/app/models/user.rb
@@ -3,0 +4 @@
+  has_many :projects
@@ -5,2 +6,4 @@
+  a
+  b
+  c
+  d
@@ -10 +12 @@
+  def to_s = name
";

const COMPANY_DIFF: &str = "@@ -1,0 +1,2 @@\n+class Company\n+end\n";

fn builder(provider: &FixtureProvider) -> ChangeSetBuilder<'_, FixtureProvider> {
    ChangeSetBuilder::new(
        provider,
        "/repo",
        Config::default().include_globs().unwrap(),
    )
}

fn set(lines: &[usize]) -> ChangedLineSet {
    lines.iter().copied().collect()
}

// =========================================================================
// ChangedLineSet
// =========================================================================

#[test]
fn test_intersects_single_line() {
    let lines = set(&[4, 6, 7, 8, 9, 12]);

    assert!(lines.intersects(6, 6));
    assert!(!lines.intersects(1, 1));
    assert!(!lines.intersects(10, 11));
}

#[test]
fn test_intersects_spanning_range() {
    let lines = set(&[4, 12]);

    assert!(lines.intersects(1, 4));
    assert!(lines.intersects(10, 20));
    assert!(!lines.intersects(5, 11));
}

#[test]
fn test_inverted_range_never_intersects() {
    let lines = set(&[4, 5, 6]);
    assert!(!lines.intersects(6, 4));
}

#[test]
fn test_empty_set_never_intersects() {
    assert!(!ChangedLineSet::default().intersects(1, usize::MAX));
}

// =========================================================================
// ChangeSet
// =========================================================================

#[test]
fn test_change_set_lookup_and_order() {
    let change_set = ChangeSet::from_entries(vec![
        FileChanges {
            path: PathBuf::from("/repo/b.rb"),
            lines: set(&[1]),
        },
        FileChanges {
            path: PathBuf::from("/repo/a.rb"),
            lines: set(&[2, 3]),
        },
    ]);

    let files: Vec<&Path> = change_set.files().collect();
    assert_eq!(files, vec![Path::new("/repo/b.rb"), Path::new("/repo/a.rb")]);
    assert_eq!(change_set.get(Path::new("/repo/a.rb")), Some(&set(&[2, 3])));
    assert!(change_set.get(Path::new("/repo/c.rb")).is_none());
    assert_eq!(change_set.line_count(), 3);
}

#[test]
fn test_change_set_merges_duplicate_entries() {
    let change_set = ChangeSet::from_entries(vec![
        FileChanges {
            path: PathBuf::from("/repo/a.rb"),
            lines: set(&[1, 2]),
        },
        FileChanges {
            path: PathBuf::from("/repo/b.rb"),
            lines: set(&[5]),
        },
        FileChanges {
            path: PathBuf::from("/repo/a.rb"),
            lines: set(&[2, 9]),
        },
    ]);

    assert_eq!(change_set.len(), 2);
    assert_eq!(change_set.files().next(), Some(Path::new("/repo/a.rb")));
    assert_eq!(change_set.get(Path::new("/repo/a.rb")), Some(&set(&[1, 2, 9])));
}

#[test]
fn test_change_set_serializes_in_listing_order() {
    let change_set = ChangeSet::from_entries(vec![FileChanges {
        path: PathBuf::from("/repo/a.rb"),
        lines: set(&[3, 1]),
    }]);

    let json = serde_json::to_value(&change_set).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "files": [{ "path": "/repo/a.rb", "lines": [1, 3] }] })
    );
}

// =========================================================================
// ChangeSetBuilder with canned provider output
// =========================================================================

#[test]
fn test_build_from_fixture_provider() {
    let provider = FixtureProvider::new()
        .with_diff("app/models/user.rb", USER_DIFF)
        .with_diff("README.md", "@@ -1 +1 @@\n")
        .with_diff("app/models/company.rb", COMPANY_DIFF);

    let change_set = builder(&provider).build("HEAD").unwrap();

    let files: Vec<&Path> = change_set.files().collect();
    assert_eq!(
        files,
        vec![
            Path::new("/repo/app/models/user.rb"),
            Path::new("/repo/app/models/company.rb"),
        ]
    );
    assert_eq!(
        change_set.get(Path::new("/repo/app/models/user.rb")),
        Some(&set(&[4, 6, 7, 8, 9, 12]))
    );
    assert_eq!(
        change_set.get(Path::new("/repo/app/models/company.rb")),
        Some(&set(&[1, 2]))
    );
}

#[test]
fn test_build_queries_each_file_once() {
    let provider = FixtureProvider::new()
        .with_diff("a.rb", COMPANY_DIFF)
        .with_diff("b.rb", COMPANY_DIFF);

    builder(&provider).build("main").unwrap();

    assert_eq!(
        provider.calls(),
        vec!["list main", "diff main /repo/a.rb", "diff main /repo/b.rb"]
    );
}

#[test]
fn test_changed_lines_empty_diff_is_empty_set() {
    let provider = FixtureProvider::new().with_diff("a.rb", "");
    let lines = builder(&provider)
        .changed_lines(Path::new("/repo/a.rb"), "HEAD")
        .unwrap();
    assert!(lines.is_empty());
}

#[test]
fn test_build_is_idempotent() {
    let provider = FixtureProvider::new()
        .with_diff("app/models/user.rb", USER_DIFF)
        .with_diff("app/models/company.rb", COMPANY_DIFF);
    let builder = builder(&provider);

    assert_eq!(builder.build("HEAD").unwrap(), builder.build("HEAD").unwrap());
}

#[test]
fn test_parallel_build_matches_sequential() {
    let mut provider = FixtureProvider::new();
    for i in 0..20 {
        provider = provider.with_diff(&format!("lib/file_{}.rb", i), USER_DIFF);
    }

    let sequential = builder(&provider).build("HEAD").unwrap();
    let parallel = builder(&provider).with_jobs(4).build("HEAD").unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(parallel.len(), 20);
    assert_eq!(
        parallel.files().next(),
        Some(Path::new("/repo/lib/file_0.rb"))
    );
}

// =========================================================================
// Failure policy
// =========================================================================

#[test]
fn test_abort_policy_propagates_file_failure() {
    let provider = FixtureProvider::new()
        .with_diff("a.rb", COMPANY_DIFF)
        .with_failing_diff("b.rb");

    let err = builder(&provider).build("HEAD").unwrap_err();
    assert!(matches!(err, DirtyError::GitError(_)));
}

#[test]
fn test_suppress_policy_treats_failing_file_as_unchanged() {
    let provider = FixtureProvider::new()
        .with_failing_diff("b.rb")
        .with_diff("a.rb", COMPANY_DIFF);

    let change_set = builder(&provider)
        .with_policy(FailurePolicy::Suppress)
        .build("HEAD")
        .unwrap();

    assert_eq!(change_set.get(Path::new("/repo/b.rb")), Some(&set(&[])));
    assert_eq!(change_set.get(Path::new("/repo/a.rb")), Some(&set(&[1, 2])));
}

#[test]
fn test_suppress_policy_treats_failing_listing_as_no_changes() {
    let provider = FixtureProvider::new()
        .with_diff("a.rb", COMPANY_DIFF)
        .with_failing_listing();

    let change_set = builder(&provider)
        .with_policy(FailurePolicy::Suppress)
        .build("HEAD")
        .unwrap();

    assert!(change_set.is_empty());
}

#[test]
fn test_timeout_aborts_even_when_suppressing() {
    let provider = FixtureProvider::new()
        .with_diff("a.rb", COMPANY_DIFF)
        .with_timing_out_diff("slow.rb");

    let err = builder(&provider)
        .with_policy(FailurePolicy::Suppress)
        .with_jobs(2)
        .build("HEAD")
        .unwrap_err();

    assert!(matches!(err, DirtyError::GitTimeout(_)));
}

#[test]
fn test_from_config_applies_settings() {
    let provider = FixtureProvider::new()
        .with_diff("lib/seed.rake", COMPANY_DIFF)
        .with_failing_diff("app/user.rb");
    let config = Config::from_yaml(
        "include: [\"**/*.rake\", \"**/*.rb\"]\non_provider_failure: suppress\n",
    )
    .unwrap();

    let change_set = ChangeSetBuilder::from_config(&provider, "/repo", &config)
        .unwrap()
        .build("HEAD")
        .unwrap();

    assert_eq!(change_set.len(), 2);
    assert!(change_set.get(Path::new("/repo/lib/seed.rake")).is_some());
}

// =========================================================================
// Against a real repository
// =========================================================================

#[test]
fn test_build_against_git_repo_is_idempotent() {
    let temp_dir = create_test_repo();
    let path = temp_dir.path();

    write_file(path, "app/user.rb", &numbered_lines(12));
    write_file(path, "app/company.rb", &numbered_lines(3));
    commit_all(path, "Add models");

    let edited = numbered_lines(12)
        .replace("line 4\n", "line four\n")
        .replace("line 12\n", "line twelve\nline thirteen\n");
    write_file(path, "app/user.rb", &edited);
    write_file(path, "app/project.rb", "class Project\nend\n");
    write_file(path, "notes.txt", "not ruby\n");
    git(path, &["add", "-A"]);

    let root = path.canonicalize().unwrap();
    let provider = GitDiffProvider::new(&root, DEFAULT_GIT_TIMEOUT);
    let builder = ChangeSetBuilder::new(&provider, &root, Config::default().include_globs().unwrap());

    let first = builder.build("HEAD").unwrap();
    let second = builder.build("HEAD").unwrap();
    assert_eq!(first, second);

    assert_eq!(first.len(), 2);
    assert_eq!(
        first.get(&root.join("app/user.rb")),
        Some(&set(&[4, 12, 13]))
    );
    assert_eq!(first.get(&root.join("app/project.rb")), Some(&set(&[1, 2])));
    assert!(first.get(&root.join("app/company.rb")).is_none());
}
