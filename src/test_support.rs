use crate::diff::DiffProvider;
use crate::error::{DirtyError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

/// Create a repository on `main` with one committed `README.md`.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    commit_all(path, "Initial commit");

    temp_dir
}

/// Write `content` to `relative` inside the repo, creating parent directories.
pub(crate) fn write_file(repo_dir: &Path, relative: &str, content: &str) {
    let path = repo_dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Stage everything and commit it.
pub(crate) fn commit_all(repo_dir: &Path, message: &str) {
    git(repo_dir, &["add", "-A"]);
    git(repo_dir, &["commit", "-m", message]);
}

/// `count` numbered lines, `line 1` through `line {count}`.
pub(crate) fn numbered_lines(count: usize) -> String {
    (1..=count).map(|i| format!("line {}\n", i)).collect()
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

/// Canned diff text keyed by repo-relative path.
///
/// Records every call so tests can assert how often the provider was asked.
#[derive(Default)]
pub(crate) struct FixtureProvider {
    listing: String,
    diffs: HashMap<String, String>,
    failing: Vec<String>,
    timing_out: Vec<String>,
    listing_fails: bool,
    calls: Mutex<Vec<String>>,
}

impl FixtureProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a file to the listing with the given diff text.
    pub(crate) fn with_diff(mut self, relative: &str, diff: &str) -> Self {
        self.listing.push_str(relative);
        self.listing.push('\0');
        self.diffs.insert(relative.to_string(), diff.to_string());
        self
    }

    /// Add a file to the listing whose diff call fails.
    pub(crate) fn with_failing_diff(mut self, relative: &str) -> Self {
        self.listing.push_str(relative);
        self.listing.push('\0');
        self.failing.push(relative.to_string());
        self
    }

    /// Add a file to the listing whose diff call times out.
    pub(crate) fn with_timing_out_diff(mut self, relative: &str) -> Self {
        self.listing.push_str(relative);
        self.listing.push('\0');
        self.timing_out.push(relative.to_string());
        self
    }

    pub(crate) fn with_failing_listing(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DiffProvider for FixtureProvider {
    fn list_changed_files(&self, reference: &str) -> Result<String> {
        self.record(format!("list {}", reference));
        if self.listing_fails {
            return Err(DirtyError::GitError(format!(
                "git diff failed (exit code 128): fatal: bad revision '{}'",
                reference
            )));
        }
        Ok(self.listing.clone())
    }

    fn diff_for(&self, path: &Path, reference: &str) -> Result<String> {
        self.record(format!("diff {} {}", reference, path.display()));

        let relative = self
            .diffs
            .keys()
            .chain(self.failing.iter())
            .chain(self.timing_out.iter())
            .find(|relative| path.ends_with(relative.as_str()))
            .cloned()
            .unwrap_or_default();

        if self.timing_out.contains(&relative) {
            return Err(DirtyError::GitTimeout(format!("git diff {}", relative)));
        }
        if self.failing.contains(&relative) {
            return Err(DirtyError::GitError(format!(
                "git diff failed (exit code 128): {}",
                relative
            )));
        }
        Ok(self.diffs.get(&relative).cloned().unwrap_or_default())
    }
}
