//! Git command runner for dirtycop.
//!
//! Every git invocation is a bounded subprocess: output is captured on
//! background reader threads while the child is polled against a deadline,
//! and a child that outlives its timeout is killed.

use crate::error::{DirtyError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Timeout used for short repository queries such as `rev-parse`.
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output exactly as git wrote it.
    pub stdout: Vec<u8>,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_bytes(stdout: Vec<u8>, stderr: &[u8]) -> Self {
        Self {
            stdout,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }

    /// Stdout decoded lossily and trimmed, for diff text and single-value queries.
    ///
    /// NUL-separated listings must read [`GitOutput::stdout`] instead.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }
}

/// Run a git command in `cwd`, killing it if it runs longer than `timeout`.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(DirtyError::GitError)` - Spawn failure or non-zero exit code
/// * `Err(DirtyError::GitTimeout)` - The command exceeded `timeout`
///
/// # Examples
///
/// ```no_run
/// use dirtycop::git::{run_git, DEFAULT_GIT_TIMEOUT};
/// use std::path::Path;
///
/// let output = run_git(Path::new("."), &["diff", "--name-only", "HEAD"], DEFAULT_GIT_TIMEOUT)?;
/// println!("Changed: {}", output.text());
/// # Ok::<(), dirtycop::error::DirtyError>(())
/// ```
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str], timeout: Duration) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    let subcommand = args.first().copied().unwrap_or("");

    tracing::debug!(cwd = %cwd.display(), args = ?args, "running git");

    let mut child = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            DirtyError::GitError(format!("failed to execute git {}: {}", subcommand, e))
        })?;

    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let status = match wait_with_timeout(&mut child, timeout)? {
        Some(status) => status,
        None => {
            kill_process(&mut child);
            return Err(DirtyError::GitTimeout(format!(
                "git {} did not finish within {}s",
                args.join(" "),
                timeout.as_secs_f64()
            )));
        }
    };

    let git_output =
        GitOutput::from_bytes(join_reader(stdout_reader), &join_reader(stderr_reader));

    if status.success() {
        Ok(git_output)
    } else {
        let exit_code = status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.text()
        } else {
            git_output.stderr.clone()
        };

        Err(DirtyError::GitError(format!(
            "git {} failed (exit code {}): {}",
            subcommand, exit_code, error_msg
        )))
    }
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The absolute path to the repository root
/// * `Err(DirtyError::UserError)` - If not inside a git repository (exit code 1)
pub fn get_repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    match run_git(cwd, &["rev-parse", "--show-toplevel"], DEFAULT_GIT_TIMEOUT) {
        Ok(output) => Ok(PathBuf::from(output.text())),
        Err(DirtyError::GitError(msg)) if msg.contains("not a git repository") => {
            Err(DirtyError::UserError(
                "not inside a git repository. Run this command from within a git repository."
                    .to_string(),
            ))
        }
        Err(DirtyError::GitError(msg)) => Err(DirtyError::UserError(format!(
            "failed to locate repository root: {}",
            msg
        ))),
        Err(e) => Err(e),
    }
}

/// Poll a child until it exits or `timeout` elapses.
///
/// Returns `None` when the deadline passes first.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    return Ok(None);
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(DirtyError::GitError(format!(
                    "failed to check git process status: {}",
                    e
                )));
            }
        }
    }
}

/// Kill a process and reap it.
fn kill_process(child: &mut Child) {
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

/// Drain a pipe on its own thread so a chatty child never blocks on a full pipe.
fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn join_reader(reader: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
