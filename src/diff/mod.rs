//! Diff parsing primitives for dirtycop.
//!
//! This module turns raw version-control output into line and path data:
//! - Hunk headers (`@@ -a,b +c,d @@`) into new-side line spans
//! - Zero-context (`-U0`) diff text into the set of changed line numbers
//! - `--name-only` listings into absolute paths of files to lint
//!
//! Raw text comes from a [`DiffProvider`]; [`GitDiffProvider`] shells out to
//! git, and tests substitute canned text.

mod helpers;
mod hunk;
mod parser;
mod provider;


// Re-export public API
pub use helpers::{normalize_path, resolve_path};
pub use hunk::{parse_hunk_header, DiffHunk};
pub use parser::{parse_changed_files, parse_changed_lines};
pub use provider::{DiffProvider, GitDiffProvider};
