//! Unified-diff hunk header parsing.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Matches `@@ -old[,count] +new[,count] @@`, with optional trailing section text.
static HUNK_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("Invalid hunk header regex")
});

/// One contiguous span of lines on the post-change ("new file") side of a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffHunk {
    /// First line of the span in the new file (1-based).
    pub new_start: usize,
    /// Number of lines in the span. Zero means a pure deletion at this position.
    pub new_count: usize,
}

impl DiffHunk {
    /// Line numbers touched by this hunk on the new side.
    ///
    /// Empty for pure deletions.
    pub fn lines(&self) -> Range<usize> {
        // Line 0 only appears in `+0,0` headers of files emptied by the change.
        if self.new_start == 0 {
            return 0..0;
        }
        self.new_start..self.new_start.saturating_add(self.new_count)
    }
}

/// Parse a hunk header line into its new-side span.
///
/// Format: `@@ -old_start[,old_count] +new_start[,new_count] @@ [section]`.
/// An omitted `new_count` means exactly one line.
///
/// Returns `None` for anything that is not a hunk header (file headers,
/// body lines, garbage); callers skip those lines.
///
/// # Examples
///
/// ```
/// use dirtycop::diff::{parse_hunk_header, DiffHunk};
///
/// let hunk = parse_hunk_header("@@ -1,2 +4,3 @@").unwrap();
/// assert_eq!(hunk, DiffHunk { new_start: 4, new_count: 3 });
/// assert_eq!(hunk.lines().collect::<Vec<_>>(), vec![4, 5, 6]);
///
/// assert!(parse_hunk_header("+    let x = 1;").is_none());
/// ```
pub fn parse_hunk_header(line: &str) -> Option<DiffHunk> {
    let caps = HUNK_HEADER_REGEX.captures(line)?;

    let new_start = caps.get(3)?.as_str().parse().ok()?;
    let new_count = match caps.get(4) {
        Some(count) => count.as_str().parse().ok()?,
        None => 1,
    };

    Some(DiffHunk {
        new_start,
        new_count,
    })
}
