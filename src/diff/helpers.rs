//! Path helpers shared by the diff parser, the selector and the offense filter.

use std::path::{Component, Path, PathBuf};

/// Normalize a file path to use forward slashes.
///
/// This ensures consistent path format for glob matching,
/// regardless of the platform where the diff was generated.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Resolve `path` against `base` and lexically clean `.` and `..` components.
///
/// Absolute paths are only cleaned. The filesystem is never consulted, so
/// paths to deleted or not-yet-created files resolve the same way as any other.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut cleaned = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never pop past the root.
                if !matches!(
                    cleaned.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    cleaned.pop();
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}
