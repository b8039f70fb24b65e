//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::CONFIG_FILE_NAME;
use crate::diff::normalize_path;
use crate::error::{DirtyError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(DirtyError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DirtyError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the config for a run.
    ///
    /// An explicit path must exist. Otherwise `.dirtycop.yml` at the repo root
    /// is used when present, and defaults apply when it is not.
    pub fn discover(repo_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = repo_root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| DirtyError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `reference` must be non-empty and must not start with `-`
    /// - `include` must be non-empty and every entry a valid glob
    /// - `exclude` entries must be valid globs
    /// - `diff_timeout_seconds` and `jobs` must be positive
    pub fn validate(&self) -> Result<()> {
        validate_reference(&self.reference)
            .map_err(|e| DirtyError::UserError(format!("config validation failed: {}", e)))?;

        if self.include.is_empty() {
            return Err(DirtyError::UserError(
                "config validation failed: include must list at least one glob".to_string(),
            ));
        }

        if self.diff_timeout_seconds == 0 {
            return Err(DirtyError::UserError(
                "config validation failed: diff_timeout_seconds must be greater than 0"
                    .to_string(),
            ));
        }

        if self.jobs == 0 {
            return Err(DirtyError::UserError(
                "config validation failed: jobs must be greater than 0".to_string(),
            ));
        }

        self.include_globs()?;
        self.exclude_globs()?;

        Ok(())
    }

    /// Compiled `include` globs.
    pub fn include_globs(&self) -> Result<GlobSet> {
        build_globset(&self.include, "include")
    }

    /// Compiled `exclude` globs.
    pub fn exclude_globs(&self) -> Result<GlobSet> {
        build_globset(&self.exclude, "exclude")
    }

    /// Per-invocation git timeout.
    pub fn diff_timeout(&self) -> Duration {
        Duration::from_secs(self.diff_timeout_seconds)
    }
}

/// Build a GlobSet from a list of glob patterns.
fn build_globset(patterns: &[String], field_name: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let glob = Glob::new(&normalize_path(pattern)).map_err(|e| {
            DirtyError::UserError(format!(
                "invalid glob pattern in {}: '{}' - {}",
                field_name, pattern, e
            ))
        })?;
        builder.add(glob);
    }

    builder.build().map_err(|e| {
        DirtyError::UserError(format!("failed to compile {} globs: {}", field_name, e))
    })
}

/// Check a reference before it reaches git.
///
/// A reference starting with `-` would be read as an option, so it is
/// rejected along with empty ones.
pub fn validate_reference(reference: &str) -> Result<()> {
    if reference.trim().is_empty() {
        return Err(DirtyError::UserError("reference must not be empty".to_string()));
    }

    if reference.starts_with('-') {
        return Err(DirtyError::UserError(format!(
            "reference '{}' must not start with '-'",
            reference
        )));
    }

    Ok(())
}
