//! Offense report formats read from and written back for the lint engine.

use super::{Offense, OffenseFilter};
use crate::changeset::ChangeSet;
use crate::error::{DirtyError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// Shape of an offense report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// JSON array of `{ "file", "first_line", "last_line", ... }` objects.
    #[default]
    Offenses,
    /// RuboCop's `--format json` report.
    Rubocop,
}

impl ReportFormat {
    /// Parse a report format from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "offenses" => Some(Self::Offenses),
            "rubocop" => Some(Self::Rubocop),
            _ => None,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Offenses => write!(f, "offenses"),
            ReportFormat::Rubocop => write!(f, "rubocop"),
        }
    }
}

/// A report with offenses outside changed lines removed.
#[derive(Debug, Clone)]
pub struct FilteredReport {
    /// The report in its input format.
    pub report: Value,
    /// Offenses kept.
    pub kept: usize,
    /// Offenses dropped.
    pub dropped: usize,
}

/// Drop every offense in `input` that does not touch a changed line.
///
/// # Returns
///
/// * `Ok(FilteredReport)` - The filtered report and counts
/// * `Err(DirtyError::UserError)` - Input is not a valid report of `format`
pub fn filter_report(
    input: &str,
    format: ReportFormat,
    filter: &OffenseFilter,
    changes: &ChangeSet,
) -> Result<FilteredReport> {
    let filtered = match format {
        ReportFormat::Offenses => filter_offense_list(input, filter, changes)?,
        ReportFormat::Rubocop => filter_rubocop_report(input, filter, changes)?,
    };

    tracing::info!(
        format = %format,
        kept = filtered.kept,
        dropped = filtered.dropped,
        "filtered offense report"
    );
    Ok(filtered)
}

fn filter_offense_list(
    input: &str,
    filter: &OffenseFilter,
    changes: &ChangeSet,
) -> Result<FilteredReport> {
    let offenses: Vec<Offense> = parse_json(input, ReportFormat::Offenses)?;
    let total = offenses.len();

    let kept: Vec<Offense> = offenses
        .into_iter()
        .filter(|offense| filter.keep(offense, changes))
        .collect();

    Ok(FilteredReport {
        kept: kept.len(),
        dropped: total - kept.len(),
        report: to_value(&kept)?,
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct RubocopReport {
    #[serde(default)]
    files: Vec<RubocopFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<RubocopSummary>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RubocopFile {
    path: PathBuf,
    #[serde(default)]
    offenses: Vec<RubocopOffense>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RubocopOffense {
    location: RubocopLocation,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Newer RuboCop versions emit `start_line`/`last_line`; older ones only `line`.
#[derive(Debug, Serialize, Deserialize)]
struct RubocopLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RubocopSummary {
    #[serde(default)]
    offense_count: usize,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn filter_rubocop_report(
    input: &str,
    filter: &OffenseFilter,
    changes: &ChangeSet,
) -> Result<FilteredReport> {
    let mut report: RubocopReport = parse_json(input, ReportFormat::Rubocop)?;
    let mut kept = 0;
    let mut dropped = 0;

    for file in &mut report.files {
        let mut offenses = Vec::with_capacity(file.offenses.len());

        for offense in std::mem::take(&mut file.offenses) {
            let first_line = offense
                .location
                .start_line
                .or(offense.location.line)
                .ok_or_else(|| {
                    DirtyError::UserError(format!(
                        "offense in '{}' has no line number",
                        file.path.display()
                    ))
                })?;
            let last_line = offense.location.last_line.unwrap_or(first_line);

            if filter.keep_location(&file.path, first_line, last_line, changes) {
                offenses.push(offense);
            } else {
                dropped += 1;
            }
        }

        kept += offenses.len();
        file.offenses = offenses;
    }

    if let Some(summary) = report.summary.as_mut() {
        summary.offense_count = kept;
    }

    Ok(FilteredReport {
        report: to_value(&report)?,
        kept,
        dropped,
    })
}

fn parse_json<T: for<'de> Deserialize<'de>>(input: &str, format: ReportFormat) -> Result<T> {
    serde_json::from_str(input).map_err(|e| {
        DirtyError::UserError(format!("failed to parse {} report: {}", format, e))
    })
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| DirtyError::UserError(format!("failed to serialize report: {}", e)))
}
