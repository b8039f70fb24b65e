//! Implementation of the `dirtycop filter` command.

use super::{read_input, write_line};
use crate::cli::FilterArgs;
use crate::context::RunContext;
use crate::error::{DirtyError, Result};
use crate::filter::{filter_report, ReportFormat};
use std::io::Write;

/// Execute the `dirtycop filter` command.
///
/// Reads a lint report, drops offenses that do not touch a changed line and
/// prints the rest in the input format.
///
/// # Returns
///
/// * `Ok(())` - No offense remains
/// * `Err(DirtyError::OffensesReported)` - At least one offense remains (exit code 2)
/// * `Err(DirtyError::UserError)` - Unknown format or unreadable report
pub fn cmd_filter<W: Write>(ctx: &RunContext, args: FilterArgs, out: &mut W) -> Result<()> {
    let format = ReportFormat::from_str(&args.format).ok_or_else(|| {
        DirtyError::UserError(format!(
            "unknown report format '{}'. Expected 'offenses' or 'rubocop'.",
            args.format
        ))
    })?;

    let input = read_input(&args.input)?;
    let scope = ctx.scope()?;
    let filtered = filter_report(&input, format, scope.filter(), scope.changes())?;

    let json = serde_json::to_string_pretty(&filtered.report)
        .map_err(|e| DirtyError::UserError(format!("failed to serialize report: {}", e)))?;
    write_line(out, json)?;

    if filtered.kept > 0 {
        return Err(DirtyError::OffensesReported(filtered.kept));
    }
    Ok(())
}
