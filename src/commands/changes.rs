//! Implementation of the `dirtycop changes` command.

use super::write_line;
use crate::context::RunContext;
use crate::error::{DirtyError, Result};
use std::io::Write;

/// Execute the `dirtycop changes` command.
///
/// Prints `{ "files": [{ "path", "lines" }, ...] }` in listing order.
pub fn cmd_changes<W: Write>(ctx: &RunContext, out: &mut W) -> Result<()> {
    let scope = ctx.scope()?;

    let json = serde_json::to_string_pretty(scope.changes())
        .map_err(|e| DirtyError::UserError(format!("failed to serialize change set: {}", e)))?;

    write_line(out, json)
}
