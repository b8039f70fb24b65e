//! Implementation of the `dirtycop lines` command.

use super::write_line;
use crate::cli::LinesArgs;
use crate::context::RunContext;
use crate::diff::resolve_path;
use crate::error::Result;
use std::io::Write;

/// Execute the `dirtycop lines` command.
///
/// Diffs a single file, without building the full change set, and prints
/// its changed line numbers in ascending order.
pub fn cmd_lines<W: Write>(ctx: &RunContext, args: LinesArgs, out: &mut W) -> Result<()> {
    let file = resolve_path(&ctx.base_dir, &args.file);
    let provider = ctx.provider();
    let lines = ctx.builder(&provider)?.changed_lines(&file, &ctx.reference)?;

    for line in lines.iter() {
        write_line(out, line)?;
    }

    Ok(())
}
