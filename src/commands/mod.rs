//! Command implementations for dirtycop.
//!
//! The dispatcher resolves one [`RunContext`] and routes the parsed command
//! to its handler. Handlers write to an injected writer so tests can capture
//! their output.

mod changes;
mod files;
mod filter;
mod lines;


pub use changes::cmd_changes;
pub use files::cmd_files;
pub use filter::cmd_filter;
pub use lines::cmd_lines;

use crate::cli::{Cli, Command};
use crate::context::RunContext;
use crate::error::{DirtyError, Result};
use std::io::{self, Read, Write};

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = RunContext::resolve(
        cli.directory.as_deref(),
        cli.config.as_deref(),
        cli.reference.as_deref(),
    )?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Files(args) => cmd_files(&ctx, args, &mut out),
        Command::Lines(args) => cmd_lines(&ctx, args, &mut out),
        Command::Changes => cmd_changes(&ctx, &mut out),
        Command::Filter(args) => cmd_filter(&ctx, args, &mut out),
    }
}

/// Read a whole input source: a file path, or `-` for stdin.
pub(crate) fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| DirtyError::UserError(format!("failed to read stdin: {}", e)))?;
        return Ok(buf);
    }

    std::fs::read_to_string(source)
        .map_err(|e| DirtyError::UserError(format!("failed to read '{}': {}", source, e)))
}

pub(crate) fn write_line<W: Write>(out: &mut W, line: impl std::fmt::Display) -> Result<()> {
    writeln!(out, "{}", line)
        .map_err(|e| DirtyError::UserError(format!("failed to write output: {}", e)))
}
