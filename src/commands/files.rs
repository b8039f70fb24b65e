//! Implementation of the `dirtycop files` command.

use super::{read_input, write_line};
use crate::cli::FilesArgs;
use crate::context::RunContext;
use crate::error::Result;
use crate::hooks::{DirtyScope, LintHooks};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Execute the `dirtycop files` command.
///
/// Prints the files the lint engine should inspect, one per line. Explicit
/// files are printed as given without consulting git. Otherwise the
/// discovered list comes from `--discovered`; without it every changed file
/// not matching the configured `exclude` globs is eligible.
pub fn cmd_files<W: Write>(ctx: &RunContext, args: FilesArgs, out: &mut W) -> Result<()> {
    if !args.files.is_empty() {
        for path in &args.files {
            write_line(out, path.display())?;
        }
        return Ok(());
    }

    let scope = ctx.scope()?;

    let discovered = match args.discovered.as_deref() {
        Some(source) => parse_listing(&read_input(source)?),
        None => default_whitelist(ctx, &scope)?,
    };

    for path in scope.select_targets(&discovered, &[]) {
        write_line(out, path.display())?;
    }

    Ok(())
}

/// One path per non-blank line.
fn parse_listing(listing: &str) -> Vec<PathBuf> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn default_whitelist(ctx: &RunContext, scope: &DirtyScope) -> Result<Vec<PathBuf>> {
    let exclude = ctx.config.exclude_globs()?;

    Ok(scope
        .changes()
        .files()
        .filter(|&path| {
            let relative = ctx.repo_relative(path).unwrap_or(path);
            !exclude.is_match(relative)
        })
        .map(Path::to_path_buf)
        .collect())
}
