//! Dirtycop: scope lint findings to the lines changed since a git reference.
//!
//! A run computes one [`changeset::ChangeSet`] from `git diff` and uses it to
//! pick the files a lint engine inspects ([`select`]) and to drop findings
//! that do not touch a changed line ([`filter`]). [`hooks`] bundles both
//! behind a trait an engine can call.

pub mod changeset;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod filter;
pub mod git;
pub mod hooks;
pub mod select;

#[cfg(test)]
mod test_support;
