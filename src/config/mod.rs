//! Configuration model for dirtycop.
//!
//! This module defines the Config struct that represents `.dirtycop.yml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for every field, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use operations::validate_reference;
pub use types::{FailurePolicy, CONFIG_FILE_NAME};
