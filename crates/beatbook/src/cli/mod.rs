//! Command-line interface module.
//!
//! This module provides the CLI structure and stage handlers for the beatbook binary.

mod aggregate;
mod classify;
mod commands;
mod extract;
mod generate;
mod settings;

pub use aggregate::run_aggregate;
pub use classify::run_classify;
pub use commands::{Cli, Commands};
pub use extract::run_extract;
pub use generate::run_generate;
