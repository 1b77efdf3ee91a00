//! Beatbook - beat books for reporters from a pile of news stories
//!
//! Beatbook runs three stages, each a subcommand of the `beatbook` binary:
//!
//! 1. `extract` asks an external LLM command-line tool for the people, places
//!    and organizations named in each story
//! 2. `aggregate` counts mentions and keeps the names that come up often
//! 3. `generate` hands the ranked names and a few sample headlines to the
//!    tool and saves its answer as the beat book
//!
//! An optional `classify` step between the first two files each story under
//! one topic; the topic counts then appear in the summary and the prompt.
//!
//! Stages exchange data only through JSON files on disk, so each one can be
//! rerun on its own.
//!
//! # Architecture
//!
//! - `beatbook_error` - Error types
//! - `beatbook_core` - Story, enriched story and summary records
//! - `beatbook_interface` - `TextGenerator` trait
//! - `beatbook_models` - Subprocess driver for the LLM tool
//! - `beatbook_pipeline` - The stages, configuration and file I/O
//!
//! This crate (`beatbook`) re-exports everything for convenience.

pub use beatbook_core::*;
pub use beatbook_error::*;
pub use beatbook_interface::*;
pub use beatbook_models::*;
pub use beatbook_pipeline::*;
