//! Error types for the Beatbook pipeline.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Malformed extraction responses are never errors; they are recovered inside
//! the extractor. Everything here terminates the stage that raised it.
//!
//! # Examples
//!
//! ```
//! use beatbook_error::{BeatbookResult, ConfigError};
//!
//! fn load() -> BeatbookResult<()> {
//!     Err(ConfigError::new("threshold must be at least 1"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod input;
mod io;
mod json;

pub use config::ConfigError;
pub use error::{BeatbookError, BeatbookErrorKind, BeatbookResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use input::InputFormatError;
pub use io::{IoError, IoErrorKind};
pub use json::JsonError;
