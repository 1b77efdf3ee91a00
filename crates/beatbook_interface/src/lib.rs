//! Trait definitions for the Beatbook pipeline.
//!
//! Stages talk to the external text-generation tool only through
//! [`TextGenerator`], so tests can substitute a scripted implementation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::TextGenerator;
