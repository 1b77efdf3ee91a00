//! External text-generation tool drivers for Beatbook.
//!
//! The pipeline does not speak any model API itself. It shells out to a
//! command-line tool (by default Simon Willison's `llm`), writes the prompt to
//! the child's stdin and reads the response from stdout.
//!
//! ```no_run
//! use beatbook_core::GenerateRequest;
//! use beatbook_interface::TextGenerator;
//! use beatbook_models::{CliSettings, LlmCli};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cli = LlmCli::new(CliSettings::builder().program("llm").build()?);
//! let request = GenerateRequest::builder().prompt("Say hello").build()?;
//! let response = cli.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cli;

pub use cli::{CliSettings, CliSettingsBuilder, LlmCli};
