//! Pipeline stages for building a beat book.
//!
//! - [`Extractor`] sends each story to the text-generation tool and records
//!   the people, places and organizations it names.
//! - [`Classifier`] optionally files each story under one topic.
//! - [`aggregate`] counts mentions and ranks the names that meet the
//!   threshold.
//! - [`Generator`] turns the ranked summary and a sample of stories into one
//!   prompt and writes the tool's response as the beat book.
//!
//! Stages talk to each other only through files; see [`load_stories`],
//! [`load_enriched`], [`load_summary`] and [`write_json`].
//!
//! # Example
//!
//! ```no_run
//! use beatbook_models::{CliSettings, LlmCli};
//! use beatbook_pipeline::{aggregate_file, ExtractOptions, Extractor, MENTION_THRESHOLD};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = LlmCli::new(CliSettings::builder().program("llm").build()?);
//! let extractor = Extractor::new(llm, ExtractOptions::default());
//!
//! let report = extractor
//!     .extract_file(Path::new("stories.json"), Path::new("enriched.json"))
//!     .await?;
//! println!("{} failures", report.failures());
//!
//! let summary = Path::new("summary.json");
//! aggregate_file(Path::new("enriched.json"), summary, MENTION_THRESHOLD).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod classifier;
mod config;
mod extraction;
mod extractor;
mod generator;
mod prompts;
mod records;

pub use aggregate::{MENTION_THRESHOLD, aggregate, aggregate_file};
pub use classifier::{
    CLASSIFICATION_TIMEOUT, ClassificationReport, Classifier, ClassifyOptions,
    ClassifyOptionsBuilder, TOPIC_CONTENT_CHARS,
};
pub use config::{
    AggregateConfig, ClassifyConfig, ExtractConfig, GenerateConfig, LlmConfig, PipelineConfig,
};
pub use extraction::{extract_json, parse_json};
pub use extractor::{
    CONTENT_CHARS, ExtractOptions, ExtractOptionsBuilder, ExtractionOutcome, ExtractionReport,
    Extractor, parse_entities, truncate_chars,
};
pub use generator::{
    DEFAULT_BEAT, GENERATION_TIMEOUT, GenerateOptions, GenerateOptionsBuilder, Generator,
    HEADLINE_COUNT, SAMPLE_SIZE, build_prompt,
};
pub use prompts::{
    BeatbookPromptParts, TOP_TOPICS, beatbook_prompt, classification_prompt, extraction_prompt,
};
pub use records::{
    load_enriched, load_stories, load_summary, stories_from_value, write_json, write_text_atomic,
};
