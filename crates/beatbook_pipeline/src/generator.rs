//! Narrative generation stage.
//!
//! One prompt, one call, one file. The call is bounded by a timeout and any
//! failure leaves the output path untouched.

use crate::prompts::{self, BeatbookPromptParts};
use crate::{load_enriched, load_summary, write_text_atomic};
use beatbook_core::{EnrichedStory, EntitySummary, GenerateRequest};
use beatbook_error::BeatbookResult;
use beatbook_interface::TextGenerator;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Enriched stories sampled from the front of the record set.
pub const SAMPLE_SIZE: usize = 10;

/// Sample headlines quoted in the prompt.
pub const HEADLINE_COUNT: usize = 5;

/// Wall-clock limit for the generation call.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Coverage area used when none is given.
pub const DEFAULT_BEAT: &str = "this beat";

/// Generation settings.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GenerateOptions {
    /// Stories sampled for dates and headlines
    #[builder(default = "SAMPLE_SIZE")]
    sample_size: usize,
    /// Headlines quoted, taken from the front of the sample
    #[builder(default = "HEADLINE_COUNT")]
    headline_count: usize,
    /// Coverage area named in the prompt
    #[builder(default = "DEFAULT_BEAT.to_string()")]
    beat: String,
    /// Limit on the tool call
    #[builder(default = "GENERATION_TIMEOUT")]
    timeout: Duration,
}

impl GenerateOptions {
    /// Creates a new options builder.
    pub fn builder() -> GenerateOptionsBuilder {
        GenerateOptionsBuilder::default()
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            sample_size: SAMPLE_SIZE,
            headline_count: HEADLINE_COUNT,
            beat: DEFAULT_BEAT.to_string(),
            timeout: GENERATION_TIMEOUT,
        }
    }
}

/// Assemble the beat book prompt from the summary and the enriched stories.
///
/// Headlines come from the first `sample_size` stories: the first
/// `headline_count` of them are quoted, skipping empty titles. The date range
/// spans every story whose date parses.
pub fn build_prompt(
    summary: &EntitySummary,
    stories: &[EnrichedStory],
    options: &GenerateOptions,
) -> String {
    let sample = &stories[..stories.len().min(options.sample_size)];

    let headlines: Vec<&str> = sample
        .iter()
        .take(options.headline_count)
        .map(|story| story.title().as_str())
        .filter(|title| !title.trim().is_empty())
        .collect();

    let dates = stories.iter().filter_map(EnrichedStory::parsed_date);
    let date_range = dates.fold(None, |range, date| match range {
        None => Some((date, date)),
        Some((first, last)) => Some((date.min(first), date.max(last))),
    });

    debug!(
        sampled = sample.len(),
        headlines = headlines.len(),
        dated = date_range.is_some(),
        "Assembling beat book prompt"
    );

    prompts::beatbook_prompt(&BeatbookPromptParts {
        beat: &options.beat,
        summary,
        headlines: &headlines,
        date_range,
    })
}

/// Writes beat books with a text generator.
pub struct Generator<G: TextGenerator> {
    generator: G,
    options: GenerateOptions,
}

impl<G: TextGenerator> Generator<G> {
    /// Create a generator.
    pub fn new(generator: G, options: GenerateOptions) -> Self {
        Self { generator, options }
    }

    /// The generator the call is sent to.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Options in effect.
    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Prompt that [`Generator::generate`] would send.
    pub fn prompt(&self, summary: &EntitySummary, stories: &[EnrichedStory]) -> String {
        build_prompt(summary, stories, &self.options)
    }

    /// Send the prompt once and return the response verbatim.
    ///
    /// # Errors
    ///
    /// `GenerationError` if the tool cannot be started, exits non-zero or
    /// runs past the timeout.
    #[instrument(
        skip_all,
        fields(stories = stories.len(), provider = self.generator.provider_name())
    )]
    pub async fn generate(
        &self,
        summary: &EntitySummary,
        stories: &[EnrichedStory],
    ) -> BeatbookResult<String> {
        let request =
            GenerateRequest::new(self.prompt(summary, stories)).with_timeout(self.options.timeout);
        info!(
            provider = self.generator.provider_name(),
            model = self.generator.model_name().unwrap_or("default"),
            timeout_secs = self.options.timeout.as_secs(),
            "Generating beat book"
        );

        let response = self.generator.generate(&request).await?;
        Ok(response.into_text())
    }

    /// Load the summary and enriched stories, generate, and write the
    /// response to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be loaded, the call fails, or the
    /// output cannot be written. Nothing is written unless the call succeeds.
    #[instrument(
        skip_all,
        fields(
            summary = %summary_path.display(),
            stories = %stories_path.display(),
            output = %output.display()
        )
    )]
    pub async fn generate_file(
        &self,
        summary_path: &Path,
        stories_path: &Path,
        output: &Path,
    ) -> BeatbookResult<String> {
        let summary = load_summary(summary_path).await?;
        let stories = load_enriched(stories_path).await?;

        let text = self.generate(&summary, &stories).await?;
        write_text_atomic(output, &text).await?;

        info!(chars = text.chars().count(), "Wrote beat book");
        Ok(text)
    }
}
