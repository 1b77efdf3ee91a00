//! Entity extraction stage.
//!
//! Sends each story to the text-generation tool, one call at a time, and
//! turns the response into three name lists. A response that cannot be
//! parsed, or a call that fails, costs that story its entities and nothing
//! more: the batch always runs to the end.

use crate::{extract_json, load_stories, parse_json, prompts, write_json};
use beatbook_core::{EnrichedStory, EntityLists, GenerateRequest, Story};
use beatbook_error::BeatbookResult;
use beatbook_interface::TextGenerator;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Characters of story content forwarded to the tool by default.
pub const CONTENT_CHARS: usize = 2000;

/// Result of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// The response held usable entity lists
    Parsed(EntityLists),
    /// The response was unusable or the call failed
    ParseFailure {
        /// What went wrong
        reason: String,
    },
}

impl ExtractionOutcome {
    /// True for [`ExtractionOutcome::ParseFailure`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ParseFailure { .. })
    }

    /// Entity lists for the story; empty lists on failure.
    pub fn into_entities(self) -> EntityLists {
        match self {
            Self::Parsed(entities) => entities,
            Self::ParseFailure { .. } => EntityLists::default(),
        }
    }
}

/// Interpret a raw tool response as entity lists.
///
/// The response is tried as JSON directly, then inside a markdown code
/// fence, then as the first balanced `{...}`. Missing category keys read as
/// empty lists.
///
/// # Examples
///
/// ```
/// use beatbook_pipeline::{parse_entities, ExtractionOutcome};
///
/// let outcome = parse_entities("```json\n{\"people\": [\"A\", \"B\"]}\n```");
/// let entities = outcome.into_entities();
/// assert_eq!(entities.people(), &vec!["A".to_string(), "B".to_string()]);
///
/// assert!(parse_entities("Sorry, I can't help with that.").is_failure());
/// ```
pub fn parse_entities(response: &str) -> ExtractionOutcome {
    let parsed = extract_json(response).and_then(|json| parse_json::<Value>(&json));
    let value = match parsed {
        Ok(value) => value,
        Err(e) => {
            return ExtractionOutcome::ParseFailure {
                reason: e.to_string(),
            };
        }
    };

    if !value.is_object() {
        return ExtractionOutcome::ParseFailure {
            reason: "response JSON is not an object".to_string(),
        };
    }

    match serde_json::from_value::<EntityLists>(value) {
        Ok(entities) => ExtractionOutcome::Parsed(entities),
        Err(e) => ExtractionOutcome::ParseFailure {
            reason: format!("unexpected entity lists: {}", e),
        },
    }
}

/// Leading `max_chars` characters of `text`, never splitting a character.
///
/// # Examples
///
/// ```
/// use beatbook_pipeline::truncate_chars;
///
/// assert_eq!(truncate_chars("Café society", 4), "Café");
/// assert_eq!(truncate_chars("short", 2000), "short");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ExtractOptions {
    /// Characters of content forwarded per story
    #[builder(default = "CONTENT_CHARS")]
    content_chars: usize,
    /// Pause between consecutive calls
    #[builder(default)]
    delay: Duration,
    /// Skip the tool entirely; every story gets empty lists
    #[builder(default)]
    dry_run: bool,
    /// Process only the first N stories
    #[builder(default)]
    limit: Option<usize>,
}

impl ExtractOptions {
    /// Creates a new options builder.
    pub fn builder() -> ExtractOptionsBuilder {
        ExtractOptionsBuilder::default()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            content_chars: CONTENT_CHARS,
            delay: Duration::ZERO,
            dry_run: false,
            limit: None,
        }
    }
}

/// Enriched records from one extraction run.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ExtractionReport {
    /// One record per processed story, in input order
    stories: Vec<EnrichedStory>,
    /// Stories whose extraction failed and received empty lists
    failures: usize,
}

impl ExtractionReport {
    /// Consumes the report, returning the enriched records.
    pub fn into_stories(self) -> Vec<EnrichedStory> {
        self.stories
    }
}

/// Runs entity extraction against a text generator.
pub struct Extractor<G: TextGenerator> {
    generator: G,
    options: ExtractOptions,
}

impl<G: TextGenerator> Extractor<G> {
    /// Create an extractor.
    pub fn new(generator: G, options: ExtractOptions) -> Self {
        Self { generator, options }
    }

    /// The generator calls are sent to.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Extract entities from one story with a single tool call.
    #[instrument(skip(self, story), fields(title = %story.title()))]
    pub async fn extract_story(&self, story: &Story) -> ExtractionOutcome {
        let content = truncate_chars(story.content(), self.options.content_chars);
        let request = GenerateRequest::new(prompts::extraction_prompt(story.title(), content));

        match self.generator.generate(&request).await {
            Ok(response) => parse_entities(response.text()),
            Err(e) => ExtractionOutcome::ParseFailure {
                reason: e.to_string(),
            },
        }
    }

    /// Extract entities from every story, strictly in sequence.
    #[instrument(skip_all, fields(stories = stories.len(), dry_run = self.options.dry_run))]
    pub async fn run(&self, stories: Vec<Story>) -> ExtractionReport {
        let total = self
            .options
            .limit
            .map_or(stories.len(), |limit| limit.min(stories.len()));
        info!(
            total,
            provider = self.generator.provider_name(),
            model = self.generator.model_name().unwrap_or("default"),
            "Extracting entities"
        );

        let mut enriched = Vec::with_capacity(total);
        let mut failures = 0;

        for (index, story) in stories.into_iter().take(total).enumerate() {
            if self.options.dry_run {
                debug!(index, title = %story.title(), "Dry run, skipping tool call");
                enriched.push(EnrichedStory::new(story, EntityLists::default()));
                continue;
            }

            if index > 0 && !self.options.delay.is_zero() {
                tokio::time::sleep(self.options.delay).await;
            }

            info!(index = index + 1, total, title = %story.title(), "Processing story");
            let outcome = self.extract_story(&story).await;
            match &outcome {
                ExtractionOutcome::Parsed(entities) => {
                    debug!(index, entities = entities.len(), "Extracted entities");
                }
                ExtractionOutcome::ParseFailure { reason } => {
                    failures += 1;
                    warn!(
                        index,
                        title = %story.title(),
                        reason = %reason,
                        "Entity extraction failed, using empty lists"
                    );
                }
            }
            enriched.push(EnrichedStory::new(story, outcome.into_entities()));
        }

        info!(processed = enriched.len(), failures, "Extraction complete");
        ExtractionReport {
            stories: enriched,
            failures,
        }
    }

    /// Read stories from `input`, extract entities and write the enriched
    /// records to `output`.
    ///
    /// # Errors
    ///
    /// Fails only on reading or writing files; per-story failures are
    /// counted in the report.
    #[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
    pub async fn extract_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> BeatbookResult<ExtractionReport> {
        let stories = load_stories(input).await?;
        let report = self.run(stories).await;
        write_json(output, report.stories()).await?;
        info!(stories = report.stories().len(), "Wrote enriched stories");
        Ok(report)
    }
}
