//! Topic classification stage.
//!
//! Files each story under one [`Topic`] with a single tool call. Like
//! extraction it is fail-soft: a failed call files the story under
//! [`Topic::Other`] and the batch carries on.

use crate::{load_stories, prompts, truncate_chars, write_json};
use beatbook_core::{GenerateRequest, Story, Topic};
use beatbook_error::BeatbookResult;
use beatbook_interface::TextGenerator;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Characters of story content forwarded for classification by default.
pub const TOPIC_CONTENT_CHARS: usize = 600;

/// Wall-clock limit for one classification call by default.
pub const CLASSIFICATION_TIMEOUT: Duration = Duration::from_secs(90);

/// Classification settings.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ClassifyOptions {
    /// Characters of content forwarded per story
    #[builder(default = "TOPIC_CONTENT_CHARS")]
    content_chars: usize,
    /// Pause between consecutive calls
    #[builder(default)]
    delay: Duration,
    /// Limit on each tool call
    #[builder(default = "CLASSIFICATION_TIMEOUT")]
    timeout: Duration,
    /// Skip the tool; every story is filed under `Other`
    #[builder(default)]
    dry_run: bool,
}

impl ClassifyOptions {
    /// Creates a new options builder.
    pub fn builder() -> ClassifyOptionsBuilder {
        ClassifyOptionsBuilder::default()
    }
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            content_chars: TOPIC_CONTENT_CHARS,
            delay: Duration::ZERO,
            timeout: CLASSIFICATION_TIMEOUT,
            dry_run: false,
        }
    }
}

/// Stories from one classification run.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ClassificationReport {
    /// Every input story with its topic set, in input order
    stories: Vec<Story>,
    /// Calls that failed and fell back to `Other`
    failures: usize,
}

impl ClassificationReport {
    /// Consumes the report, returning the classified stories.
    pub fn into_stories(self) -> Vec<Story> {
        self.stories
    }
}

/// Runs topic classification against a text generator.
pub struct Classifier<G: TextGenerator> {
    generator: G,
    options: ClassifyOptions,
}

impl<G: TextGenerator> Classifier<G> {
    /// Create a classifier.
    pub fn new(generator: G, options: ClassifyOptions) -> Self {
        Self { generator, options }
    }

    /// The generator calls are sent to.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Ask the tool for one story's topic.
    ///
    /// Any answer maps onto a topic; one that names none is `Other`.
    ///
    /// # Errors
    ///
    /// `GenerationError` if the call fails or times out.
    #[instrument(skip(self, story), fields(title = %story.title()))]
    pub async fn classify_story(&self, story: &Story) -> BeatbookResult<Topic> {
        let content = truncate_chars(story.content(), self.options.content_chars);
        let request = GenerateRequest::new(prompts::classification_prompt(story.title(), content))
            .with_timeout(self.options.timeout);

        let response = self.generator.generate(&request).await?;
        Ok(Topic::from_response(response.text()))
    }

    /// Classify every story, strictly in sequence.
    #[instrument(skip_all, fields(stories = stories.len(), dry_run = self.options.dry_run))]
    pub async fn run(&self, stories: Vec<Story>) -> ClassificationReport {
        let total = stories.len();
        info!(
            total,
            provider = self.generator.provider_name(),
            model = self.generator.model_name().unwrap_or("default"),
            "Classifying topics"
        );

        let mut classified = Vec::with_capacity(total);
        let mut failures = 0;

        for (index, story) in stories.into_iter().enumerate() {
            if self.options.dry_run {
                debug!(index, title = %story.title(), "Dry run, filing under Other");
                classified.push(story.with_topic(Topic::Other));
                continue;
            }

            if index > 0 && !self.options.delay.is_zero() {
                tokio::time::sleep(self.options.delay).await;
            }

            let topic = match self.classify_story(&story).await {
                Ok(topic) => topic,
                Err(e) => {
                    failures += 1;
                    warn!(
                        index,
                        title = %story.title(),
                        error = %e,
                        "Topic classification failed, using Other"
                    );
                    Topic::Other
                }
            };
            info!(index = index + 1, total, %topic, "Classified story");
            classified.push(story.with_topic(topic));
        }

        info!(processed = classified.len(), failures, "Classification complete");
        ClassificationReport {
            stories: classified,
            failures,
        }
    }

    /// Read stories from `input`, classify them and write them to `output`.
    ///
    /// `input` may be the raw export or the enriched file; fields the story
    /// model does not know, entity lists included, are written back
    /// unchanged. `output` may be the same path as `input`.
    ///
    /// # Errors
    ///
    /// Fails only on reading or writing files.
    #[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
    pub async fn classify_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> BeatbookResult<ClassificationReport> {
        let stories = load_stories(input).await?;
        let report = self.run(stories).await;
        write_json(output, report.stories()).await?;
        info!(stories = report.stories().len(), "Wrote classified stories");
        Ok(report)
    }
}
