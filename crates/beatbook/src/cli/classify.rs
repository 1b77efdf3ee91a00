//! Classify command handler.

use super::settings::{llm_cli, load_config};
use beatbook::{BeatbookResult, Classifier, ClassifyOptions, ConfigError};
use std::path::Path;
use tracing::info;

/// Run topic classification from `input` into `output`.
pub async fn run_classify(
    input: &Path,
    output: &Path,
    model: Option<String>,
    dry_run: bool,
) -> BeatbookResult<()> {
    let config = load_config(model)?;

    let options = ClassifyOptions::builder()
        .content_chars(config.classify.content_chars)
        .delay(config.classify.delay())
        .timeout(config.classify.timeout())
        .dry_run(dry_run)
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid classification options: {}", e)))?;

    let classifier = Classifier::new(llm_cli(&config)?, options);
    let report = classifier.classify_file(input, output).await?;

    info!(
        processed = report.stories().len(),
        failures = report.failures(),
        output = %output.display(),
        "Topic classification finished"
    );
    Ok(())
}
