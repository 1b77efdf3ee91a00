//! Extract command handler.

use super::settings::{llm_cli, load_config};
use beatbook::{BeatbookResult, ConfigError, ExtractOptions, Extractor};
use std::path::Path;
use tracing::info;

/// Run entity extraction from `input` into `output`.
pub async fn run_extract(
    input: &Path,
    output: &Path,
    model: Option<String>,
    limit: Option<usize>,
    dry_run: bool,
) -> BeatbookResult<()> {
    let config = load_config(model)?;

    let options = ExtractOptions::builder()
        .content_chars(config.extract.content_chars)
        .delay(config.extract.delay())
        .dry_run(dry_run)
        .limit(limit)
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid extraction options: {}", e)))?;

    let extractor = Extractor::new(llm_cli(&config)?, options);
    let report = extractor.extract_file(input, output).await?;

    info!(
        processed = report.stories().len(),
        failures = report.failures(),
        output = %output.display(),
        "Entity extraction finished"
    );
    Ok(())
}
