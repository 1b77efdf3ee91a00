//! Aggregate command handler.

use beatbook::{BeatbookResult, ConfigError, PipelineConfig, aggregate_file};
use std::path::Path;
use tracing::info;

/// Rank entity mentions from `input` into `output`.
///
/// A `--threshold` flag takes precedence over `aggregate.threshold`.
pub async fn run_aggregate(
    input: &Path,
    output: &Path,
    threshold: Option<usize>,
) -> BeatbookResult<()> {
    let config = PipelineConfig::load()?;
    let threshold = threshold.unwrap_or(config.aggregate.threshold);
    if threshold == 0 {
        return Err(ConfigError::new("--threshold must be at least 1").into());
    }

    let summary = aggregate_file(input, output, threshold).await?;

    info!(
        stories = summary.total_stories(),
        threshold,
        output = %output.display(),
        "Entity summary finished"
    );
    Ok(())
}
