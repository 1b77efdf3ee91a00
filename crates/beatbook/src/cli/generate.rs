//! Generate command handler.

use super::settings::{llm_cli, load_config};
use beatbook::{
    BeatbookResult, ConfigError, GenerateOptions, Generator, PipelineConfig, build_prompt,
    load_enriched, load_summary,
};
use std::path::Path;
use tracing::info;

/// Write the beat book, or print its prompt with `prompt_only`.
pub async fn run_generate(
    summary: &Path,
    stories: &Path,
    output: &Path,
    beat: Option<String>,
    model: Option<String>,
    prompt_only: bool,
) -> BeatbookResult<()> {
    let config = load_config(model)?;
    let options = generate_options(&config, beat)?;

    if prompt_only {
        let summary = load_summary(summary).await?;
        let stories = load_enriched(stories).await?;
        print!("{}", build_prompt(&summary, &stories, &options));
        return Ok(());
    }

    let generator = Generator::new(llm_cli(&config)?, options);
    let text = generator.generate_file(summary, stories, output).await?;

    info!(
        chars = text.chars().count(),
        output = %output.display(),
        "Beat book finished"
    );
    Ok(())
}

fn generate_options(
    config: &PipelineConfig,
    beat: Option<String>,
) -> BeatbookResult<GenerateOptions> {
    let beat = beat
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| config.generate.beat.clone());

    GenerateOptions::builder()
        .sample_size(config.generate.sample_size)
        .headline_count(config.generate.headline_count)
        .beat(beat)
        .timeout(config.llm.generation_timeout())
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid generation options: {}", e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_beat_flag_overrides_config() {
        let config = PipelineConfig::from_toml_str(
            "[generate]\nbeat = \"county government\"\n[llm]\ngeneration_timeout_secs = 30\n",
        )
        .unwrap();

        let options = generate_options(&config, None).unwrap();
        assert_eq!(options.beat(), "county government");
        assert_eq!(*options.timeout(), Duration::from_secs(30));

        let options = generate_options(&config, Some("courts".to_string())).unwrap();
        assert_eq!(options.beat(), "courts");
        assert_eq!(*options.sample_size(), 10);
        assert_eq!(*options.headline_count(), 5);
    }
}
