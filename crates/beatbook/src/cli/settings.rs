//! Configuration shared by the stage handlers.

use beatbook::{BeatbookResult, CliSettings, ConfigError, LlmCli, PipelineConfig};
use tracing::debug;

/// Environment variable naming the default model.
const MODEL_ENV: &str = "LLM_MODEL";

/// Load configuration and apply a `--model` flag or `LLM_MODEL`.
///
/// Precedence: flag, then environment, then configuration files.
pub fn load_config(model: Option<String>) -> BeatbookResult<PipelineConfig> {
    let mut config = PipelineConfig::load()?;
    let env_model = std::env::var(MODEL_ENV).ok();
    config.llm.model = resolve_model(model, env_model, config.llm.model.take());
    debug!(program = %config.llm.program, model = ?config.llm.model, "Configuration loaded");
    Ok(config)
}

fn resolve_model(
    flag: Option<String>,
    env: Option<String>,
    configured: Option<String>,
) -> Option<String> {
    [flag, env, configured]
        .into_iter()
        .flatten()
        .find(|model| !model.trim().is_empty())
}

/// Driver for the configured LLM tool.
pub fn llm_cli(config: &PipelineConfig) -> BeatbookResult<LlmCli> {
    let settings = CliSettings::builder()
        .program(config.llm.program.clone())
        .args(config.llm.args.clone())
        .model(config.llm.model.clone())
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid LLM tool settings: {}", e)))?;
    Ok(LlmCli::new(settings))
}
