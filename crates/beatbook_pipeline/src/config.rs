//! Pipeline configuration.
//!
//! Settings are layered, later sources overriding earlier ones:
//! - Bundled defaults (include_str! from beatbook.toml)
//! - ~/.config/beatbook/beatbook.toml
//! - ./beatbook.toml
//!
//! Command-line flags and the `LLM_MODEL` variable are applied on top by the
//! binary.

use beatbook_error::{BeatbookError, BeatbookResult, ConfigError};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../beatbook.toml");

/// How to reach the external text-generation tool.
///
/// ```toml
/// [llm]
/// program = "llm"
/// args = []
/// model = "claude-sonnet-4.5"
/// generation_timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Executable name or path
    pub program: String,

    /// Arguments placed before the model flag
    #[serde(default)]
    pub args: Vec<String>,

    /// Model identifier passed with `-m`; the tool's default when unset
    #[serde(default)]
    pub model: Option<String>,

    /// Wall-clock limit for the generation call
    pub generation_timeout_secs: u64,
}

impl LlmConfig {
    /// Generation timeout as a duration.
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}

/// Entity extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Characters of story content forwarded to the tool
    pub content_chars: usize,

    /// Pause between consecutive extraction calls, in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
}

impl ExtractConfig {
    /// Pause between calls as a duration.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Topic classification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClassifyConfig {
    /// Characters of story content forwarded to the tool
    pub content_chars: usize,

    /// Pause between consecutive classification calls, in milliseconds
    #[serde(default)]
    pub delay_ms: u64,

    /// Wall-clock limit for each classification call
    pub timeout_secs: u64,
}

impl ClassifyConfig {
    /// Pause between calls as a duration.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Per-call timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Frequency aggregation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AggregateConfig {
    /// Minimum mention count kept in the summary
    pub threshold: usize,
}

/// Beat book generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerateConfig {
    /// Enriched stories sampled from the front of the record set
    pub sample_size: usize,

    /// Sample headlines quoted in the prompt
    pub headline_count: usize,

    /// Coverage area named in the prompt
    pub beat: String,
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// External tool
    pub llm: LlmConfig,
    /// Entity extractor
    pub extract: ExtractConfig,
    /// Topic classifier
    pub classify: ClassifyConfig,
    /// Frequency aggregator
    pub aggregate: AggregateConfig,
    /// Narrative generator
    pub generate: GenerateConfig,
}

impl PipelineConfig {
    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// The result is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a file cannot be parsed or a value is out of range.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use beatbook_pipeline::PipelineConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = PipelineConfig::load()?;
    /// println!("Mention threshold: {}", config.aggregate.threshold);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> BeatbookResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/beatbook/beatbook.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("beatbook").required(false));

        Self::finish(builder)
    }

    /// Bundled defaults overlaid with a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document cannot be parsed or a value is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use beatbook_pipeline::PipelineConfig;
    ///
    /// let config = PipelineConfig::from_toml_str("[aggregate]\nthreshold = 5\n").unwrap();
    /// assert_eq!(config.aggregate.threshold, 5);
    /// assert_eq!(config.generate.sample_size, 10);
    /// ```
    pub fn from_toml_str(toml: &str) -> BeatbookResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first offending key.
    pub fn validate(&self) -> BeatbookResult<()> {
        if self.llm.program.trim().is_empty() {
            return Err(ConfigError::new("llm.program cannot be empty").into());
        }
        if self.llm.generation_timeout_secs == 0 {
            return Err(ConfigError::new("llm.generation_timeout_secs must be at least 1").into());
        }
        if self.classify.timeout_secs == 0 {
            return Err(ConfigError::new("classify.timeout_secs must be at least 1").into());
        }
        if self.aggregate.threshold == 0 {
            return Err(ConfigError::new("aggregate.threshold must be at least 1").into());
        }
        if self.generate.headline_count > self.generate.sample_size {
            return Err(ConfigError::new(format!(
                "generate.headline_count ({}) cannot exceed generate.sample_size ({})",
                self.generate.headline_count, self.generate.sample_size
            ))
            .into());
        }
        Ok(())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> BeatbookResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                BeatbookError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                BeatbookError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }
}
