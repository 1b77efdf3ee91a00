//! Subprocess driver for a command-line text-generation tool.

use async_trait::async_trait;
use beatbook_core::{GenerateRequest, GenerateResponse};
use beatbook_error::{BeatbookResult, GenerationError, GenerationErrorKind};
use beatbook_interface::TextGenerator;
use std::io::ErrorKind;
use std::process::{Output, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// How to invoke the tool.
///
/// The command line is `program [args...] [-m model]`; the model flag is only
/// added when a model is known, so the tool's own default applies otherwise.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct CliSettings {
    /// Executable name or path
    program: String,
    /// Arguments placed before the model flag
    #[builder(default)]
    args: Vec<String>,
    /// Default model identifier
    #[builder(default)]
    model: Option<String>,
}

impl CliSettings {
    /// Creates a new settings builder.
    pub fn builder() -> CliSettingsBuilder {
        CliSettingsBuilder::default()
    }
}

/// Text generator backed by an external CLI tool.
///
/// Every call spawns a fresh child process. There is no retry; a request
/// without a timeout waits for the tool however long it takes.
#[derive(Debug, Clone)]
pub struct LlmCli {
    settings: CliSettings,
}

impl LlmCli {
    /// Create a driver from settings.
    pub fn new(settings: CliSettings) -> Self {
        Self { settings }
    }

    /// Settings this driver was built with.
    pub fn settings(&self) -> &CliSettings {
        &self.settings
    }

    fn command(&self, model: Option<&str>) -> Command {
        let mut command = Command::new(&self.settings.program);
        command.args(&self.settings.args);
        if let Some(model) = model {
            command.arg("-m").arg(model);
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    /// Spawns the child, feeds it the prompt and collects its output.
    ///
    /// The prompt is written from a separate task so a tool that starts
    /// printing before it has read all of stdin cannot deadlock the pipes.
    async fn run(&self, prompt: &str, model: Option<&str>) -> BeatbookResult<Output> {
        let mut child = self.command(model).spawn().map_err(|e| {
            GenerationError::new(GenerationErrorKind::Spawn {
                program: self.settings.program.clone(),
                message: e.to_string(),
            })
        })?;

        let writer = child.stdin.take().map(|mut stdin| {
            let bytes = prompt.as_bytes().to_vec();
            tokio::spawn(async move {
                stdin.write_all(&bytes).await?;
                stdin.shutdown().await
            })
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Wait(e.to_string())))?;

        if let Some(writer) = writer {
            let written = writer
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))
                .and_then(|result| result);
            match written {
                // A tool that exits without reading all of stdin is judged by its exit status.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("Tool closed stdin before reading the whole prompt");
                }
                Err(e) if output.status.success() => {
                    return Err(
                        GenerationError::new(GenerationErrorKind::Stdin(e.to_string())).into(),
                    );
                }
                _ => {}
            }
        }

        Ok(output)
    }
}

#[async_trait]
impl TextGenerator for LlmCli {
    #[instrument(
        skip(self, req),
        fields(
            program = %self.settings.program,
            prompt_chars = req.prompt().chars().count(),
            timeout_secs = ?req.timeout().map(|t| t.as_secs())
        )
    )]
    async fn generate(&self, req: &GenerateRequest) -> BeatbookResult<GenerateResponse> {
        let model = req.model().as_deref().or(self.settings.model.as_deref());
        debug!(model = ?model, "Invoking text-generation tool");

        let output = match req.timeout() {
            Some(limit) => tokio::time::timeout(*limit, self.run(req.prompt(), model))
                .await
                .map_err(|_| {
                    warn!(secs = limit.as_secs(), "Text-generation tool timed out");
                    GenerationError::new(GenerationErrorKind::Timeout {
                        secs: limit.as_secs(),
                    })
                })??,
            None => self.run(req.prompt(), model).await?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let status = output.status.code().unwrap_or(-1);
            warn!(status, stderr = %stderr, "Text-generation tool failed");
            return Err(
                GenerationError::new(GenerationErrorKind::NonZeroExit { status, stderr }).into(),
            );
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(response_chars = text.chars().count(), "Received response");
        Ok(GenerateResponse::new(text))
    }

    fn provider_name(&self) -> &'static str {
        "llm-cli"
    }

    fn model_name(&self) -> Option<&str> {
        self.settings.model.as_deref()
    }
}
