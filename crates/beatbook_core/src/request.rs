//! Request and response types for text generation.

use std::time::Duration;

/// A single prompt sent to the text-generation tool.
///
/// # Examples
///
/// ```
/// use beatbook_core::GenerateRequest;
/// use std::time::Duration;
///
/// let request = GenerateRequest::builder()
///     .prompt("Extract the people named in this story.")
///     .timeout(Some(Duration::from_secs(120)))
///     .build()
///     .unwrap();
///
/// assert!(request.model().is_none());
/// assert_eq!(*request.timeout(), Some(Duration::from_secs(120)));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Default,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Full prompt text, delivered on stdin
    prompt: String,
    /// Model identifier; the driver's default is used when unset
    #[builder(default)]
    model: Option<String>,
    /// Wall-clock bound for the call; unbounded when unset
    #[builder(default)]
    timeout: Option<Duration>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Request with no model override and no timeout.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            timeout: None,
        }
    }

    /// Bounds the call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Text returned by the tool, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GenerateResponse {
    /// Everything the tool wrote to stdout
    text: String,
}

impl GenerateResponse {
    /// Wraps raw tool output.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Consumes the response, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}
