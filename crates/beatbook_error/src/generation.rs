//! External text-generation tool errors.

/// Specific failure conditions when invoking the external CLI tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The program could not be started
    #[display("Failed to start '{}': {}", program, message)]
    Spawn {
        /// Program name
        program: String,
        /// OS error message
        message: String,
    },
    /// Writing the prompt to the child's stdin failed
    #[display("Failed to write prompt to stdin: {}", _0)]
    Stdin(String),
    /// Waiting for the child to finish failed
    #[display("Failed to collect output: {}", _0)]
    Wait(String),
    /// The tool exited with a non-zero status
    #[display("Tool exited with status {}: {}", status, stderr)]
    NonZeroExit {
        /// Exit code, or -1 when terminated by a signal
        status: i32,
        /// Diagnostic text the tool wrote to stderr
        stderr: String,
    },
    /// The call did not finish within the wall-clock bound
    #[display("Tool did not finish within {} seconds", secs)]
    Timeout {
        /// Configured bound in seconds
        secs: u64,
    },
}

/// Error raised by a text-generation call.
///
/// # Examples
///
/// ```
/// use beatbook_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::NonZeroExit {
///     status: 1,
///     stderr: "Error: No key found".to_string(),
/// });
/// assert!(format!("{}", err).contains("No key found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }
}
