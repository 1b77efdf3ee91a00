//! Input shape errors.

/// The input file parsed as JSON but does not hold a story collection.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Input Format Error: {} at line {} in {}", message, line, file)]
pub struct InputFormatError {
    /// Description of the unexpected shape
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl InputFormatError {
    /// Create a new InputFormatError at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
