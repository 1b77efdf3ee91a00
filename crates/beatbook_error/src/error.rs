//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, InputFormatError, IoError, JsonError};

/// Every error condition a pipeline stage can terminate with.
///
/// # Examples
///
/// ```
/// use beatbook_error::{BeatbookError, JsonError};
///
/// let err: BeatbookError = JsonError::new("trailing comma").into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum BeatbookErrorKind {
    /// Filesystem error
    #[from(IoError)]
    Io(IoError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Input file has an unrecognised shape
    #[from(InputFormatError)]
    InputFormat(InputFormatError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// External text-generation tool error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// Beatbook error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Beatbook Error: {}", _0)]
pub struct BeatbookError(Box<BeatbookErrorKind>);

impl BeatbookError {
    /// Create a new error from a kind.
    pub fn new(kind: BeatbookErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BeatbookErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to BeatbookErrorKind
impl<T> From<T> for BeatbookError
where
    T: Into<BeatbookErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Beatbook operations.
pub type BeatbookResult<T> = std::result::Result<T, BeatbookError>;
