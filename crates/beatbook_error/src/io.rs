//! Filesystem error types.

/// Kinds of filesystem errors raised while moving data between stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum IoErrorKind {
    /// Failed to read a file
    #[display("Failed to read file: {}", _0)]
    Read(String),
    /// Failed to write a file
    #[display("Failed to write file: {}", _0)]
    Write(String),
    /// Failed to create a parent directory
    #[display("Failed to create directory: {}", _0)]
    CreateDir(String),
    /// Failed to move a temporary file into place
    #[display("Failed to rename file: {}", _0)]
    Rename(String),
}

/// Filesystem error with location tracking.
///
/// # Examples
///
/// ```
/// use beatbook_error::{IoError, IoErrorKind};
///
/// let err = IoError::new(IoErrorKind::Read("stories.json: not found".to_string()));
/// assert!(format!("{}", err).contains("Failed to read"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("IO Error: {} at line {} in {}", kind, line, file)]
pub struct IoError {
    /// The kind of error that occurred
    pub kind: IoErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl IoError {
    /// Create a new IO error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: IoErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
