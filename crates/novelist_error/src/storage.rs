//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create a storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a record
    #[display("Failed to write record: {}", _0)]
    FileWrite(String),
    /// Failed to read a record
    #[display("Failed to read record: {}", _0)]
    FileRead(String),
    /// Failed to delete a record
    #[display("Failed to delete record: {}", _0)]
    FileDelete(String),
    /// No record with this category and id
    #[display("Record not found: {}", _0)]
    NotFound(String),
    /// A dot path does not resolve inside the record
    #[display("Invalid path '{}': segment '{}' does not exist", path, segment)]
    InvalidPath {
        /// The full dot path requested
        path: String,
        /// The first segment that failed to resolve
        segment: String,
    },
    /// A replacement value has the wrong shape
    #[display("Invalid value: {}", _0)]
    InvalidValue(String),
    /// Unknown storage category name
    #[display("Unknown category: {}", _0)]
    UnknownCategory(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use novelist_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("plots/1234".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
