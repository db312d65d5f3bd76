//! Backend error types.

/// A failure in the LLM backend that is not provider specific, such as a
/// response without any usable text.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", message, line, file)]
pub struct BackendError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError at the caller's location.
    ///
    /// ```
    /// use novelist_error::BackendError;
    ///
    /// let err = BackendError::new("model returned no text");
    /// assert!(err.to_string().starts_with("Backend Error: model returned no text"));
    /// ```
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
