//! JSON error types.

/// JSON encoding or decoding failure, optionally tied to a record on disk.
#[derive(Debug, Clone, derive_more::Error)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// Record path the JSON came from, if any
    pub path: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use novelist_error::JsonError;
    ///
    /// let err = JsonError::new("trailing comma at line 3");
    /// assert!(err.message.contains("trailing comma"));
    /// assert!(err.path.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            path: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the path of the record that failed to (de)serialize.
    ///
    /// ```
    /// use novelist_error::JsonError;
    ///
    /// let err = JsonError::new("expected value").with_path("data/worlds/abc.json");
    /// assert!(err.to_string().contains("data/worlds/abc.json"));
    /// ```
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JSON Error: {}", self.message)?;
        if let Some(path) = &self.path {
            write!(f, " ({})", path)?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
