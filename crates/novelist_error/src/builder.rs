//! Builder-related errors.

/// Specific builder error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// Validation failed
    #[display("Validation failed: {}", _0)]
    ValidationFailed(String),
}

/// Builder error with location tracking.
///
/// Produced when a `derive_builder` generated builder (for example the
/// request builder) rejects a value. Request fields all have defaults, so
/// a missing field is never an error.
///
/// ```
/// use novelist_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::from("`messages` must be initialized".to_string());
/// assert!(matches!(err.kind(), BuilderErrorKind::ValidationFailed(_)));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}

impl From<String> for BuilderError {
    #[track_caller]
    fn from(msg: String) -> Self {
        Self::new(BuilderErrorKind::ValidationFailed(msg))
    }
}

impl From<&str> for BuilderError {
    #[track_caller]
    fn from(msg: &str) -> Self {
        Self::new(BuilderErrorKind::ValidationFailed(msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_become_validation_failures() {
        let err = BuilderError::from("temperature out of range");
        assert_eq!(
            err.kind(),
            &BuilderErrorKind::ValidationFailed("temperature out of range".to_string())
        );
        assert!(err.to_string().starts_with("Builder Error: Validation failed: temperature"));
    }
}
