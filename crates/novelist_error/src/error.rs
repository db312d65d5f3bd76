//! Top-level error wrapper types.

use crate::{
    BackendError, BuilderError, ConfigError, GeminiError, JsonError, PipelineError, StorageError,
};

/// Every error condition a Novelist operation can surface.
///
/// # Examples
///
/// ```
/// use novelist_error::{NovelistError, JsonError};
///
/// let err: NovelistError = JsonError::new("unexpected end of input").into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum NovelistErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Gemini error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Generation pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Novelist error with kind discrimination.
///
/// # Examples
///
/// ```
/// use novelist_error::{NovelistErrorKind, NovelistResult, StorageError, StorageErrorKind};
///
/// fn load() -> NovelistResult<()> {
///     Err(StorageError::new(StorageErrorKind::NotFound("worlds/42".to_string())))?
/// }
///
/// let err = load().unwrap_err();
/// assert!(matches!(err.kind(), NovelistErrorKind::Storage(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Novelist Error: {}", _0)]
pub struct NovelistError(Box<NovelistErrorKind>);

impl NovelistError {
    /// Create a new error from a kind.
    pub fn new(kind: NovelistErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &NovelistErrorKind {
        &self.0
    }
}

impl<T> From<T> for NovelistError
where
    T: Into<NovelistErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Novelist operations.
pub type NovelistResult<T> = std::result::Result<T, NovelistError>;
