//! Generation pipeline error types.

/// Conditions that stop a generation stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// The user supplied no description to generate from
    #[display("A description is required to generate a novel")]
    EmptyDescription,
    /// A chapter index past the end of the plot outline
    #[display("Chapter index {} is out of range (plot has {} chapters)", index, len)]
    ChapterOutOfRange {
        /// Zero-based index requested
        index: usize,
        /// Number of chapters in the plot
        len: usize,
    },
    /// Character creation produced nothing usable
    #[display("No characters could be created for world '{}'", _0)]
    NoCharacters(String),
    /// Chapter generation produced nothing usable
    #[display("No chapters could be generated for plot '{}'", _0)]
    NoChapters(String),
    /// A plot refers to a world or character that is not stored
    #[display("Missing dependency: {}", _0)]
    MissingDependency(String),
    /// An aspect name that does not match any field of the record
    #[display("Unknown aspect '{}' for {}", aspect, record)]
    UnknownAspect {
        /// The aspect as given
        aspect: String,
        /// Record type (world, character, plot)
        record: String,
    },
    /// Reading a description file failed
    #[display("Failed to read input file: {}", _0)]
    InputRead(String),
    /// Writing an exported text file failed
    #[display("Failed to write output file: {}", _0)]
    OutputWrite(String),
}

/// Error type for generation pipeline operations.
///
/// # Examples
///
/// ```
/// use novelist_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::ChapterOutOfRange { index: 7, len: 3 });
/// assert!(format!("{}", err).contains("out of range"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
